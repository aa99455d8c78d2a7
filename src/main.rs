use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use graph_lens::config::{ServeArgs, StoreArgs};
use graph_lens::http::{HttpConfig, HttpServer};
use graph_lens::{BoltStore, GraphStoreClient, OperationParams, QueryDispatcher};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graph-lens", version, about = "Property-graph visualization gateway")]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the graph API over HTTP
    Serve(ServeArgs),
    /// Run a single operation and print its JSON body
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Operation: labels, full, byLabel, search or expand
    #[arg(long)]
    op: String,

    #[arg(long)]
    label: Option<String>,

    #[arg(long)]
    query: Option<String>,

    #[arg(long)]
    node_id: Option<String>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let bolt = cli.store.resolve()?;
    let store: Arc<dyn GraphStoreClient> = Arc::new(
        BoltStore::connect(&bolt)
            .await
            .with_context(|| format!("connecting to graph store at {}", bolt.uri))?,
    );
    let dispatcher = Arc::new(QueryDispatcher::new(store));

    match cli.command {
        Command::Serve(args) => serve(&args, dispatcher).await,
        Command::Run(args) => run_once(args, &dispatcher).await,
    }
}

async fn serve(args: &ServeArgs, dispatcher: Arc<QueryDispatcher>) -> anyhow::Result<()> {
    info!("Graph Lens v{}", graph_lens::version());
    let server = HttpServer::new(HttpConfig::from(args), dispatcher);
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))
}

async fn run_once(args: RunArgs, dispatcher: &QueryDispatcher) -> anyhow::Result<()> {
    let params = OperationParams {
        label: args.label,
        query: args.query,
        node_id: args.node_id,
    };

    let output = dispatcher
        .dispatch(&axum::http::Method::GET, Some(&args.op), &params)
        .await?;

    let body = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", body);
    Ok(())
}
