//! Graph Lens CLI — command-line interface for the Graph Lens gateway
//!
//! Uses the graph-lens-sdk RemoteClient to talk to a running gateway.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use graph_lens_sdk::{GraphLensClient, GraphView, NodeView, RemoteClient};

#[derive(Parser)]
#[command(name = "graph-lens-cli", version, about = "Graph Lens gateway CLI")]
struct Cli {
    /// Gateway HTTP URL
    #[arg(long, default_value = "http://localhost:4000", global = true, env = "GRAPH_LENS_URL")]
    url: String,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List node labels
    Labels,
    /// Load the full graph
    Graph,
    /// List nodes carrying a label
    ByLabel {
        /// Label name (letters, digits, underscores)
        label: String,
    },
    /// Search nodes by name, returning their relationships
    Search {
        /// Case-insensitive name fragment
        text: String,
    },
    /// Expand the neighbourhood of a node
    Expand {
        /// Store id of the node
        node_id: String,
    },
    /// Get gateway status
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = RemoteClient::new(&cli.url);

    let result = match &cli.command {
        Commands::Labels => run_labels(&client, &cli.format).await,
        Commands::Graph => {
            let graph = client.full_graph().await;
            print_graph(graph, &cli.format)
        }
        Commands::ByLabel { label } => run_by_label(&client, label, &cli.format).await,
        Commands::Search { text } => {
            let graph = client.search(text).await;
            print_graph(graph, &cli.format)
        }
        Commands::Expand { node_id } => {
            let graph = client.expand(node_id).await;
            print_graph(graph, &cli.format)
        }
        Commands::Status => run_status(&client, &cli.format).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

async fn run_labels(client: &RemoteClient, format: &OutputFormat) -> CliResult {
    let labels = client.labels().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&labels)?),
        OutputFormat::Table => {
            if labels.is_empty() {
                println!("(no labels)");
            }
            for label in &labels {
                println!("{}", label);
            }
        }
    }

    Ok(())
}

async fn run_by_label(client: &RemoteClient, label: &str, format: &OutputFormat) -> CliResult {
    let nodes = client.nodes_by_label(label).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nodes)?),
        OutputFormat::Table => {
            println!("{}", node_table(&nodes));
            println!("{} node(s)", nodes.len());
        }
    }

    Ok(())
}

fn print_graph(
    graph: Result<GraphView, graph_lens_sdk::SdkError>,
    format: &OutputFormat,
) -> CliResult {
    let graph = graph?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
        OutputFormat::Table => {
            if graph.nodes.is_empty() && graph.edges.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            println!("{}", node_table(&graph.nodes));

            let mut edges = Table::new();
            edges.set_content_arrangement(ContentArrangement::Dynamic);
            edges.set_header(vec!["from", "label", "to"]);
            for edge in &graph.edges {
                edges.add_row(vec![edge.from.as_str(), edge.label.as_str(), edge.to.as_str()]);
            }
            println!("{}", edges);
            println!("{} node(s), {} edge(s)", graph.nodes.len(), graph.edges.len());
        }
    }

    Ok(())
}

async fn run_status(client: &RemoteClient, format: &OutputFormat) -> CliResult {
    let status = client.status().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Table => {
            println!("Status:  {}", status.status);
            println!("Version: {}", status.version);
        }
    }

    Ok(())
}

fn node_table(nodes: &[NodeView]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["id", "labels", "properties"]);

    for node in nodes {
        table.add_row(vec![
            node.id.clone(),
            node.labels.join(":"),
            format_properties(&node.properties),
        ]);
    }

    table
}

fn format_properties(properties: &serde_json::Map<String, serde_json::Value>) -> String {
    properties
        .iter()
        .map(|(k, v)| format!("{}={}", k, format_table_value(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_table_value(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            serde_json::to_string(v).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_properties() {
        let props = json!({ "age": 30, "name": "Alice", "tags": ["a", "b"] });
        let rendered = format_properties(props.as_object().unwrap());
        assert_eq!(rendered, r#"age=30, name=Alice, tags=["a","b"]"#);
    }
}
