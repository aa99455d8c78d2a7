//! HTTP surface
//!
//! - `GET /graph?op=labels|full|byLabel|search|expand&label=&query=&nodeId=`
//! - `GET /api/graph?action=...` (same parameters)
//! - `GET /api/graph/{op}` and `GET /api/graph/{op}/{arg}`
//! - `GET /api/status`

pub mod handler;
pub mod server;

pub use handler::{error_response, AppState, GraphQuery};
pub use server::{HttpConfig, HttpServer};
