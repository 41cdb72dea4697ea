pub mod config;
pub mod document;
pub mod error;

pub use config::MeshgenConfig;
pub use document::{EDGE_TYPE, Location, RoutingDocument, Server, ServerRef, ServerRole};
pub use error::{DocumentError, DocumentResult};
