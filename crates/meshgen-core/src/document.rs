//! CDN routing document model.
//!
//! The document is a snapshot of the content-routing configuration:
//! the CDN domain, every cache server with its cache group, and the
//! coordinates of every edge cache group. Servers and locations are kept
//! in ordered maps so that every walk over them is by name.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, DocumentResult};

/// Server `type` value that marks an edge cache.
pub const EDGE_TYPE: &str = "EDGE";

/// Port assumed when a server does not carry one.
pub const DEFAULT_PORT: u16 = 80;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDocument {
    /// Free-form CDN settings. Only `domain_name` is read.
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub content_servers: BTreeMap<String, Server>,
    #[serde(default)]
    pub edge_locations: BTreeMap<String, Location>,
}

/// A cache server as it appears in the document. Every field is optional
/// on the wire; callers ask for what they need through [`ServerRef`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub cache_group: Option<String>,
    #[serde(rename = "type")]
    pub server_type: Option<String>,
    pub ip: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerRole {
    Edge,
    Other,
}

impl Server {
    pub fn role(&self) -> ServerRole {
        match self.server_type.as_deref() {
            Some(EDGE_TYPE) => ServerRole::Edge,
            _ => ServerRole::Other,
        }
    }

    pub fn is_edge(&self) -> bool {
        self.role() == ServerRole::Edge
    }
}

/// A named view of a [`Server`], so missing-field errors can say which
/// server was at fault.
#[derive(Debug, Clone, Copy)]
pub struct ServerRef<'a> {
    pub name: &'a str,
    pub server: &'a Server,
}

impl<'a> ServerRef<'a> {
    pub fn cache_group(&self) -> DocumentResult<&'a str> {
        self.server
            .cache_group
            .as_deref()
            .ok_or_else(|| DocumentError::MissingCacheGroup(self.name.to_string()))
    }

    pub fn ip(&self) -> DocumentResult<&'a str> {
        self.server
            .ip
            .as_deref()
            .ok_or_else(|| DocumentError::MissingIp(self.name.to_string()))
    }

    pub fn port(&self) -> DocumentResult<u16> {
        self.server
            .port
            .ok_or_else(|| DocumentError::MissingPort(self.name.to_string()))
    }

    /// The server's port, or [`DEFAULT_PORT`] when the document has none.
    pub fn port_or_default(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    /// `ip:port`, requiring both.
    pub fn endpoint(&self) -> DocumentResult<String> {
        Ok(format!("{}:{}", self.ip()?, self.port()?))
    }

    pub fn is_edge(&self) -> bool {
        self.server.is_edge()
    }
}

impl RoutingDocument {
    pub fn from_json_str(content: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> DocumentResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// The CDN domain every health FQDN is built under.
    pub fn domain_name(&self) -> DocumentResult<&str> {
        match self.config.get("domain_name") {
            None => Err(DocumentError::MissingDomain),
            Some(serde_json::Value::String(domain)) => Ok(domain.as_str()),
            Some(_) => Err(DocumentError::InvalidDomain),
        }
    }

    pub fn server(&self, name: &str) -> DocumentResult<ServerRef<'_>> {
        self.content_servers
            .get_key_value(name)
            .map(|(name, server)| ServerRef { name, server })
            .ok_or_else(|| DocumentError::ServerNotFound(name.to_string()))
    }

    /// Edge servers in name order.
    pub fn edge_servers(&self) -> impl Iterator<Item = ServerRef<'_>> {
        self.content_servers
            .iter()
            .filter(|(_, server)| server.is_edge())
            .map(|(name, server)| ServerRef { name, server })
    }

    pub fn location(&self, cache_group: &str) -> DocumentResult<Location> {
        self.edge_locations
            .get(cache_group)
            .copied()
            .ok_or_else(|| DocumentError::MissingLocation(cache_group.to_string()))
    }
}
