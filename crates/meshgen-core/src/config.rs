//! meshgen.toml settings parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default for whether generated rules carry explanatory comments.
pub const DEFAULT_COMMENTS: bool = true;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshgenConfig {
    pub health: Option<HealthSettings>,
    pub document: Option<DocumentSettings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthSettings {
    /// Port of the local health (astats) service each cache runs.
    pub port: Option<u16>,
    pub comments: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSettings {
    /// Path to the routing document snapshot.
    pub path: Option<String>,
}

impl MeshgenConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MeshgenConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn health_port(&self) -> Option<u16> {
        self.health.as_ref().and_then(|h| h.port)
    }

    pub fn comments(&self) -> Option<bool> {
        self.health.as_ref().and_then(|h| h.comments)
    }

    pub fn document_path(&self) -> Option<&str> {
        self.document.as_ref().and_then(|d| d.path.as_deref())
    }

    /// Scaffold a starter meshgen.toml.
    pub fn scaffold(health_port: u16, document_path: &str) -> Self {
        MeshgenConfig {
            health: Some(HealthSettings {
                port: Some(health_port),
                comments: Some(DEFAULT_COMMENTS),
            }),
            document: Some(DocumentSettings {
                path: Some(document_path.to_string()),
            }),
        }
    }
}
