pub mod generate;
pub mod init;
pub mod partners;

use std::path::Path;

use anyhow::{Context, Result};
use meshgen_core::{MeshgenConfig, RoutingDocument};
use tracing::debug;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "meshgen.toml";

/// Load the settings file named on the command line, or the default one
/// if it exists. A missing default file means "no settings".
pub fn load_settings(explicit: Option<&str>) -> Result<MeshgenConfig> {
    match explicit {
        Some(path) => MeshgenConfig::from_file(Path::new(path))
            .with_context(|| format!("reading settings file {path}")),
        None => {
            let default = Path::new(DEFAULT_SETTINGS_FILE);
            if default.is_file() {
                debug!(path = DEFAULT_SETTINGS_FILE, "using default settings file");
                MeshgenConfig::from_file(default)
                    .with_context(|| format!("reading settings file {DEFAULT_SETTINGS_FILE}"))
            } else {
                Ok(MeshgenConfig::default())
            }
        }
    }
}

/// Read the routing document from the flag, falling back to `[document].path`.
pub fn load_document(flag: Option<&str>, settings: &MeshgenConfig) -> Result<RoutingDocument> {
    let path = flag
        .or(settings.document_path())
        .context("no routing document: pass --document or set [document].path in meshgen.toml")?;
    let doc = RoutingDocument::from_file(Path::new(path))?;
    debug!(
        path,
        servers = doc.content_servers.len(),
        locations = doc.edge_locations.len(),
        "loaded routing document"
    );
    Ok(doc)
}
