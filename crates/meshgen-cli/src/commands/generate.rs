//! `meshgen generate` — health remap / parent config for one cache.

use anyhow::{Context, Result};
use clap::ValueEnum;
use meshgen_core::config::DEFAULT_COMMENTS;
use meshgen_topology::{CompiledConfig, compile};

use super::{load_document, load_settings};

/// Which of the two coupled artifacts to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Artifact {
    /// Forwarding rules (remap.config)
    Remap,
    /// Routing rules (parent.config)
    Parent,
}

impl Artifact {
    pub fn select(self, compiled: &CompiledConfig) -> &str {
        match self {
            Artifact::Remap => compiled.forwarding.as_str(),
            Artifact::Parent => compiled.routing.as_str(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub host: String,
    pub document: Option<String>,
    pub artifact: Artifact,
    pub health_port: Option<u16>,
    pub comments: Option<bool>,
    pub config: Option<String>,
}

/// Run the `meshgen generate` command.
pub fn generate(opts: &GenerateOptions) -> Result<()> {
    let text = render(opts)?;
    println!("{text}");
    Ok(())
}

/// Resolve settings, compile, and return the requested artifact.
fn render(opts: &GenerateOptions) -> Result<String> {
    let settings = load_settings(opts.config.as_deref())?;

    let health_port = opts
        .health_port
        .or(settings.health_port())
        .context("no health port: pass --health-port or set [health].port in meshgen.toml")?;
    let comments = opts
        .comments
        .or(settings.comments())
        .unwrap_or(DEFAULT_COMMENTS);

    let doc = load_document(opts.document.as_deref(), &settings)?;
    let compiled = compile(&doc, &opts.host, health_port, comments)
        .with_context(|| format!("generating health config for '{}'", opts.host))?;

    Ok(opts.artifact.select(&compiled).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DOC: &str = r#"{
        "config": { "domain_name": "example.com" },
        "contentServers": {
            "edge1": { "cacheGroup": "cg1", "type": "EDGE", "ip": "1.1.1.1", "port": 80 },
            "edge2": { "cacheGroup": "cg2", "type": "EDGE", "ip": "2.2.2.2", "port": 80 }
        },
        "edgeLocations": {
            "cg1": { "latitude": 39.74, "longitude": -104.99 },
            "cg2": { "latitude": 51.51, "longitude": -0.13 }
        }
    }"#;

    fn options(dir: &std::path::Path, artifact: Artifact) -> GenerateOptions {
        let doc = dir.join("crconfig.json");
        fs::write(&doc, DOC).unwrap();
        GenerateOptions {
            host: "edge1".to_string(),
            document: Some(doc.to_string_lossy().into_owned()),
            artifact,
            health_port: Some(8083),
            comments: Some(false),
            config: Some(dir.join("absent.toml").to_string_lossy().into_owned()),
        }
    }

    #[test]
    fn test_remap_from_flags() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path(), Artifact::Remap);
        fs::write(dir.path().join("meshgen.toml"), "").unwrap();
        opts.config = Some(dir.path().join("meshgen.toml").to_string_lossy().into_owned());

        let text = render(&opts).unwrap();
        assert!(text.starts_with("map http://near.health.edge1.example.com/ http://localhost:8083\n"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_settings_fill_missing_flags() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path(), Artifact::Parent);
        let settings = dir.path().join("meshgen.toml");
        fs::write(
            &settings,
            format!(
                "[health]\nport = 9000\ncomments = true\n\n[document]\npath = {:?}\n",
                dir.path().join("crconfig.json").to_string_lossy()
            ),
        )
        .unwrap();
        opts.config = Some(settings.to_string_lossy().into_owned());
        opts.document = None;
        opts.health_port = None;
        opts.comments = None;

        let text = render(&opts).unwrap();
        assert!(text.starts_with("# Far cachegroup for 'cg1' is 'cg2'\n"));
        assert!(text.contains("parent=\"2.2.2.2:80|0.999\""));
    }

    #[test]
    fn test_flags_override_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path(), Artifact::Remap);
        let settings = dir.path().join("meshgen.toml");
        fs::write(&settings, "[health]\nport = 9000\ncomments = true\n").unwrap();
        opts.config = Some(settings.to_string_lossy().into_owned());

        let text = render(&opts).unwrap();
        assert!(text.contains("http://localhost:8083"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_missing_explicit_settings_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), Artifact::Remap);
        let err = render(&opts).unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
    }

    #[test]
    fn test_unknown_host_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path(), Artifact::Remap);
        fs::write(dir.path().join("meshgen.toml"), "").unwrap();
        opts.config = Some(dir.path().join("meshgen.toml").to_string_lossy().into_owned());
        opts.host = "edge9".to_string();

        let err = render(&opts).unwrap_err();
        assert!(format!("{err:#}").contains("server 'edge9' not in routing document"));
    }
}
