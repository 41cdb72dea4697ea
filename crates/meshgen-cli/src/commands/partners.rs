//! `meshgen partners` — show the distant partner of every cache group.

use anyhow::Result;
use clap::ValueEnum;
use meshgen_topology::{GroupIndex, RepresentativeMap};

use super::{load_document, load_settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

pub fn partners(document: Option<&str>, format: Format, config: Option<&str>) -> Result<()> {
    let settings = load_settings(config)?;
    let doc = load_document(document, &settings)?;
    let index = GroupIndex::build(&doc)?;

    println!("{}", format_partners(index.partners(), format)?);
    Ok(())
}

fn format_partners(partners: &RepresentativeMap, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(partners)?),
        Format::Text => Ok(partners
            .iter()
            .map(|(group, partner)| format!("{group} -> {partner}"))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshgen_core::RoutingDocument;

    fn index() -> GroupIndex {
        let doc = RoutingDocument::from_json_str(
            r#"{
                "contentServers": {
                    "a1": { "cacheGroup": "a", "type": "EDGE" },
                    "b1": { "cacheGroup": "b", "type": "EDGE" }
                },
                "edgeLocations": {
                    "a": { "latitude": 0.0, "longitude": 0.0 },
                    "b": { "latitude": 10.0, "longitude": 10.0 }
                }
            }"#,
        )
        .unwrap();
        GroupIndex::build(&doc).unwrap()
    }

    #[test]
    fn test_text_format() {
        let text = format_partners(index().partners(), Format::Text).unwrap();
        assert_eq!(text, "a -> b\nb -> a");
    }

    #[test]
    fn test_json_format() {
        let json = format_partners(index().partners(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["a"], "b");
        assert_eq!(value["b"], "a");
    }
}
