//! The compilation entry point.

use meshgen_core::RoutingDocument;
use tracing::info;

use crate::emitter::{CompiledConfig, ConfigEmitter};
use crate::error::{TopologyError, TopologyResult};
use crate::index::GroupIndex;
use crate::strategy::RouteContext;

/// Compile the health remap and parent rules for the cache `home`.
///
/// `health_port` is the port of the local health service on every cache.
/// Output is byte-identical for the same document and arguments. All
/// state lives in this call, so it is safe to run concurrently.
pub fn compile(
    doc: &RoutingDocument,
    home: &str,
    health_port: u16,
    comments: bool,
) -> TopologyResult<CompiledConfig> {
    if health_port == 0 {
        return Err(TopologyError::InvalidHealthPort);
    }

    let domain = doc.domain_name()?;
    let home = doc.server(home)?;
    home.cache_group()?;

    let index = GroupIndex::build(doc)?;
    let ctx = RouteContext {
        doc,
        index: &index,
        domain,
        home,
        health_port,
    };

    let mut emitter = ConfigEmitter::new(comments);
    emitter.partner_preamble(index.partners());

    let mut targets = 0;
    for target in doc.edge_servers() {
        for rules in ctx.route(target)? {
            emitter.push(rules);
        }
        targets += 1;
    }

    info!(
        home = home.name,
        targets,
        groups = index.members().len(),
        forwarding_rules = emitter.forwarding_rules(),
        routing_rules = emitter.routing_rules(),
        "compiled health config"
    );

    Ok(emitter.finish())
}
