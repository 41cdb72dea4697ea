//! Health route strategies.
//!
//! For the home cache and one target edge cache, produce the "near" and
//! "far" rule pairs. Which probe goes straight to the target and which
//! goes through a group of parents depends on how the two are related:
//!
//! | Relationship | near                         | far                             |
//! |--------------|------------------------------|---------------------------------|
//! | self         | localhost health service     | localhost health service        |
//! | same group   | direct to target             | via home group's distant partner|
//! | other group  | via target's own group       | direct to target                |
//!
//! So for every pair of distinct caches exactly one probe ends at the
//! target itself and the other travels the normal parent fabric.

use meshgen_core::{RoutingDocument, ServerRef};

use crate::error::{TopologyError, TopologyResult};
use crate::index::GroupIndex;

/// Subdomain label shared by every health FQDN.
pub const HEALTH_SUBDOMAIN: &str = "health";

/// Weight given to every parent candidate.
pub const PARENT_WEIGHT: &str = "0.999";

/// Parent selection policy appended to every routing rule.
pub const PARENT_POLICY: &str = "round_robin=false qstring=ignore go_direct=false parent_is_proxy=false parent_retry=unavailable_server_retry unavailable_server_retry_responses=\"500\" max_unavailable_server_retries=1";

const HTTP_PORT: u16 = 80;

/// The two independent probe paths generated per server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Near,
    Far,
}

impl Probe {
    pub fn prefix(self) -> &'static str {
        match self {
            Probe::Near => "near",
            Probe::Far => "far",
        }
    }
}

/// How a target server relates to the home server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    SelfRoute,
    SameGroup,
    OtherGroup,
}

impl Relationship {
    pub fn classify(home: ServerRef<'_>, target: ServerRef<'_>) -> TopologyResult<Self> {
        if home.name == target.name {
            return Ok(Relationship::SelfRoute);
        }
        if home.cache_group()? == target.cache_group()? {
            Ok(Relationship::SameGroup)
        } else {
            Ok(Relationship::OtherGroup)
        }
    }
}

/// One generated rule. `comment` is only ever emitted in front of
/// `line`, and only when comments are on. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    pub comment: String,
    pub line: String,
}

/// A forwarding rule and the routing rule that backs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub forwarding: Rule,
    pub routing: Rule,
}

/// Everything rule generation needs for one compilation.
pub struct RouteContext<'a> {
    pub doc: &'a RoutingDocument,
    pub index: &'a GroupIndex,
    pub domain: &'a str,
    pub home: ServerRef<'a>,
    pub health_port: u16,
}

impl<'a> RouteContext<'a> {
    /// The near and far rule sets for `target`, in that order.
    pub fn route(&self, target: ServerRef<'_>) -> TopologyResult<[RuleSet; 2]> {
        let name = target.name;

        match Relationship::classify(self.home, target)? {
            Relationship::SelfRoute => Ok([
                self.self_rule(Probe::Near)
                    .map_err(|e| TopologyError::rule(name, "self near", e))?,
                self.self_rule(Probe::Far)
                    .map_err(|e| TopologyError::rule(name, "self far", e))?,
            ]),
            Relationship::SameGroup => {
                let partner = self.index.partners().partner(self.home.cache_group()?)?;
                Ok([
                    self.direct_rule(Probe::Near, target)
                        .map_err(|e| TopologyError::rule(name, "same cache group near", e))?,
                    self.via_rule(Probe::Far, target, partner)
                        .map_err(|e| TopologyError::rule(name, "same cache group far", e))?,
                ])
            }
            Relationship::OtherGroup => Ok([
                self.via_rule(Probe::Near, target, target.cache_group()?)
                    .map_err(|e| TopologyError::rule(name, "other cache group near", e))?,
                self.direct_rule(Probe::Far, target)
                    .map_err(|e| TopologyError::rule(name, "other cache group far", e))?,
            ]),
        }
    }

    /// Forward to the health service on this cache. Self probes end
    /// locally, so the routing side is left empty apart from its comment.
    fn self_rule(&self, probe: Probe) -> TopologyResult<RuleSet> {
        let fqdn = health_fqdn(probe, self.home.name, self.domain);
        let ip = self.home.ip()?;

        Ok(RuleSet {
            forwarding: Rule {
                comment: "# self remap to local astats service\n".to_string(),
                line: format!(
                    "map {} http://localhost:{}\n",
                    health_uri(&fqdn, self.home.server.port),
                    self.health_port
                ),
            },
            routing: Rule {
                comment: format!("\n# health: self\n# health: parent IP {ip} is self\n"),
                line: String::new(),
            },
        })
    }

    /// Forward straight to `target`, with `target` as the only parent.
    fn direct_rule(&self, probe: Probe, target: ServerRef<'_>) -> TopologyResult<RuleSet> {
        let fqdn = health_fqdn(probe, target.name, self.domain);
        let ip = target.ip()?;
        let port = target.port()?;

        let target_group = target.cache_group()?;
        let reason_group = if target_group == self.home.cache_group()? {
            "the same cachegroup as this server".to_string()
        } else {
            format!("cachegroup {target_group}")
        };

        Ok(RuleSet {
            forwarding: Rule {
                comment: format!(
                    "# map from {fqdn} on this server's port, to the same domain on the target's port, with via servers in parent.config\n"
                ),
                line: map_line(&fqdn, self.home.server.port, target.server.port),
            },
            routing: Rule {
                comment: format!(
                    "\n# health: direct to {name} in {reason_group} for '{probe}' health\n# health: parent IP {ip} is {name}, the server we're mapping to\n",
                    name = target.name,
                    probe = probe.prefix(),
                ),
                line: routing_line(&fqdn, port, &[format!("{ip}:{port}")]),
            },
        })
    }

    /// Forward to `target` through every edge server of `via_group`.
    fn via_rule(
        &self,
        probe: Probe,
        target: ServerRef<'_>,
        via_group: &str,
    ) -> TopologyResult<RuleSet> {
        let fqdn = health_fqdn(probe, target.name, self.domain);
        target.ip()?;
        let port = target.port_or_default();

        let members = self.index.members().members(via_group);
        if members.is_empty() {
            return Err(TopologyError::EmptyGroup(via_group.to_string()));
        }

        let mut parents = Vec::with_capacity(members.len());
        let mut parent_comments = String::new();
        for name in members {
            let parent = self.doc.server(name)?;
            let endpoint = parent.endpoint()?;
            parent_comments.push_str(&format!(
                "# health: parent IP {} is {} in {via_group}\n",
                parent.ip()?,
                parent.name
            ));
            parents.push(endpoint);
        }

        let relation = if target.cache_group()? == self.home.cache_group()? {
            "the same cachegroup as"
        } else {
            "a different cachegroup than"
        };

        Ok(RuleSet {
            forwarding: Rule {
                comment: format!(
                    "# map from {fqdn} on this server's port, to the same domain on the target's port\n"
                ),
                line: map_line(&fqdn, self.home.server.port, target.server.port),
            },
            routing: Rule {
                comment: format!(
                    "\n# health: {name} via {via_group} in {relation} this server, for '{probe}' health\n{parent_comments}",
                    name = target.name,
                    probe = probe.prefix(),
                ),
                line: routing_line(&fqdn, port, &parents),
            },
        })
    }
}

/// `<probe>.health.<server>.<domain>`
pub fn health_fqdn(probe: Probe, server: &str, domain: &str) -> String {
    format!("{}.{HEALTH_SUBDOMAIN}.{server}.{domain}", probe.prefix())
}

/// `http://<fqdn>[:port]/`, leaving the port off when it is 80 or unknown.
pub fn health_uri(fqdn: &str, port: Option<u16>) -> String {
    match port {
        Some(port) if port != HTTP_PORT => format!("http://{fqdn}:{port}/"),
        _ => format!("http://{fqdn}/"),
    }
}

fn map_line(fqdn: &str, from_port: Option<u16>, to_port: Option<u16>) -> String {
    format!(
        "map {} {}\n",
        health_uri(fqdn, from_port),
        health_uri(fqdn, to_port)
    )
}

/// A routing rule for `fqdn` with each of `endpoints` as an equally
/// weighted parent.
pub fn routing_line(fqdn: &str, port: u16, endpoints: &[String]) -> String {
    let parents = endpoints
        .iter()
        .map(|endpoint| format!("{endpoint}|{PARENT_WEIGHT}"))
        .collect::<Vec<_>>()
        .join(";");
    format!("dest_domain={fqdn} port={port} parent=\"{parents}\" {PARENT_POLICY}\n")
}
