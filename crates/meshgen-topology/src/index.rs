//! Per-compilation cache group indices.
//!
//! Built once from the routing document and thrown away with the run:
//! - [`GroupMembers`]: cache group → edge servers, in name order
//! - [`RepresentativeMap`]: cache group → distant partner group

use std::collections::BTreeMap;

use meshgen_core::{RoutingDocument, ServerRef};
use serde::Serialize;
use tracing::debug;

use crate::error::{TopologyError, TopologyResult};
use crate::selector::RepresentativeSelector;

/// Edge servers of every cache group that has at least one.
#[derive(Debug, Clone, Default)]
pub struct GroupMembers {
    groups: BTreeMap<String, Vec<String>>,
}

impl GroupMembers {
    pub fn build(doc: &RoutingDocument) -> TopologyResult<Self> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, server) in &doc.content_servers {
            if !server.is_edge() {
                debug!(server = %name, "skipping non-edge server");
                continue;
            }
            let group = ServerRef { name, server }.cache_group()?;
            // Servers are walked in name order, so member lists come out sorted.
            groups.entry(group.to_string()).or_default().push(name.clone());
        }
        Ok(Self { groups })
    }

    /// Members of `group`; empty when the group has no edge servers.
    pub fn members(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn size(&self, group: &str) -> usize {
        self.members(group).len()
    }

    /// Non-empty cache groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Every non-empty cache group mapped to exactly one other cache group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RepresentativeMap {
    partners: BTreeMap<String, String>,
}

impl RepresentativeMap {
    pub fn get(&self, group: &str) -> Option<&str> {
        self.partners.get(group).map(String::as_str)
    }

    /// Partner of `group`, or [`TopologyError::MissingPartner`].
    pub fn partner(&self, group: &str) -> TopologyResult<&str> {
        self.get(group)
            .ok_or_else(|| TopologyError::MissingPartner(group.to_string()))
    }

    /// `(group, partner)` pairs in group name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.partners.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

/// Membership plus distant partners for one compilation.
#[derive(Debug, Clone)]
pub struct GroupIndex {
    members: GroupMembers,
    partners: RepresentativeMap,
}

impl GroupIndex {
    /// Index the document and select a distant partner for every
    /// non-empty cache group. Fails on the first group with no partner.
    pub fn build(doc: &RoutingDocument) -> TopologyResult<Self> {
        let members = GroupMembers::build(doc)?;
        let selector = RepresentativeSelector::new(doc, &members);

        let mut partners = BTreeMap::new();
        for group in members.groups() {
            let partner = selector.select(group)?;
            partners.insert(group.to_string(), partner);
        }

        let partners = RepresentativeMap { partners };
        Ok(Self { members, partners })
    }

    pub fn members(&self) -> &GroupMembers {
        &self.members
    }

    pub fn partners(&self) -> &RepresentativeMap {
        &self.partners
    }
}
