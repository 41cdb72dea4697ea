//! Distant partner selection.
//!
//! Every non-empty cache group gets one "far" cache group that polls
//! its servers from a distance. The choice must be identical on every
//! cache in the fleet, so it depends only on the routing document:
//!
//! 1. Candidates are all other cache groups with a location and at least
//!    one edge server.
//! 2. Candidates nearer than the mean candidate distance are dropped.
//! 3. Of the rest, candidates smaller than their mean edge server count
//!    are dropped. This weeds out test and canary groups.
//! 4. The lexicographically first survivor wins.
//!
//! Step 2 keeps groups *at or beyond the mean*; it does not use a median.

use meshgen_core::{Location, RoutingDocument};
use tracing::debug;

use crate::error::{TopologyError, TopologyResult};
use crate::geo::distance_meters;
use crate::index::GroupMembers;

/// A cache group considered as a distant partner.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub name: &'a str,
    /// Distance from the selecting group, in meters.
    pub distance: f64,
    /// Number of edge servers in the group.
    pub size: usize,
}

/// Picks distant partners from one routing document.
pub struct RepresentativeSelector<'a> {
    doc: &'a RoutingDocument,
    members: &'a GroupMembers,
}

impl<'a> RepresentativeSelector<'a> {
    pub fn new(doc: &'a RoutingDocument, members: &'a GroupMembers) -> Self {
        Self { doc, members }
    }

    /// All partner candidates for `group` with their distances, in name order.
    pub fn candidates(&self, group: &str, origin: Location) -> Vec<Candidate<'a>> {
        let doc = self.doc;
        doc.edge_locations
            .iter()
            .filter(|(name, _)| name.as_str() != group)
            .filter_map(|(name, location)| {
                let size = self.members.size(name);
                (size > 0).then(|| Candidate {
                    name: name.as_str(),
                    distance: distance_meters(origin, *location),
                    size,
                })
            })
            .collect()
    }

    /// Select the distant partner for `group`.
    pub fn select(&self, group: &str) -> TopologyResult<String> {
        let origin = self
            .doc
            .location(group)
            .map_err(|_| TopologyError::no_candidate(group, "cache group has no location"))?;

        let candidates = self.candidates(group, origin);
        if candidates.is_empty() {
            return Err(TopologyError::no_candidate(
                group,
                "no other cache group has edge servers",
            ));
        }

        let mean_distance = mean(candidates.iter().map(|c| c.distance));
        let far: Vec<&Candidate<'a>> = candidates
            .iter()
            .filter(|c| c.distance >= mean_distance)
            .collect();
        if far.is_empty() {
            return Err(TopologyError::no_candidate(
                group,
                "no cache group at or beyond the mean distance",
            ));
        }

        let mean_size = mean(far.iter().map(|c| c.size as f64));
        let mut far_big: Vec<&str> = far
            .iter()
            .filter(|c| c.size as f64 >= mean_size)
            .map(|c| c.name)
            .collect();
        far_big.sort_unstable();

        let chosen = far_big.first().copied().ok_or_else(|| {
            TopologyError::no_candidate(group, "no distant cache group at or above the mean size")
        })?;

        debug!(
            group,
            candidates = candidates.len(),
            mean_distance,
            far = far.len(),
            mean_size,
            survivors = far_big.len(),
            partner = chosen,
            "selected distant partner"
        );

        Ok(chosen.to_string())
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
