//! meshgen health topology compiler.
//!
//! Given a routing document and the name of one "home" cache, this crate
//! computes every health-polling route that cache takes part in and
//! renders them as two coupled artifacts: forwarding (remap) rules and
//! routing (parent) rules. The compiler is a pure function of its input;
//! every cache in the fleet runs it independently and all of them agree
//! on the same global topology.
//!
//! # Components
//!
//! - **`geo`** — Great-circle distance between cache group locations
//! - **`selector`** — Distant partner selection for a cache group
//! - **`index`** — Per-run group membership and partner maps
//! - **`strategy`** — Self / same-group / other-group rule generation
//! - **`emitter`** — Ordered accumulation of rules into the two artifacts
//! - **`compile`** — The entry point tying the above together

pub mod compile;
pub mod emitter;
pub mod error;
pub mod geo;
pub mod index;
pub mod selector;
pub mod strategy;

pub use compile::compile;
pub use emitter::{CompiledConfig, ConfigEmitter};
pub use error::{TopologyError, TopologyResult};
pub use geo::{EARTH_RADIUS_METERS, distance_meters};
pub use index::{GroupIndex, GroupMembers, RepresentativeMap};
pub use selector::{Candidate, RepresentativeSelector};
pub use strategy::{Probe, Relationship, RouteContext, Rule, RuleSet};
