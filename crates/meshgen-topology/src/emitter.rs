//! Rule accumulation into the two output artifacts.

use crate::index::RepresentativeMap;
use crate::strategy::{Rule, RuleSet};

/// The two artifacts of one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledConfig {
    /// Forwarding rules (remap.config lines).
    pub forwarding: String,
    /// Routing rules (parent.config lines).
    pub routing: String,
}

/// Appends rule sets in call order. Comments, when enabled, are written
/// in front of the rule they describe and never alter the rule line.
#[derive(Debug, Default)]
pub struct ConfigEmitter {
    comments: bool,
    forwarding: String,
    routing: String,
    forwarding_rules: usize,
    routing_rules: usize,
}

impl ConfigEmitter {
    pub fn new(comments: bool) -> Self {
        Self {
            comments,
            ..Default::default()
        }
    }

    /// Record each group's distant partner at the top of the routing
    /// artifact. A no-op without comments.
    pub fn partner_preamble(&mut self, partners: &RepresentativeMap) {
        if !self.comments {
            return;
        }
        for (group, partner) in partners.iter() {
            self.routing
                .push_str(&format!("# Far cachegroup for '{group}' is '{partner}'\n"));
        }
    }

    pub fn push(&mut self, rules: RuleSet) {
        if write_rule(&mut self.forwarding, rules.forwarding, self.comments) {
            self.forwarding_rules += 1;
        }
        if write_rule(&mut self.routing, rules.routing, self.comments) {
            self.routing_rules += 1;
        }
    }

    pub fn forwarding_rules(&self) -> usize {
        self.forwarding_rules
    }

    pub fn routing_rules(&self) -> usize {
        self.routing_rules
    }

    pub fn finish(self) -> CompiledConfig {
        CompiledConfig {
            forwarding: self.forwarding,
            routing: self.routing,
        }
    }
}

/// Returns whether a rule line (not just a comment) was written.
fn write_rule(out: &mut String, rule: Rule, comments: bool) -> bool {
    if comments {
        out.push_str(&rule.comment);
    }
    out.push_str(&rule.line);
    !rule.line.is_empty()
}
