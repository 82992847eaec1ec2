//! Domain Services
//!
//! Stateless logic over domain entities: dependency analysis and the rule
//! pass. No I/O.

mod dependency_graph;
mod rule_engine;

pub use dependency_graph::DependencyGraph;
pub use rule_engine::{RuleEngine, RuleOutcome};
