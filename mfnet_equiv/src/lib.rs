//! Equivalence engine for microfluidic device netlists.
//!
//! Decides whether two devices are isomorphic as attributed directed
//! multigraphs: a VF2-style backtracking search over the channel graphs,
//! extended with a semantic feasibility predicate that compares component
//! layers, ports, parameters and edge endpoints. Structural search and
//! semantic policy are decoupled; the predicate is an injected strategy,
//! so the search is testable with any [`SemanticFeasibility`] impl.
//!
//! Mismatches found along the way are not errors; they accumulate in a
//! [`ComparisonReport`] for post-hoc diffing.

mod config;
mod feasibility;
mod graph_index;
mod matcher;
mod report;
mod state;

pub use config::CompareConfig;
pub use feasibility::{AlwaysFeasible, ComponentFeasibility, SemanticFeasibility};
pub use graph_index::{GraphIndex, Neighbor, NodeIdx};
pub use matcher::EquivalenceMatcher;
pub use report::ComparisonReport;
pub use state::Bindings;

/// Outcome of one device comparison.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    /// Whether a structure-preserving bijection satisfying the semantic
    /// predicate was found.
    pub is_match: bool,
    /// True when the search stopped because the step budget ran out, in
    /// which case `is_match` is pessimistically false.
    pub budget_exhausted: bool,
    /// Divergences recorded while the search examined candidate pairs.
    pub report: ComparisonReport,
}

impl Comparison {
    /// Whether the two devices are equivalent.
    pub fn is_match(&self) -> bool {
        self.is_match
    }

    /// The accumulated per-category diff.
    pub fn report(&self) -> &ComparisonReport {
        &self.report
    }
}
