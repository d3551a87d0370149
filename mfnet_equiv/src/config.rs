//! Configuration for the equivalence search.
//!
//! Topology, ports and layers always drive the verdict. Parameters and
//! edge-endpoint identities are opt-in stricter modes:
//! - `compare_params`: parameter mismatches normally only show up in the
//!   report; with this flag they also reject the candidate pair.
//! - `check_connection_target`: endpoint (component ID, port label)
//!   mismatches on corresponding edges normally only show up in the
//!   report; with this flag they reject. Note that endpoint IDs differ
//!   under renaming, so this flag makes the comparison name-sensitive.

/// Search configuration.
#[derive(Clone, Debug, Default)]
pub struct CompareConfig {
    /// Reject candidate pairs whose params differ.
    pub compare_params: bool,
    /// Reject candidate pairs whose corresponding edge endpoints differ.
    pub check_connection_target: bool,
    /// Upper bound on examined candidate pairs; `None` means unbounded.
    ///
    /// Subgraph isomorphism is exponential in the worst case, and symmetric
    /// device graphs can trigger pathological backtracking. A bounded
    /// search that exhausts its budget reports not-equivalent with
    /// `budget_exhausted` set.
    pub max_steps: Option<u64>,
}

impl CompareConfig {
    /// Creates a configuration with the two rejection flags.
    pub fn new(compare_params: bool, check_connection_target: bool) -> Self {
        Self {
            compare_params,
            check_connection_target,
            max_steps: None,
        }
    }

    /// Convenience: params also reject, endpoints stay advisory.
    pub fn with_params() -> Self {
        Self::new(true, false)
    }

    /// Convenience: every check rejects.
    pub fn strict() -> Self {
        Self::new(true, true)
    }

    /// Bounds the search to at most `steps` examined candidate pairs.
    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }
}
