use std::fmt::Display;

use itertools::Itertools;
use mfnet_common::{Params, Port, Target};

/// Per-category divergences collected while the search examined candidate
/// node pairs, as (A-side, B-side) items in discovery order.
///
/// The lists accumulate across the whole search, so after a failed
/// comparison they describe every rejected pairing that was tried, ending
/// with the last examined mapping, rather than a globally minimal diff.
#[derive(Debug, Clone, Default)]
pub struct ComparisonReport {
    params: Vec<(Params, Params)>,
    layers: Vec<(Vec<String>, Vec<String>)>,
    ports: Vec<(Vec<Port>, Vec<Port>)>,
    in_edges: Vec<(Target, Target)>,
    out_edges: Vec<(Target, Target)>,
}

impl ComparisonReport {
    /// True if no divergence was recorded in any category.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
            && self.layers.is_empty()
            && self.ports.is_empty()
            && self.in_edges.is_empty()
            && self.out_edges.is_empty()
    }

    /// Parameter divergences.
    pub fn params_diff(&self) -> &[(Params, Params)] {
        &self.params
    }

    /// Layer-set divergences, as layer-ID lists.
    pub fn layers_diff(&self) -> &[(Vec<String>, Vec<String>)] {
        &self.layers
    }

    /// Port-collection divergences.
    pub fn ports_diff(&self) -> &[(Vec<Port>, Vec<Port>)] {
        &self.ports
    }

    /// Source-endpoint divergences of corresponding in-edges.
    pub fn in_edges_diff(&self) -> &[(Target, Target)] {
        &self.in_edges
    }

    /// Sink-endpoint divergences of corresponding in-edges.
    pub fn out_edges_diff(&self) -> &[(Target, Target)] {
        &self.out_edges
    }

    pub(crate) fn record_params(&mut self, a: Params, b: Params) {
        self.params.push((a, b));
    }

    pub(crate) fn record_layers(&mut self, a: Vec<String>, b: Vec<String>) {
        self.layers.push((a, b));
    }

    pub(crate) fn record_ports(&mut self, a: Vec<Port>, b: Vec<Port>) {
        self.ports.push((a, b));
    }

    pub(crate) fn record_in_edge(&mut self, a: Target, b: Target) {
        self.in_edges.push((a, b));
    }

    pub(crate) fn record_out_edge(&mut self, a: Target, b: Target) {
        self.out_edges.push((a, b));
    }
}

fn fmt_ports(ports: &[Port]) -> String {
    ports
        .iter()
        .map(|p| format!("{}@({},{})/{}", p.label, p.x, p.y, p.layer))
        .join(", ")
}

impl Display for ComparisonReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "---- Param differences ----")?;
        for (a, b) in &self.params {
            writeln!(f, "A: {a}, B: {b}")?;
        }
        writeln!(f, "---- Layer differences ----")?;
        for (a, b) in &self.layers {
            writeln!(f, "A: [{}], B: [{}]", a.join(", "), b.join(", "))?;
        }
        writeln!(f, "---- Port differences ----")?;
        for (a, b) in &self.ports {
            writeln!(f, "A: [{}], B: [{}]", fmt_ports(a), fmt_ports(b))?;
        }
        writeln!(f, "---- In edge differences ----")?;
        for (a, b) in &self.in_edges {
            writeln!(f, "A: {a}, B: {b}")?;
        }
        writeln!(f, "---- Out edge differences ----")?;
        for (a, b) in &self.out_edges {
            writeln!(f, "A: {a}, B: {b}")?;
        }
        Ok(())
    }
}
