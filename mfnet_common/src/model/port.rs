use serde::{Deserialize, Serialize};

/// A connection point on a component.
///
/// The label is unique within the owning component; `x`/`y` are offsets
/// relative to the component origin, and `layer` names the fabrication
/// stratum the port sits on. Two ports are equal when label, offset and
/// layer all agree; this is the comparison the equivalence matcher
/// applies to whole port collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    /// Offset from the component origin along x.
    pub x: i64,
    /// Offset from the component origin along y.
    pub y: i64,
    /// Label, unique within the component.
    pub label: String,
    /// ID of the layer the port sits on.
    pub layer: String,
}

impl Port {
    /// Creates a new port.
    pub fn new(label: impl Into<String>, x: i64, y: i64, layer: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: label.into(),
            layer: layer.into(),
        }
    }
}
