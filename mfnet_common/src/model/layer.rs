use crate::model::Params;

/// A fabrication stratum, e.g. a flow or control layer.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Unique ID within the device.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Layer type, e.g. `"FLOW"` or `"CONTROL"`.
    pub layer_type: String,
    /// Grouping key for multi-layer stacks.
    pub group: String,
    /// Attribute bag.
    pub params: Params,
}

impl Layer {
    /// Creates a new layer.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        layer_type: impl Into<String>,
        group: impl Into<String>,
        params: Params,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layer_type: layer_type.into(),
            group: group.into(),
            params,
        }
    }
}

// Identity is the ID alone; two layers with the same ID are the same
// stratum regardless of their attributes.
impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Layer {}

impl std::hash::Hash for Layer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
