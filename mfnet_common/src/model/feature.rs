use crate::model::Params;

/// An atomic manufacturable geometric artifact.
///
/// Features are immutable once built and always belong to a layer of the
/// same device. Connection paths may reference them by ID for decorative
/// geometry (breaks, tapers, patterns).
#[derive(Debug, Clone)]
pub struct Feature {
    /// Unique ID within the device.
    pub id: String,
    /// Geometric operation, e.g. `"UNION"`.
    pub feature_type: String,
    /// Manufacturing algorithm key.
    pub macro_name: String,
    /// ID of the owning layer.
    pub layer: String,
    /// Attribute bag.
    pub params: Params,
}

impl Feature {
    /// Creates a new feature.
    pub fn new(
        id: impl Into<String>,
        feature_type: impl Into<String>,
        macro_name: impl Into<String>,
        layer: impl Into<String>,
        params: Params,
    ) -> Self {
        Self {
            id: id.into(),
            feature_type: feature_type.into(),
            macro_name: macro_name.into(),
            layer: layer.into(),
            params,
        }
    }
}
