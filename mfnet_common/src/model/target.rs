use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A (component ID, port label) endpoint reference.
///
/// Targets are weak references: they never own the component they name and
/// are resolved through the device on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// ID of the referenced component.
    pub component: String,
    /// Label of the referenced port on that component.
    pub port: String,
}

impl Target {
    /// Creates a new target reference.
    pub fn new(component: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            port: port.into(),
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -port: {}", self.component, self.port)
    }
}
