use crate::error::{EntityKind, NetlistError};
use crate::model::{Params, Port};

/// A placed functional or geometric unit on the device.
#[derive(Debug, Clone)]
pub struct Component {
    /// Unique ID within the device.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Functional category, e.g. `"MIXER"` or `"VALVE"`.
    pub entity: String,
    /// Geometric extent along x.
    pub xspan: i64,
    /// Geometric extent along y.
    pub yspan: i64,
    /// Connection points, labels unique within the component.
    pub ports: Vec<Port>,
    /// IDs of the layers the component spans.
    pub layers: Vec<String>,
    /// Attribute bag; the `"position"` entry holds the placement.
    pub params: Params,
}

impl Component {
    /// Creates a new component.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        entity: impl Into<String>,
        xspan: i64,
        yspan: i64,
        ports: Vec<Port>,
        layers: Vec<String>,
        params: Params,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity: entity.into(),
            xspan,
            yspan,
            ports,
            layers,
            params,
        }
    }

    /// Placement read from the `"position"` param, if set.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.params.get_point("position")
    }

    /// X coordinate of the placement.
    pub fn xpos(&self) -> Option<f64> {
        self.position().map(|(x, _)| x)
    }

    /// Y coordinate of the placement.
    pub fn ypos(&self) -> Option<f64> {
        self.position().map(|(_, y)| y)
    }

    /// Writes the placement into the `"position"` param.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.params.set("position", serde_json::json!([x, y]));
    }

    /// Appends ports to the component.
    pub fn add_ports(&mut self, ports: impl IntoIterator<Item = Port>) {
        self.ports.extend(ports);
    }

    /// Looks up a port by its label.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] if no port carries the label.
    pub fn get_port(&self, label: &str) -> Result<&Port, NetlistError> {
        self.ports
            .iter()
            .find(|p| p.label == label)
            .ok_or_else(|| NetlistError::NotFound {
                kind: EntityKind::Port,
                id: format!("{}/{}", self.id, label),
            })
    }

    /// Absolute coordinates of a port, i.e. placement plus port offset.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] if the label is unknown or the component
    /// has no placement.
    pub fn absolute_port_coordinates(&self, label: &str) -> Result<(f64, f64), NetlistError> {
        let port = self.get_port(label)?;
        let (x, y) = self.position().ok_or_else(|| NetlistError::NotFound {
            kind: EntityKind::Component,
            id: format!("{} (no position param)", self.id),
        })?;
        Ok((x + port.x as f64, y + port.y as f64))
    }
}

// Identity is the ID alone.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Component {}

impl std::hash::Hash for Component {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
