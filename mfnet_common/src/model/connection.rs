use crate::error::NetlistError;
use crate::model::{Params, Target};

/// Geometric routing of one source/sink pair of a connection: ordered
/// waypoints plus optional decorative feature references.
///
/// Endpoints are optional because version 1.0 documents carry bare
/// `waypoints` arrays with no endpoint information.
#[derive(Debug, Clone, Default)]
pub struct ConnectionPath {
    /// Source target the path starts at, when known.
    pub source: Option<Target>,
    /// Sink target the path ends at, when known.
    pub sink: Option<Target>,
    /// Ordered route coordinates.
    pub waypoints: Vec<(i64, i64)>,
    /// IDs of features decorating the path.
    pub features: Vec<String>,
}

impl ConnectionPath {
    /// Creates a new path.
    pub fn new(
        source: Option<Target>,
        sink: Option<Target>,
        waypoints: Vec<(i64, i64)>,
        features: Vec<String>,
    ) -> Self {
        Self {
            source,
            sink,
            waypoints,
            features,
        }
    }

    /// Appends a waypoint.
    pub fn add_waypoint(&mut self, x: i64, y: i64) {
        self.waypoints.push((x, y));
    }
}

/// A channel linking one source port to one or more sink ports.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Unique ID within the device.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Functional category, e.g. `"CHANNEL"`.
    pub entity: String,
    /// Source endpoint. A sink-carrying connection without one cannot enter
    /// the channel graph.
    pub source: Option<Target>,
    /// Sink endpoints; each produces one graph edge (fan-out).
    pub sinks: Vec<Target>,
    /// ID of the layer the channel is drawn on, if any.
    pub layer: Option<String>,
    /// Attribute bag.
    pub params: Params,
    /// Geometric routing records.
    pub paths: Vec<ConnectionPath>,
}

impl Connection {
    /// Creates a new connection.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        entity: impl Into<String>,
        source: Option<Target>,
        sinks: Vec<Target>,
        layer: Option<String>,
        params: Params,
        paths: Vec<ConnectionPath>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity: entity.into(),
            source,
            sinks,
            layer,
            params,
            paths,
        }
    }

    /// All endpoint targets: the source (when set) followed by every sink.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.source.iter().chain(self.sinks.iter())
    }

    /// Adds a routing path after validating that both endpoints, when
    /// present, are targets of this connection.
    ///
    /// # Errors
    /// [`NetlistError::PathEndpointMismatch`] for a stray endpoint.
    pub fn add_path(&mut self, path: ConnectionPath) -> Result<(), NetlistError> {
        for endpoint in [&path.source, &path.sink].into_iter().flatten() {
            if !self.targets().any(|t| t == endpoint) {
                return Err(NetlistError::PathEndpointMismatch {
                    connection: self.id.clone(),
                    component: endpoint.component.clone(),
                    port: endpoint.port.clone(),
                });
            }
        }
        self.paths.push(path);
        Ok(())
    }

    /// Convenience for building a path out of bare waypoints.
    pub fn add_waypoints_path(
        &mut self,
        source: Option<Target>,
        sink: Option<Target>,
        waypoints: Vec<(i64, i64)>,
    ) {
        self.paths
            .push(ConnectionPath::new(source, sink, waypoints, Vec::new()));
    }
}

// Identity is the ID alone.
impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}
