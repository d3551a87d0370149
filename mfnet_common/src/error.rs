use std::fmt::Display;

use thiserror::Error;

/// The kind of device-owned entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A placed component.
    Component,
    /// A channel connection.
    Connection,
    /// A fabrication layer.
    Layer,
    /// A manufacturable feature.
    Feature,
    /// A component port.
    Port,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Component => write!(f, "component"),
            EntityKind::Connection => write!(f, "connection"),
            EntityKind::Layer => write!(f, "layer"),
            EntityKind::Feature => write!(f, "feature"),
            EntityKind::Port => write!(f, "port"),
        }
    }
}

/// Errors raised by device construction and mutation.
///
/// Lookup and integrity failures are always fatal to the calling operation;
/// none of them are used to signal comparison mismatches, which are data.
#[derive(Error, Clone, Debug)]
pub enum NetlistError {
    /// Lookup of an ID that does not exist in the device.
    #[error("{kind} {id:?} not found in device")]
    NotFound {
        /// Entity kind of the failed lookup.
        kind: EntityKind,
        /// The ID that failed to resolve.
        id: String,
    },

    /// An entity with the same ID already exists in the device.
    #[error("{kind} {id:?} already exists in device")]
    DuplicateId {
        /// Entity kind of the rejected insert.
        kind: EntityKind,
        /// The duplicated ID.
        id: String,
    },

    /// An entity being added references an ID absent from the device.
    ///
    /// Raised before any collection or graph mutation takes place, so the
    /// rejected operation leaves the device untouched.
    #[error("{referrer} references missing {kind} {id:?}")]
    MissingReference {
        /// Description of the referring entity, e.g. `connection "c1"`.
        referrer: String,
        /// Entity kind of the dangling reference.
        kind: EntityKind,
        /// The unresolved ID.
        id: String,
    },

    /// A connection without a source target cannot enter the channel graph.
    #[error("connection {0:?} has no source target")]
    MissingSource(String),

    /// Removal rejected because the entity is still referenced elsewhere.
    #[error("{kind} {id:?} is still referenced by {referrer}")]
    StillReferenced {
        /// Entity kind of the rejected removal.
        kind: EntityKind,
        /// ID of the entity that cannot be removed.
        id: String,
        /// Description of the surviving referrer.
        referrer: String,
    },

    /// A valve operation on a component that is not mapped as a valve.
    #[error("component {0:?} is not mapped as a valve")]
    NotAValve(String),

    /// A path endpoint that is not one of the owning connection's targets.
    #[error("path endpoint {component:?}/{port:?} is not a target of connection {connection:?}")]
    PathEndpointMismatch {
        /// The owning connection.
        connection: String,
        /// Component ID of the offending endpoint.
        component: String,
        /// Port label of the offending endpoint.
        port: String,
    },
}
