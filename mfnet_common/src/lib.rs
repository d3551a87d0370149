//! Common types for the mfnet workspace: the microfluidic device model and
//! the versioned JSON interchange.
//!
//! A [`Device`] owns its components, connections, layers and features in
//! order-preserving arenas keyed by ID, and keeps a directed multigraph of
//! the channel network in lock-step with every mutation. Cross-references
//! between entities are plain ID strings resolved through the device.

mod error;
mod model;

pub mod device;
pub mod interchange;

pub use crate::device::{Device, DeviceGraph, ValveType};
pub use crate::error::{EntityKind, NetlistError};
pub use crate::model::{
    Component, Connection, ConnectionPath, Feature, Layer, Params, Port, Target,
};
