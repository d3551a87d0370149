//! The passive data classes of the device model.
//!
//! Entities never hold owning pointers to one another; every cross-reference
//! is an ID string resolved through the owning [`crate::Device`].

mod component;
mod connection;
mod feature;
mod layer;
mod params;
mod port;
mod target;

pub use component::Component;
pub use connection::{Connection, ConnectionPath};
pub use feature::Feature;
pub use layer::Layer;
pub use params::Params;
pub use port::Port;
pub use target::Target;
