//! STAC record generation: the serde object model, the fixed metadata tables,
//! and the collection/item builders.
pub mod collection;
pub mod constants;
pub mod item;
pub mod model;

pub use collection::create_collection;
pub use item::{ItemOptions, ValidationError, derive};
pub use model::{Asset, Link, Provider, StacCollection, StacItem};
