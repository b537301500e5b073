//! The map document as seen by the edit history.
//!
//! ## Module Structure
//!
//! - [`ids`] - Stable identifiers for layers, shapes and graphics
//! - [`geometry`] - Geometry values and extents
//! - [`data_types`] - Attribute rows, graphics and captured shape snapshots
//! - [`mutator`] - `DocumentMutator` / `DocumentQuery` capability traits
//! - [`memory`] - `MapDocument`, the in-memory reference document

mod data_types;
mod error;
mod geometry;
mod ids;
mod memory;
mod mutator;

#[cfg(test)]
mod tests;

pub use data_types::{
    AttributeRow, AttributeValue, Graphic, GraphicSnapshot, GraphicStyle, ShapeSnapshot,
};
pub use error::{MutationError, MutationResult};
pub use geometry::{Extent, Geometry, PolygonPart};
pub use ids::{EditTarget, GraphicId, LayerId, ShapeId, ShapeRef};
pub use memory::{MapDocument, MapLayer, StoredShape};
pub use mutator::{DocumentMutator, DocumentQuery};
