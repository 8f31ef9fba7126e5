//! Host-scene boundary
//!
//! The host scene graph is consumed through two small surfaces: read-only
//! geometry snapshots captured per invocation, and a collection-membership
//! store for applying grouping results.

mod collections;
mod snapshot;

pub use collections::{CollectionStore, CollectionTree};
pub use snapshot::{corners_from_bounds, ObjectKey, ObjectKind, ObjectSnapshot, SceneSnapshot};
