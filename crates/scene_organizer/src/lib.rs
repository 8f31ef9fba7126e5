//! # Scene Organizer
//!
//! Scene-organization core for interactive 3D content tools: approximate
//! spatial overlap detection, duplicate/LOD grouping, and collection filing.
//!
//! ## Features
//!
//! - **Overlap Grouping**: Multi-stage approximate matching (origin, bounds,
//!   vertex sampling) with tunable tolerances
//! - **Representative Selection**: Keep the highest- or lowest-detail member
//!   of each overlap group active
//! - **Collection Filing**: Idempotent relocation of grouped objects into
//!   named destination collections
//! - **Host Agnostic**: The host scene is consumed through lightweight
//!   snapshots and a small collection-store boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_organizer::prelude::*;
//!
//! let mut scene = SceneSnapshot::new();
//! // ... capture objects from the host scene ...
//! let candidates: Vec<_> = scene.keys_of_kind(ObjectKind::Mesh).collect();
//!
//! let config = OverlapConfig::default();
//! let result = run_overlap_grouping(
//!     &scene,
//!     &candidates,
//!     &config,
//!     RepresentativePolicy::HighestVertexCount,
//! ).expect("default config is valid");
//!
//! for group in result.groups() {
//!     println!("{}: {} subordinate(s)", group.label(), group.subordinates().len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod organize;
pub mod overlap;
pub mod scene;

pub use overlap::{
    run_overlap_grouping, GroupingResult, OverlapConfig, OverlapError, OverlapGroup,
    OriginClustering, RepresentativePolicy,
};

/// Common imports for library users
pub mod prelude {
    pub use crate::config::{Config, ConfigError};
    pub use crate::foundation::math::{Mat4, Point3, Transform, Vec3};
    pub use crate::organize::{
        apply_grouping, collect_candidates, file_by_kind, FilingReport,
    };
    pub use crate::overlap::{
        run_overlap_grouping, GroupingResult, OverlapConfig, OverlapError, OverlapGroup,
        OriginClustering, RepresentativePolicy,
    };
    pub use crate::scene::{
        CollectionStore, CollectionTree, ObjectKey, ObjectKind, ObjectSnapshot, SceneSnapshot,
    };
}
