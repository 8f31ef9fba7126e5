//! Overlap Grouping Engine
//!
//! Scans mesh objects in a scene snapshot for clusters occupying
//! approximately the same location and groups each cluster, designating
//! one representative to remain active. Matching runs in narrowing
//! stages, each with its own tolerance:
//!
//! 1. **Origin clustering** — world origins within `origin_tolerance`
//! 2. **Bounds matching** — world bound corners within `bounds_tolerance`
//! 3. **Vertex matching** — sampled vertices within `vertex_tolerance`
//! 4. **Representative selection** — extremal vertex count per group
//!
//! Origin and bounds proximity alone produce false positives for
//! same-size bounding volumes that share no geometry; the vertex stage is
//! the precision gate, with its cost bounded by `max_search_verts`.
//!
//! The engine never mutates the scene. It reads a [`SceneSnapshot`]
//! single-threaded, runs to completion, and produces a
//! [`GroupingResult`] for the host to apply.
//!
//! [`SceneSnapshot`]: crate::scene::SceneSnapshot

mod bounds;
mod engine;
mod origin;
mod representative;
mod vertex;

pub use engine::{run_overlap_grouping, GroupingResult, OverlapGroup};
pub use representative::RepresentativePolicy;

use serde::{Deserialize, Serialize};

/// Origin-clustering strategy
///
/// Single-seed clustering compares every unassigned object against the
/// cluster seed only, so a chain of objects each within tolerance of its
/// neighbor but not of the seed splits into several clusters. That keeps
/// results stable for scenes organized with it;
/// [`OriginClustering::Transitive`] instead closes over the
/// within-tolerance relation and will merge such chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginClustering {
    /// Compare against the cluster seed only
    SingleSeed,
    /// Full transitive closure over the proximity relation
    Transitive,
}

impl Default for OriginClustering {
    fn default() -> Self {
        Self::SingleSeed
    }
}

/// Tolerances and limits for one grouping run
///
/// Passed explicitly into [`run_overlap_grouping`] rather than living on
/// ambient scene settings. Implements [`crate::config::Config`], so hosts
/// can persist user-tuned values as TOML or RON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapConfig {
    /// Maximum distance between world origins in one cluster
    pub origin_tolerance: f32,

    /// Maximum distance between corresponding world bound corners
    pub bounds_tolerance: f32,

    /// Maximum distance between sampled vertices for a confirmed pair
    pub vertex_tolerance: f32,

    /// Vertices sampled per object in the vertex-matching stage
    pub max_search_verts: usize,

    /// How origin clusters are grown
    pub origin_clustering: OriginClustering,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            origin_tolerance: 0.01,
            bounds_tolerance: 0.35,
            vertex_tolerance: 0.5,
            max_search_verts: 20,
            origin_clustering: OriginClustering::default(),
        }
    }
}

impl OverlapConfig {
    /// Set the origin tolerance
    pub fn with_origin_tolerance(mut self, tolerance: f32) -> Self {
        self.origin_tolerance = tolerance;
        self
    }

    /// Set the bounds tolerance
    pub fn with_bounds_tolerance(mut self, tolerance: f32) -> Self {
        self.bounds_tolerance = tolerance;
        self
    }

    /// Set the vertex tolerance
    pub fn with_vertex_tolerance(mut self, tolerance: f32) -> Self {
        self.vertex_tolerance = tolerance;
        self
    }

    /// Set the vertex sampling cap
    pub fn with_max_search_verts(mut self, cap: usize) -> Self {
        self.max_search_verts = cap;
        self
    }

    /// Set the origin-clustering strategy
    pub fn with_origin_clustering(mut self, mode: OriginClustering) -> Self {
        self.origin_clustering = mode;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("origin_tolerance", self.origin_tolerance),
            ("bounds_tolerance", self.bounds_tolerance),
            ("vertex_tolerance", self.vertex_tolerance),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} must be finite"));
            }
            if value < 0.0 {
                return Err(format!("{name} must be non-negative"));
            }
        }
        Ok(())
    }
}

impl crate::config::Config for OverlapConfig {}

/// Errors from the grouping engine
///
/// The matching stages themselves are total; only configuration can fail.
#[derive(thiserror::Error, Debug)]
pub enum OverlapError {
    /// Configuration failed validation
    #[error("invalid overlap configuration: {0}")]
    InvalidConfig(String),
}
