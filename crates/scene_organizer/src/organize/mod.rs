//! Scene organization operations
//!
//! Host-side conveniences built on the collection boundary: applying
//! overlap grouping results, filing objects by type, and the naming
//! helpers shared with group label derivation.

pub mod filing;
pub mod naming;

pub use filing::{apply_grouping, collect_candidates, file_by_kind, FilingReport};
pub use naming::{base_name, with_detail_suffix, DetailLevel};
