//! Object naming helpers
//!
//! Hosts commonly tag LOD variants with `_high`/`_low` suffixes and
//! accumulate `.001`-style numeric dedup noise on duplicated objects.
//! These helpers reduce such names to a shared base, which is also how
//! overlap group labels are derived from representative names.

use std::fmt;

/// LOD detail level used in name suffixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLevel {
    /// High-poly variant
    High,
    /// Low-poly variant
    Low,
}

impl DetailLevel {
    /// The name suffix for this level
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::High => "_high",
            Self::Low => "_low",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Reduce an object name to its shared base
///
/// Cuts the name at the first `_low` (or, failing that, `_high`) marker,
/// then drops dots, double underscores, and zero digits — the characters
/// duplication and LOD tagging introduce. May return an empty string for
/// names made up entirely of such noise; callers supply their own
/// fallback.
pub fn base_name(name: &str) -> String {
    let head = match name.find("_low") {
        Some(index) => &name[..index],
        None => match name.find("_high") {
            Some(index) => &name[..index],
            None => name,
        },
    };

    head.replace('.', "").replace("__", "").replace('0', "")
}

/// Strip a name to its base and append a detail-level suffix
pub fn with_detail_suffix(name: &str, level: DetailLevel) -> String {
    format!("{}{}", base_name(name), level.suffix())
}
