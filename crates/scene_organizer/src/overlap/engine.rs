//! Grouping orchestration
//!
//! Runs the matching stages in order over one candidate set and
//! assembles the labeled grouping result. The scan itself never mutates
//! the scene; applying the result is a separate single pass in
//! [`crate::organize`].

use super::{bounds, origin, representative, vertex};
use super::{OverlapConfig, OverlapError, RepresentativePolicy};
use crate::organize::naming;
use crate::scene::{ObjectKey, ObjectKind, SceneSnapshot};
use std::collections::{HashMap, HashSet};

/// Candidate counts above this suggest the host should warn before running
const CANDIDATE_WARN_THRESHOLD: usize = 512;

/// Full-mesh vertex counts above this make the vertex stage cap visible
const DENSE_MESH_WARN_THRESHOLD: usize = 50_000;

/// One confirmed cluster of overlapping objects
///
/// Always holds at least two objects in total; a relation needs two ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapGroup {
    label: String,
    representative: ObjectKey,
    subordinates: Vec<ObjectKey>,
}

impl OverlapGroup {
    /// Deterministic label derived from the representative's base name
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The member that stays active and unmoved
    pub fn representative(&self) -> ObjectKey {
        self.representative
    }

    /// Members to be relocated into the group's destination collection
    pub fn subordinates(&self) -> &[ObjectKey] {
        &self.subordinates
    }

    /// All members, representative first
    pub fn members(&self) -> impl Iterator<Item = ObjectKey> + '_ {
        std::iter::once(self.representative).chain(self.subordinates.iter().copied())
    }

    /// Total member count (representative included)
    pub fn size(&self) -> usize {
        1 + self.subordinates.len()
    }
}

/// Outcome of one grouping run
#[derive(Debug, Clone, Default)]
pub struct GroupingResult {
    groups: Vec<OverlapGroup>,
    candidate_count: usize,
    degenerate: Vec<ObjectKey>,
}

impl GroupingResult {
    /// Confirmed groups in discovery order
    pub fn groups(&self) -> &[OverlapGroup] {
        &self.groups
    }

    /// How many mesh candidates were scanned
    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Candidates with no vertices, which can never join a group
    pub fn degenerate(&self) -> &[ObjectKey] {
        &self.degenerate
    }

    /// Whether the run found no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of objects captured across all groups
    pub fn grouped_object_count(&self) -> usize {
        self.groups.iter().map(OverlapGroup::size).sum()
    }
}

/// Run the overlap grouping pipeline over `candidates`
///
/// Candidates are deduplicated preserving first-encountered order and
/// filtered to mesh objects; the stages then narrow them down to
/// confirmed overlap groups, each with a representative picked by
/// `policy`. The scene is only read. An empty candidate set is not an
/// error; it yields an empty result.
///
/// # Errors
///
/// [`OverlapError::InvalidConfig`] when `config` fails validation.
pub fn run_overlap_grouping(
    scene: &SceneSnapshot,
    candidates: &[ObjectKey],
    config: &OverlapConfig,
    policy: RepresentativePolicy,
) -> Result<GroupingResult, OverlapError> {
    config.validate().map_err(OverlapError::InvalidConfig)?;

    let mut seen = HashSet::new();
    let mut meshes = Vec::new();
    let mut degenerate = Vec::new();
    let mut densest = 0;

    for &key in candidates {
        if !seen.insert(key) {
            continue;
        }
        let Some(object) = scene.get(key) else {
            continue;
        };
        if object.kind() != ObjectKind::Mesh {
            continue;
        }
        if object.vertex_count() == 0 {
            // carried through the stages but can never confirm a pair
            degenerate.push(key);
        }
        densest = densest.max(object.vertex_count());
        meshes.push(key);
    }

    if meshes.is_empty() {
        log::info!("Overlap scan: no mesh candidates");
        return Ok(GroupingResult::default());
    }
    if meshes.len() > CANDIDATE_WARN_THRESHOLD {
        log::warn!(
            "Overlap scan over {} candidates; expect an O(n^2) origin pass",
            meshes.len()
        );
    }
    if densest > DENSE_MESH_WARN_THRESHOLD {
        log::warn!(
            "Densest candidate has {} vertices; sampling only the first {}",
            densest,
            config.max_search_verts
        );
    }

    let clusters = origin::cluster_by_origin(
        scene,
        &meshes,
        config.origin_tolerance,
        config.origin_clustering,
    );

    let mut groups = Vec::new();
    let mut label_uses: HashMap<String, usize> = HashMap::new();

    for cluster in &clusters {
        let Some(candidate) = bounds::candidate_group(scene, cluster, config.bounds_tolerance)
        else {
            continue;
        };
        let Some(confirmed) = vertex::confirmed_group(
            scene,
            &candidate,
            config.vertex_tolerance,
            config.max_search_verts,
        ) else {
            continue;
        };
        let Some(chosen) = representative::select_representative(scene, &confirmed, policy)
        else {
            continue;
        };

        let subordinates: Vec<ObjectKey> = confirmed
            .iter()
            .copied()
            .filter(|&key| key != chosen)
            .collect();
        let label = derive_label(scene, chosen, &mut label_uses);

        log::debug!(
            "Confirmed overlap group '{}' with {} member(s)",
            label,
            subordinates.len() + 1
        );
        groups.push(OverlapGroup {
            label,
            representative: chosen,
            subordinates,
        });
    }

    log::info!(
        "Overlap scan: {} group(s) from {} candidate(s), {} degenerate",
        groups.len(),
        meshes.len(),
        degenerate.len()
    );

    Ok(GroupingResult {
        groups,
        candidate_count: meshes.len(),
        degenerate,
    })
}

/// Group label from the representative's sanitized base name
///
/// Collisions get a numeric suffix in discovery order so labels stay
/// unique within one result.
fn derive_label(
    scene: &SceneSnapshot,
    representative: ObjectKey,
    label_uses: &mut HashMap<String, usize>,
) -> String {
    let base = scene
        .name(representative)
        .map(naming::base_name)
        .unwrap_or_default();
    let base = if base.is_empty() {
        "overlap".to_string()
    } else {
        base
    };

    let uses = label_uses.entry(base.clone()).or_insert(0);
    *uses += 1;
    if *uses == 1 {
        base
    } else {
        format!("{}_{}", base, *uses - 1)
    }
}
