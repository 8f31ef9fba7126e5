//! Filing grouping results into collections
//!
//! All scene mutation happens here, in a single pass after matching has
//! finished. Applying the same result twice changes nothing, so a
//! misconfigured run is always recoverable by adjusting tolerances and
//! re-running.

use crate::overlap::GroupingResult;
use crate::scene::{CollectionStore, ObjectKey, ObjectKind, SceneSnapshot};

/// Summary of one filing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilingReport {
    /// Destination collections ensured
    pub groups_filed: usize,
    /// Subordinates relocated into destinations
    pub objects_moved: usize,
    /// Representatives returned to the scene root from stale destinations
    pub representatives_restored: usize,
}

/// Relocate each group's subordinates into a per-group destination
///
/// Destinations are named after the group label and nested under
/// `parent`, created on demand. The representative keeps its current
/// place unless it is stranded in a destination from an earlier run, in
/// which case it returns to the scene root.
pub fn apply_grouping<S: CollectionStore>(
    result: &GroupingResult,
    scene: &SceneSnapshot,
    store: &mut S,
    parent: &str,
) -> FilingReport {
    let mut report = FilingReport::default();
    if result.is_empty() {
        log::info!("No overlap groups to file");
        return report;
    }

    store.ensure_collection(parent, None);

    for group in result.groups() {
        store.ensure_collection(group.label(), Some(parent));
        report.groups_filed += 1;

        for &subordinate in group.subordinates() {
            let memberships = store.collections_of(subordinate);
            let already_filed =
                memberships.len() == 1 && memberships[0] == group.label();
            if already_filed {
                continue;
            }
            store.unlink_all(subordinate);
            store.link(subordinate, group.label());
            report.objects_moved += 1;
            log::debug!(
                "Filed '{}' under '{}'",
                scene.name(subordinate).unwrap_or("<missing>"),
                group.label()
            );
        }

        let representative = group.representative();
        let stranded = store
            .collections_of(representative)
            .iter()
            .any(|name| store.is_child_of(name, parent));
        if stranded {
            store.unlink_all(representative);
            report.representatives_restored += 1;
            log::debug!(
                "Returned representative '{}' to the scene root",
                scene.name(representative).unwrap_or("<missing>")
            );
        }
    }

    log::info!(
        "Filed {} object(s) across {} group(s)",
        report.objects_moved,
        report.groups_filed
    );
    report
}

/// Mesh objects eligible for the next overlap scan
///
/// Objects already filed under `parent` (or one of its destination
/// children) are excluded, which is what makes repeated scan/apply
/// cycles converge instead of re-grouping their own output.
pub fn collect_candidates<S: CollectionStore>(
    scene: &SceneSnapshot,
    store: &S,
    parent: &str,
) -> Vec<ObjectKey> {
    scene
        .keys_of_kind(ObjectKind::Mesh)
        .filter(|&key| {
            store
                .collections_of(key)
                .iter()
                .all(|name| name != parent && !store.is_child_of(name, parent))
        })
        .collect()
}

/// Move every object of one kind into a named collection
///
/// The collection is created on demand, but only when there is something
/// to move. Returns the number of objects relocated.
pub fn file_by_kind<S: CollectionStore>(
    scene: &SceneSnapshot,
    store: &mut S,
    kind: ObjectKind,
    collection: &str,
) -> usize {
    let pending: Vec<ObjectKey> = scene
        .keys_of_kind(kind)
        .filter(|&key| {
            let memberships = store.collections_of(key);
            !(memberships.len() == 1 && memberships[0] == collection)
        })
        .collect();

    if pending.is_empty() {
        log::warn!("No {kind:?} objects left to sort into '{collection}'");
        return 0;
    }

    store.ensure_collection(collection, None);
    let moved = pending.len();
    for key in pending {
        store.unlink_all(key);
        store.link(key, collection);
    }
    log::info!("Moved {moved} {kind:?} object(s) into '{collection}'");
    moved
}
