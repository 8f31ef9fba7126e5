//! Bounds matching stage
//!
//! Refines an origin cluster by comparing world-space bounding box
//! corners. Corners are compared index-to-index (corner i of A against
//! corner i of B), so two boxes match when their corner layouts coincide
//! within tolerance, not merely when their volumes touch.

use crate::foundation::math::Point3;
use crate::scene::{ObjectKey, SceneSnapshot};

/// Candidate overlap group for one origin cluster
///
/// Every pair of distinct members is tested; the candidate group is the
/// union of all members touched by at least one matching pair. Returns
/// `None` when fewer than two members are touched.
pub(crate) fn candidate_group(
    scene: &SceneSnapshot,
    cluster: &[ObjectKey],
    tolerance: f32,
) -> Option<Vec<ObjectKey>> {
    if cluster.len() < 2 {
        return None;
    }
    let tolerance_sq = tolerance * tolerance;

    let corners: Vec<(ObjectKey, [Point3; 8])> = cluster
        .iter()
        .filter_map(|&key| scene.world_corners(key).map(|c| (key, c)))
        .collect();

    let mut touched = vec![false; corners.len()];
    for a in 0..corners.len() {
        for b in a + 1..corners.len() {
            if corners_match(&corners[a].1, &corners[b].1, tolerance_sq) {
                touched[a] = true;
                touched[b] = true;
            }
        }
    }

    let group: Vec<ObjectKey> = corners
        .iter()
        .zip(&touched)
        .filter(|(_, &was_touched)| was_touched)
        .map(|((key, _), _)| *key)
        .collect();

    (group.len() >= 2).then_some(group)
}

/// Zipped corner comparison: any corresponding-index pair within tolerance
fn corners_match(a: &[Point3; 8], b: &[Point3; 8], tolerance_sq: f32) -> bool {
    a.iter()
        .zip(b.iter())
        .any(|(ca, cb)| (ca - cb).magnitude_squared() <= tolerance_sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Transform, Vec3};
    use crate::scene::{corners_from_bounds, ObjectSnapshot};

    fn boxy(name: &str, at: Vec3, half: f32) -> ObjectSnapshot {
        let corners = corners_from_bounds(
            Point3::new(-half, -half, -half),
            Point3::new(half, half, half),
        );
        ObjectSnapshot::mesh(
            name,
            Transform::from_position(at).to_matrix(),
            corners,
            corners.to_vec(),
        )
    }

    #[test]
    fn test_identical_boxes_match() {
        let mut scene = SceneSnapshot::new();
        let a = scene.insert(boxy("a", Vec3::zeros(), 0.5));
        let b = scene.insert(boxy("b", Vec3::zeros(), 0.5));

        let group = candidate_group(&scene, &[a, b], 0.35).unwrap();
        assert_eq!(group, vec![a, b]);
    }

    #[test]
    fn test_mismatched_boxes_rejected() {
        let mut scene = SceneSnapshot::new();
        let a = scene.insert(boxy("a", Vec3::zeros(), 0.5));
        let b = scene.insert(boxy("b", Vec3::zeros(), 1.5));

        assert!(candidate_group(&scene, &[a, b], 0.35).is_none());
    }

    #[test]
    fn test_chain_merges_through_shared_member() {
        // a-b and b-c corner distances fall inside tolerance, a-c does not
        let mut scene = SceneSnapshot::new();
        let a = scene.insert(boxy("a", Vec3::zeros(), 0.5));
        let b = scene.insert(boxy("b", Vec3::zeros(), 0.6));
        let c = scene.insert(boxy("c", Vec3::zeros(), 0.72));

        let group = candidate_group(&scene, &[a, b, c], 0.35).unwrap();
        assert_eq!(group, vec![a, b, c]);
    }

    #[test]
    fn test_untouched_member_is_dropped() {
        let mut scene = SceneSnapshot::new();
        let a = scene.insert(boxy("a", Vec3::zeros(), 0.5));
        let b = scene.insert(boxy("b", Vec3::zeros(), 0.5));
        let lone = scene.insert(boxy("lone", Vec3::zeros(), 3.0));

        let group = candidate_group(&scene, &[a, b, lone], 0.35).unwrap();
        assert_eq!(group, vec![a, b]);
    }

    #[test]
    fn test_singleton_cluster_yields_nothing() {
        let mut scene = SceneSnapshot::new();
        let a = scene.insert(boxy("a", Vec3::zeros(), 0.5));

        assert!(candidate_group(&scene, &[a], 10.0).is_none());
    }
}
