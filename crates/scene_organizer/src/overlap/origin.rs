//! Origin clustering stage
//!
//! Partitions the candidate set into clusters of objects whose world
//! origins coincide within tolerance. O(n²) in candidate count; the
//! vertex stage is the real cost center and is capped separately.

use super::OriginClustering;
use crate::foundation::math::Point3;
use crate::scene::{ObjectKey, SceneSnapshot};

/// Partition `candidates` into origin clusters, preserving enumeration order
///
/// `SingleSeed` adds an object to a cluster only if it lies within
/// `tolerance` of the cluster's seed. `Transitive` grows each cluster to
/// the full set reachable through the within-tolerance relation.
/// Singleton clusters are returned as-is; later stages discard them.
pub(crate) fn cluster_by_origin(
    scene: &SceneSnapshot,
    candidates: &[ObjectKey],
    tolerance: f32,
    mode: OriginClustering,
) -> Vec<Vec<ObjectKey>> {
    let tolerance_sq = tolerance * tolerance;

    let origins: Vec<(ObjectKey, Point3)> = candidates
        .iter()
        .filter_map(|&key| scene.world_origin(key).map(|origin| (key, origin)))
        .collect();

    let mut assigned = vec![false; origins.len()];
    let mut clusters = Vec::new();

    for seed in 0..origins.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut cluster = vec![seed];

        match mode {
            OriginClustering::SingleSeed => {
                for other in seed + 1..origins.len() {
                    if assigned[other] {
                        continue;
                    }
                    if within(&origins[other].1, &origins[seed].1, tolerance_sq) {
                        assigned[other] = true;
                        cluster.push(other);
                    }
                }
            }
            OriginClustering::Transitive => {
                let mut frontier = 0;
                while frontier < cluster.len() {
                    let current = cluster[frontier];
                    frontier += 1;
                    for other in 0..origins.len() {
                        if assigned[other] {
                            continue;
                        }
                        if within(&origins[other].1, &origins[current].1, tolerance_sq) {
                            assigned[other] = true;
                            cluster.push(other);
                        }
                    }
                }
                // restore enumeration order after the breadth-first growth
                cluster.sort_unstable();
            }
        }

        clusters.push(cluster.into_iter().map(|index| origins[index].0).collect());
    }

    clusters
}

fn within(a: &Point3, b: &Point3, tolerance_sq: f32) -> bool {
    (a - b).magnitude_squared() <= tolerance_sq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Transform, Vec3};
    use crate::scene::ObjectSnapshot;

    fn point_mesh(name: &str, at: Vec3) -> ObjectSnapshot {
        let origin = Point3::origin();
        ObjectSnapshot::mesh(
            name,
            Transform::from_position(at).to_matrix(),
            [origin; 8],
            vec![origin],
        )
    }

    fn scene_with(positions: &[Vec3]) -> (SceneSnapshot, Vec<ObjectKey>) {
        let mut scene = SceneSnapshot::new();
        let keys = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| scene.insert(point_mesh(&format!("obj{i}"), p)))
            .collect();
        (scene, keys)
    }

    #[test]
    fn test_coincident_origins_cluster_together() {
        let (scene, keys) = scene_with(&[Vec3::zeros(), Vec3::new(0.005, 0.0, 0.0)]);
        let clusters =
            cluster_by_origin(&scene, &keys, 0.01, OriginClustering::SingleSeed);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0], keys);
    }

    #[test]
    fn test_distant_origins_stay_apart() {
        let (scene, keys) = scene_with(&[Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0)]);
        let clusters =
            cluster_by_origin(&scene, &keys, 0.01, OriginClustering::SingleSeed);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0], vec![keys[0]]);
        assert_eq!(clusters[1], vec![keys[1]]);
    }

    #[test]
    fn test_single_seed_breaks_chains() {
        // b is within tolerance of both a and c, but c is too far from a
        let (scene, keys) = scene_with(&[
            Vec3::zeros(),
            Vec3::new(0.009, 0.0, 0.0),
            Vec3::new(0.018, 0.0, 0.0),
        ]);
        let clusters =
            cluster_by_origin(&scene, &keys, 0.01, OriginClustering::SingleSeed);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0], vec![keys[0], keys[1]]);
        assert_eq!(clusters[1], vec![keys[2]]);
    }

    #[test]
    fn test_transitive_follows_chains() {
        let (scene, keys) = scene_with(&[
            Vec3::zeros(),
            Vec3::new(0.009, 0.0, 0.0),
            Vec3::new(0.018, 0.0, 0.0),
        ]);
        let clusters =
            cluster_by_origin(&scene, &keys, 0.01, OriginClustering::Transitive);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0], keys);
    }

    #[test]
    fn test_exact_tolerance_distance_is_inside() {
        let (scene, keys) = scene_with(&[Vec3::zeros(), Vec3::new(0.01, 0.0, 0.0)]);
        let clusters =
            cluster_by_origin(&scene, &keys, 0.01, OriginClustering::SingleSeed);

        assert_eq!(clusters.len(), 1);
    }
}
