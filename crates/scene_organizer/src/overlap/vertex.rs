//! Vertex matching stage
//!
//! The precision gate after origin and bounds proximity. Same-size
//! bounding volumes at the same origin can still hold disjoint geometry
//! (a box and a sphere of identical bounds); only coincident sampled
//! vertices confirm a real overlap.

use crate::foundation::math::Point3;
use crate::scene::{ObjectKey, SceneSnapshot};

/// Confirm a bounds-matched candidate group through sampled vertices
///
/// Up to `max_search_verts` world-space vertices are sampled per member.
/// A pair confirms when any sampled vertex of one member lies within
/// `tolerance` of any sampled vertex of the other. The confirmed group is
/// the union of members participating in at least one confirmed pair;
/// `None` when no pair confirms. Members without vertices can never
/// confirm and therefore never appear in a confirmed group.
pub(crate) fn confirmed_group(
    scene: &SceneSnapshot,
    candidates: &[ObjectKey],
    tolerance: f32,
    max_search_verts: usize,
) -> Option<Vec<ObjectKey>> {
    if candidates.len() < 2 {
        return None;
    }
    let tolerance_sq = tolerance * tolerance;

    // world-space vertex cache, one entry per member for the whole pass
    let samples: Vec<(ObjectKey, Vec<Point3>)> = candidates
        .iter()
        .map(|&key| (key, scene.sampled_world_vertices(key, max_search_verts)))
        .collect();

    let mut confirmed = vec![false; samples.len()];
    for a in 0..samples.len() {
        for b in a + 1..samples.len() {
            if confirmed[a] && confirmed[b] {
                continue;
            }
            if any_vertex_within(&samples[a].1, &samples[b].1, tolerance_sq) {
                confirmed[a] = true;
                confirmed[b] = true;
            }
        }
    }

    let group: Vec<ObjectKey> = samples
        .iter()
        .zip(&confirmed)
        .filter(|(_, &was_confirmed)| was_confirmed)
        .map(|((key, _), _)| *key)
        .collect();

    (group.len() >= 2).then_some(group)
}

fn any_vertex_within(a: &[Point3], b: &[Point3], tolerance_sq: f32) -> bool {
    a.iter()
        .any(|va| b.iter().any(|vb| (va - vb).magnitude_squared() <= tolerance_sq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Transform, Vec3};
    use crate::scene::{corners_from_bounds, ObjectSnapshot};

    fn cube(name: &str, at: Vec3) -> ObjectSnapshot {
        let corners = corners_from_bounds(
            Point3::new(-0.5, -0.5, -0.5),
            Point3::new(0.5, 0.5, 0.5),
        );
        ObjectSnapshot::mesh(
            name,
            Transform::from_position(at).to_matrix(),
            corners,
            corners.to_vec(),
        )
    }

    /// Sphere-like stand-in: bounds close to a unit cube's, but vertices
    /// only at the axis poles, away from any cube corner.
    fn sphere(name: &str, at: Vec3) -> ObjectSnapshot {
        let r = 0.62;
        let corners = corners_from_bounds(Point3::new(-r, -r, -r), Point3::new(r, r, r));
        let vertices = vec![
            Point3::new(r, 0.0, 0.0),
            Point3::new(-r, 0.0, 0.0),
            Point3::new(0.0, r, 0.0),
            Point3::new(0.0, -r, 0.0),
            Point3::new(0.0, 0.0, r),
            Point3::new(0.0, 0.0, -r),
        ];
        ObjectSnapshot::mesh(name, Transform::from_position(at).to_matrix(), corners, vertices)
    }

    #[test]
    fn test_coincident_cubes_confirm() {
        let mut scene = SceneSnapshot::new();
        let a = scene.insert(cube("a", Vec3::zeros()));
        let b = scene.insert(cube("b", Vec3::zeros()));

        let group = confirmed_group(&scene, &[a, b], 0.5, 20).unwrap();
        assert_eq!(group, vec![a, b]);
    }

    #[test]
    fn test_disjoint_geometry_rejected() {
        let mut scene = SceneSnapshot::new();
        let a = scene.insert(cube("cube", Vec3::zeros()));
        let b = scene.insert(sphere("sphere", Vec3::zeros()));

        assert!(confirmed_group(&scene, &[a, b], 0.5, 20).is_none());
    }

    #[test]
    fn test_zero_vertex_member_never_confirms() {
        let mut scene = SceneSnapshot::new();
        let a = scene.insert(cube("a", Vec3::zeros()));
        let b = scene.insert(cube("b", Vec3::zeros()));
        let corners = corners_from_bounds(
            Point3::new(-0.5, -0.5, -0.5),
            Point3::new(0.5, 0.5, 0.5),
        );
        let hollow = scene.insert(ObjectSnapshot::mesh("hollow", Mat4::identity(), corners, Vec::new()));

        let group = confirmed_group(&scene, &[a, b, hollow], 0.5, 20).unwrap();
        assert_eq!(group, vec![a, b]);
    }

    #[test]
    fn test_zero_search_depth_confirms_nothing() {
        let mut scene = SceneSnapshot::new();
        let a = scene.insert(cube("a", Vec3::zeros()));
        let b = scene.insert(cube("b", Vec3::zeros()));

        assert!(confirmed_group(&scene, &[a, b], 0.5, 0).is_none());
    }

    #[test]
    fn test_sampling_cap_limits_matches() {
        // geometry only coincides in the last corners, outside a shallow sample
        let corners = corners_from_bounds(
            Point3::new(-0.5, -0.5, -0.5),
            Point3::new(0.5, 0.5, 0.5),
        );
        let far = Point3::new(40.0, 40.0, 40.0);
        let mut front_loaded = vec![far; 6];
        front_loaded.extend_from_slice(&corners[6..]);

        let mut scene = SceneSnapshot::new();
        let a = scene.insert(cube("a", Vec3::zeros()));
        let b = scene.insert(ObjectSnapshot::mesh(
            "b",
            Mat4::identity(),
            corners,
            front_loaded,
        ));

        assert!(confirmed_group(&scene, &[a, b], 0.5, 4).is_none());
        assert!(confirmed_group(&scene, &[a, b], 0.5, 8).is_some());
    }
}
