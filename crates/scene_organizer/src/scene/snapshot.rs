//! Scene snapshot arena
//!
//! Lightweight per-invocation copies of host scene objects. The host scene
//! graph is a mutable live object model with back references everywhere;
//! the core never holds live references into it. Instead the host captures
//! each object into an [`ObjectSnapshot`] (name, world matrix, local bound
//! corners, local vertices) and the grouping engine reads world-space
//! geometry back out through [`SceneSnapshot`] accessors. Snapshots are
//! discarded once a run's result has been handed back to the host.

use crate::foundation::math::{matrix_translation, Mat4, Point3};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to an object captured in a [`SceneSnapshot`]
    pub struct ObjectKey;
}

/// Host object type tag
///
/// Only [`ObjectKind::Mesh`] objects participate in overlap grouping;
/// other kinds are carried so hosts can file them by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Mesh object with vertex data
    Mesh,
    /// Empty / locator object without geometry
    Empty,
    /// Any other host object type
    Other,
}

/// Lightweight copy of one host scene object
#[derive(Debug, Clone)]
pub struct ObjectSnapshot {
    name: String,
    kind: ObjectKind,
    world: Mat4,
    local_bounds: [Point3; 8],
    vertices: Vec<Point3>,
}

impl ObjectSnapshot {
    /// Capture an object with explicit kind and geometry
    pub fn new(
        name: impl Into<String>,
        kind: ObjectKind,
        world: Mat4,
        local_bounds: [Point3; 8],
        vertices: Vec<Point3>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            world,
            local_bounds,
            vertices,
        }
    }

    /// Capture a mesh object
    pub fn mesh(
        name: impl Into<String>,
        world: Mat4,
        local_bounds: [Point3; 8],
        vertices: Vec<Point3>,
    ) -> Self {
        Self::new(name, ObjectKind::Mesh, world, local_bounds, vertices)
    }

    /// Capture an empty (no geometry)
    pub fn empty(name: impl Into<String>, world: Mat4) -> Self {
        Self::new(
            name,
            ObjectKind::Empty,
            world,
            [Point3::origin(); 8],
            Vec::new(),
        )
    }

    /// Object name as known to the host
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host object type tag
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// World transform matrix
    pub fn world(&self) -> &Mat4 {
        &self.world
    }

    /// Local-space bounding box corners
    pub fn local_bounds(&self) -> &[Point3; 8] {
        &self.local_bounds
    }

    /// Total vertex count of the full mesh (not the sampled subset)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Eight box corners from min/max extents
///
/// Corner ordering follows the octant convention: X varies fastest,
/// then Y, then Z. Hosts capturing bounds through this helper get a
/// consistent ordering for the zipped corner comparison.
pub fn corners_from_bounds(min: Point3, max: Point3) -> [Point3; 8] {
    [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(min.x, max.y, max.z),
        Point3::new(max.x, max.y, max.z),
    ]
}

/// Insertion-ordered arena of object snapshots for one grouping run
///
/// Enumeration order is the capture order and is stable across reads;
/// tie-breaking in the grouping stages depends on it.
#[derive(Debug, Default)]
pub struct SceneSnapshot {
    objects: SlotMap<ObjectKey, ObjectSnapshot>,
    order: Vec<ObjectKey>,
}

impl SceneSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, returning its stable handle
    pub fn insert(&mut self, object: ObjectSnapshot) -> ObjectKey {
        let key = self.objects.insert(object);
        self.order.push(key);
        key
    }

    /// Look up an object by handle
    pub fn get(&self, key: ObjectKey) -> Option<&ObjectSnapshot> {
        self.objects.get(key)
    }

    /// Object name, if the handle is valid
    pub fn name(&self, key: ObjectKey) -> Option<&str> {
        self.objects.get(key).map(ObjectSnapshot::name)
    }

    /// Number of captured objects
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the snapshot holds no objects
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate objects in capture order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &ObjectSnapshot)> {
        self.order
            .iter()
            .filter_map(move |&key| self.objects.get(key).map(|object| (key, object)))
    }

    /// Handles in capture order
    pub fn keys(&self) -> impl Iterator<Item = ObjectKey> + '_ {
        self.order.iter().copied()
    }

    /// Handles of all objects of one kind, in capture order
    pub fn keys_of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = ObjectKey> + '_ {
        self.iter()
            .filter(move |(_, object)| object.kind() == kind)
            .map(|(key, _)| key)
    }

    /// World-space origin (translation component of the world matrix)
    pub fn world_origin(&self, key: ObjectKey) -> Option<Point3> {
        self.objects
            .get(key)
            .map(|object| matrix_translation(object.world()))
    }

    /// World-space bounding box corners
    pub fn world_corners(&self, key: ObjectKey) -> Option<[Point3; 8]> {
        self.objects.get(key).map(|object| {
            let mut corners = *object.local_bounds();
            for corner in &mut corners {
                *corner = object.world().transform_point(corner);
            }
            corners
        })
    }

    /// Up to `cap` world-space vertex positions, in mesh order
    ///
    /// The cap bounds the cost of the vertex-matching stage on dense
    /// meshes. Returns an empty vector for invalid handles and for
    /// objects without geometry.
    pub fn sampled_world_vertices(&self, key: ObjectKey, cap: usize) -> Vec<Point3> {
        self.objects.get(key).map_or_else(Vec::new, |object| {
            object
                .vertices
                .iter()
                .take(cap)
                .map(|vertex| object.world().transform_point(vertex))
                .collect()
        })
    }

    /// Full vertex count of an object (0 for invalid handles)
    pub fn vertex_count(&self, key: ObjectKey) -> usize {
        self.objects.get(key).map_or(0, ObjectSnapshot::vertex_count)
    }
}
