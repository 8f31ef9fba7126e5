//! Representative selection stage

use crate::scene::{ObjectKey, SceneSnapshot};
use serde::{Deserialize, Serialize};

/// Which member of a confirmed overlap group stays active
///
/// The representative keeps its place in the scene; all other members
/// become subordinates and are relocated when the result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepresentativePolicy {
    /// Keep the member with the most vertices (full mesh count)
    HighestVertexCount,
    /// Keep the member with the fewest vertices
    LowestVertexCount,
}

impl RepresentativePolicy {
    /// Whether `candidate` displaces `incumbent` under this policy
    ///
    /// Strict comparison, so equal counts keep the earlier member.
    const fn prefers(self, candidate: usize, incumbent: usize) -> bool {
        match self {
            Self::HighestVertexCount => candidate > incumbent,
            Self::LowestVertexCount => candidate < incumbent,
        }
    }
}

/// Pick the extremal-vertex-count member of a group
///
/// Ties keep the first-encountered member, so the choice is deterministic
/// for a fixed enumeration order. `None` only for an empty group.
pub(crate) fn select_representative(
    scene: &SceneSnapshot,
    group: &[ObjectKey],
    policy: RepresentativePolicy,
) -> Option<ObjectKey> {
    let mut best: Option<(ObjectKey, usize)> = None;

    for &key in group {
        let count = scene.vertex_count(key);
        match best {
            None => best = Some((key, count)),
            Some((_, incumbent)) if policy.prefers(count, incumbent) => {
                best = Some((key, count));
            }
            Some(_) => {}
        }
    }

    best.map(|(key, _)| key)
}
