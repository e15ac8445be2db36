use glam::Vec3;

use crate::state::{EntityId, GameState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

/// Overlap queries against the current world.
///
/// Implementations return each overlapping entity at most once, nearest
/// first, never including the player. Liveness filtering is left to callers.
pub trait SpatialQuery: Send + Sync {
    fn overlap_sphere(&self, state: &GameState, sphere: Sphere) -> Vec<EntityId>;
}

/// Linear scan over every positioned entity in the state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanQuery;

impl SpatialQuery for ScanQuery {
    fn overlap_sphere(&self, state: &GameState, sphere: Sphere) -> Vec<EntityId> {
        let enemies = state.enemies.iter().map(|e| (e.id, e.position));
        let items = state.items.iter().map(|i| (i.id, i.position));
        let props = state.props.iter().map(|p| (p.id, p.position));

        let mut hits: Vec<(f32, EntityId)> = enemies
            .chain(items)
            .chain(props)
            .filter(|(_, position)| sphere.contains(*position))
            .map(|(id, position)| (sphere.center.distance_squared(position), id))
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.into_iter().map(|(_, id)| id).collect()
    }
}
