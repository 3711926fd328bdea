/// Scene - the set of entities drawn each frame.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys.

use slotmap::{new_key_type, SlotMap};
use crate::camera::Camera;
use crate::engine_warn;
use crate::graphics_device::CommandList;
use super::entity::Entity;

new_key_type! {
    /// Stable key for an Entity within a Scene.
    ///
    /// Keys remain valid even after other entities are removed.
    pub struct EntityKey;
}

/// Outcome of one `Scene::draw`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Entities whose draw was recorded
    pub drawn: u32,
    /// Entities that failed and were left out of the frame
    pub skipped: u32,
}

#[derive(Default)]
pub struct Scene {
    entities: SlotMap<EntityKey, Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
        }
    }

    /// Add an entity, returning its stable key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Remove an entity. Returns None if the key is invalid.
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        self.entities.remove(key)
    }

    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Iterate over all (key, entity) pairs
    pub fn entities(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Remove all entities
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Draw every entity into `cmd`
    ///
    /// An entity whose draw fails is logged and skipped; the rest of the
    /// frame is still recorded.
    pub fn draw(&mut self, cmd: &mut dyn CommandList, camera: &Camera) -> DrawStats {
        let mut stats = DrawStats::default();
        for (key, entity) in self.entities.iter_mut() {
            match entity.draw(cmd, camera) {
                Ok(()) => stats.drawn += 1,
                Err(e) => {
                    engine_warn!("ember3d::Scene", "Skipping entity {:?}: {}", key, e);
                    stats.skipped += 1;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
