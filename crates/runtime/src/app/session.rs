use serde::{Deserialize, Serialize};

use super::input::{clamp_intent, ActionStates, InputAction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// World-space position. `y` is the vertical axis; ground movement
/// happens on the x/z plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn scaled(self, factor: f32) -> Vec3 {
        Vec3 {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    pub fn distance_to(self, other: Vec3) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    analog_intent: Option<Vec2>,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    /// Analog stick path; overrides the digital actions when present.
    pub fn with_analog_intent(mut self, intent: Vec2) -> Self {
        self.analog_intent = Some(intent);
        self
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    /// Movement intent with magnitude clamped to 1.
    pub fn intent_vector(&self) -> Vec2 {
        match self.analog_intent {
            Some(raw) => clamp_intent(raw),
            None => self.actions.intent_vector(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyTier {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTag {
    Player,
    Pickup,
    Enemy { tier: EnemyTier },
    Obstacle,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub tag: EntityTag,
    pub transform: Transform,
    pub collider_radius: f32,
    pub active: bool,
    pub debug_name: &'static str,
}

#[derive(Debug, Default)]
struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Flat entity store for the session. Spawns and despawns are staged
/// and applied at a safe point between systems, never mid-iteration.
#[derive(Debug, Default)]
pub struct World {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
}

impl World {
    pub fn spawn(
        &mut self,
        tag: EntityTag,
        transform: Transform,
        collider_radius: f32,
        debug_name: &'static str,
    ) -> EntityId {
        let id = self.allocator.allocate();
        self.pending_spawns.push(Entity {
            id,
            tag,
            transform,
            collider_radius,
            active: true,
            debug_name,
        });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let exists_now = self.entities.iter().any(|entity| entity.id == id);
        let pending_spawn = self.pending_spawns.iter().any(|entity| entity.id == id);
        if !exists_now && !pending_spawn {
            return false;
        }
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort_by_key(|id| id.0);
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            self.entities.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_spawns.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_despawns.clear();
        }
        self.entities.append(&mut self.pending_spawns);
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn set_active(&mut self, id: EntityId, active: bool) -> bool {
        match self.find_entity_mut(id) {
            Some(entity) => {
                entity.active = active;
                true
            }
            None => false,
        }
    }
}

/// Read access to a tracked world position. Consumed by camera-follow,
/// chase, and passive-follow collaborators; when the position is
/// unset the consumer degrades (logs and disables itself) rather than
/// crashing.
pub trait PositionSource {
    fn tracked_position(&self) -> Option<Vec3>;
}

/// Opaque external pathing service: accepts a destination, computes
/// and executes movement toward it. The core never implements or
/// inspects its algorithm.
pub trait NavigationService {
    fn set_destination(&mut self, destination: Vec3);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    None,
    Exit,
}

/// One game session driven by the loop runner: a variable-rate
/// `update` once per frame, then zero or more fixed-rate
/// `fixed_update` ticks from the step accumulator.
pub trait Session {
    fn load(&mut self, world: &mut World);

    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot, world: &mut World)
        -> SessionCommand;

    fn fixed_update(&mut self, fixed_dt_seconds: f32, world: &mut World);

    fn shutdown(&mut self, world: &mut World);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_marker(world: &mut World, x: f32) -> EntityId {
        world.spawn(
            EntityTag::Pickup,
            Transform {
                position: Vec3 {
                    x,
                    y: 0.5,
                    z: 0.0,
                },
                yaw_degrees: 0.0,
            },
            0.5,
            "marker",
        )
    }

    #[test]
    fn spawns_are_staged_until_apply_pending() {
        let mut world = World::default();
        let id = spawn_marker(&mut world, 1.0);

        assert_eq!(world.entity_count(), 0);
        world.apply_pending();
        assert_eq!(world.entity_count(), 1);
        assert!(world.find_entity(id).is_some());
    }

    #[test]
    fn despawn_of_unknown_entity_is_rejected() {
        let mut world = World::default();
        assert!(!world.despawn(EntityId(42)));
    }

    #[test]
    fn despawn_cancels_a_pending_spawn() {
        let mut world = World::default();
        let id = spawn_marker(&mut world, 1.0);
        assert!(world.despawn(id));
        world.apply_pending();

        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn duplicate_despawns_collapse() {
        let mut world = World::default();
        let id = spawn_marker(&mut world, 1.0);
        world.apply_pending();

        assert!(world.despawn(id));
        assert!(world.despawn(id));
        world.apply_pending();
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn set_active_flags_the_entity_without_removing_it() {
        let mut world = World::default();
        let id = spawn_marker(&mut world, 1.0);
        world.apply_pending();

        assert!(world.set_active(id, false));
        assert!(!world.find_entity(id).expect("marker").active);
        assert_eq!(world.entity_count(), 1);
        assert!(!world.set_active(EntityId(999), false));
    }

    #[test]
    fn analog_intent_overrides_digital_actions() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::MoveUp, true)
            .with_analog_intent(Vec2 { x: 0.5, y: 0.0 });

        let intent = snapshot.intent_vector();
        assert!((intent.x - 0.5).abs() < 0.0001);
        assert_eq!(intent.y, 0.0);
    }
}
