use std::fs;
use std::path::Path;

use runtime::{
    EffectTimer, EffectTrigger, EnemyTier, EntityId, EntityTag, InputSnapshot, NavigationService,
    PositionSource, Session, SessionCommand, SimTimeline, Transform, Vec2, Vec3, World,
};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

const INTENT_EPSILON: f32 = 0.1;
const IDLE_DAMPING_RATE_PER_SECOND: f32 = 5.0;
const PLAYER_COLLIDER_RADIUS: f32 = 0.5;
const PICKUP_COLLIDER_RADIUS: f32 = 0.5;
const ENEMY_COLLIDER_RADIUS: f32 = 0.5;
const OBSTACLE_COLLIDER_RADIUS: f32 = 1.0;
const WIN_BANNER_TEXT: &str = "You Win!";
const TIME_UP_BANNER_TEXT: &str = "Time's Up - Game Over!";

include!("config.rs");
include!("types.rs");
include!("motion.rs");
include!("lifecycle.rs");
include!("boost.rs");
include!("respawn.rs");
include!("progression.rs");
include!("session_state.rs");
include!("session_impl.rs");

pub(crate) fn build_session(config_file: GameConfigFile) -> ChaseSession {
    ChaseSession::new(config_file.session, config_file.layout)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
