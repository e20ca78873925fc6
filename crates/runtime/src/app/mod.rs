mod input;
mod loop_runner;
mod metrics;
mod session;
mod timer;

pub use input::InputAction;
pub use loop_runner::{run_session, InputSource, LoopConfig, NullInput, RuntimeError};
pub use metrics::LoopMetricsSnapshot;
pub use session::{
    EnemyTier, Entity, EntityId, EntityTag, InputSnapshot, NavigationService, PositionSource,
    Session, SessionCommand, Transform, Vec2, Vec3, World,
};
pub use timer::{EffectTimer, EffectTrigger, SimTimeline};
