pub mod app;

pub use app::{
    run_session, EffectTimer, EffectTrigger, EnemyTier, Entity, EntityId, EntityTag, InputAction,
    InputSnapshot, InputSource, LoopConfig, LoopMetricsSnapshot, NavigationService, NullInput,
    PositionSource, RuntimeError, Session, SessionCommand, SimTimeline, Transform, Vec2, Vec3,
    World,
};
