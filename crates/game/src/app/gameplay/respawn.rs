/// Schedules the delayed return of a downed or fallen player to the
/// respawn point. At most one respawn is in flight at a time; repeat
/// requests while one is pending are ignored.
#[derive(Debug)]
struct RespawnCoordinator {
    phase: RespawnPhase,
    respawn_point: Vec3,
    delay_seconds: f32,
    fall_threshold_y: f32,
    timer: EffectTimer,
}

impl RespawnCoordinator {
    fn new(respawn_point: Vec3, delay_seconds: f32, fall_threshold_y: f32) -> Self {
        Self {
            phase: RespawnPhase::Idle,
            respawn_point,
            delay_seconds,
            fall_threshold_y,
            timer: EffectTimer::idle(),
        }
    }

    fn is_in_flight(&self) -> bool {
        matches!(self.phase, RespawnPhase::InFlight)
    }

    fn fell_below_threshold(&self, position: Vec3) -> bool {
        matches!(self.phase, RespawnPhase::Idle) && position.y < self.fall_threshold_y
    }

    /// Starts the respawn delay; false when one is already pending.
    fn request(&mut self, now_seconds: f64) -> bool {
        if self.is_in_flight() {
            return false;
        }
        self.phase = RespawnPhase::InFlight;
        self.timer.trigger(now_seconds, self.delay_seconds);
        true
    }

    /// True once when the delay has elapsed. The caller performs the
    /// actual re-placement and state reset.
    fn poll(&mut self, now_seconds: f64) -> bool {
        if !self.timer.poll_expired(now_seconds) {
            return false;
        }
        self.phase = RespawnPhase::Idle;
        true
    }

    fn respawn_point(&self) -> Vec3 {
        self.respawn_point
    }

    fn set_respawn_point(&mut self, point: Vec3) {
        self.respawn_point = point;
    }
}
