/// Temporary speed multiplier with a visual-trail side effect, built
/// on the one-shot effect timer. Re-activation while the boost is
/// live extends the window for the full duration without stacking the
/// multiplier.
#[derive(Debug)]
struct BoostCoordinator {
    phase: BoostPhase,
    // Snapshot of the unboosted base speed, written exactly once here
    // and never again; every revert restores from it.
    original_speed: f32,
    multiplier: f32,
    duration_seconds: f32,
    effective_speed: f32,
    trail_active: bool,
    timer: EffectTimer,
}

impl BoostCoordinator {
    fn new(base_speed: f32, multiplier: f32, duration_seconds: f32) -> Self {
        Self {
            phase: BoostPhase::Idle,
            original_speed: base_speed,
            multiplier,
            duration_seconds,
            effective_speed: base_speed,
            trail_active: false,
            timer: EffectTimer::idle(),
        }
    }

    fn activate(&mut self, now_seconds: f64) -> EffectTrigger {
        let trigger = self.timer.trigger(now_seconds, self.duration_seconds);
        if matches!(trigger, EffectTrigger::Applied) {
            self.phase = BoostPhase::Active;
            self.trail_active = true;
            self.effective_speed = self.original_speed * self.multiplier;
        }
        trigger
    }

    /// True once when the boost window has elapsed and the revert ran.
    fn poll(&mut self, now_seconds: f64) -> bool {
        if !self.timer.poll_expired(now_seconds) {
            return false;
        }
        self.phase = BoostPhase::Idle;
        self.trail_active = false;
        self.effective_speed = self.original_speed;
        true
    }

    fn is_boosted(&self) -> bool {
        matches!(self.phase, BoostPhase::Active)
    }

    fn effective_speed(&self) -> f32 {
        self.effective_speed
    }

    fn trail_active(&self) -> bool {
        self.trail_active
    }
}
