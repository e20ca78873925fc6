#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountdownOutcome {
    Running,
    Expired(DeathTransition),
}

/// The player's coarse-mode state machine. Owns the pickup count, the
/// countdown, and the death-presentation wait; everything else reads
/// its guards. Dead -> Active happens only through `reset`, driven by
/// the respawn coordinator.
#[derive(Debug)]
struct PlayerLifecycle {
    state: LifecycleState,
    frozen: bool,
    pickup_count: u32,
    remaining_seconds: f32,
    time_expired: bool,
    pickup_time_bonus_seconds: f32,
    death_wait_seconds: f32,
    death_wait: EffectTimer,
}

impl PlayerLifecycle {
    fn new(
        initial_countdown_seconds: f32,
        pickup_time_bonus_seconds: f32,
        death_wait_seconds: f32,
    ) -> Self {
        Self {
            state: LifecycleState::Active,
            frozen: false,
            pickup_count: 0,
            remaining_seconds: initial_countdown_seconds,
            time_expired: false,
            pickup_time_bonus_seconds,
            death_wait_seconds,
            death_wait: EffectTimer::idle(),
        }
    }

    /// Operations are permitted only while Active and not frozen by a
    /// victory.
    fn is_active(&self) -> bool {
        matches!(self.state, LifecycleState::Active) && !self.frozen
    }

    fn state(&self) -> LifecycleState {
        self.state
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn pickup_count(&self) -> u32 {
        self.pickup_count
    }

    fn remaining_seconds(&self) -> f32 {
        self.remaining_seconds
    }

    fn time_expired(&self) -> bool {
        self.time_expired
    }

    /// Victory terminally freezes the machine; no later operation has
    /// any effect, including an erroneous further pickup.
    fn freeze(&mut self) {
        self.frozen = true;
    }

    fn on_pickup(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.pickup_count = self.pickup_count.saturating_add(1);
        self.remaining_seconds += self.pickup_time_bonus_seconds;
        true
    }

    fn on_fatal_contact(&mut self, now_seconds: f64, presentation_attached: bool) -> DeathTransition {
        if !self.is_active() {
            return DeathTransition::Ignored;
        }
        self.state = LifecycleState::Dead;
        if presentation_attached {
            self.death_wait.trigger(now_seconds, self.death_wait_seconds);
            DeathTransition::PresentationWait
        } else {
            DeathTransition::DisableNow
        }
    }

    fn tick_countdown(
        &mut self,
        dt_seconds: f32,
        now_seconds: f64,
        presentation_attached: bool,
    ) -> CountdownOutcome {
        if !self.is_active() {
            return CountdownOutcome::Running;
        }
        self.remaining_seconds -= dt_seconds;
        if self.remaining_seconds > 0.0 {
            return CountdownOutcome::Running;
        }
        self.time_expired = true;
        CountdownOutcome::Expired(self.on_fatal_contact(now_seconds, presentation_attached))
    }

    /// True once when the death presentation wait has elapsed; the
    /// caller then disables the entity and requests the respawn.
    fn poll_death_wait(&mut self, now_seconds: f64) -> bool {
        self.death_wait.poll_expired(now_seconds)
    }

    /// Dead -> Active re-initialization. Pickup count and countdown
    /// are preserved: death is a setback, not a restart of progress.
    fn reset(&mut self) {
        self.state = LifecycleState::Active;
        self.time_expired = false;
        self.death_wait.cancel_pending();
    }
}
