/// Simulation-time clock advanced by the tick loop. All timed effects
/// measure against this, never against wall time, so a paused or
/// stepped simulation pauses its pending effects with it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimTimeline {
    elapsed_seconds: f64,
}

impl SimTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt_seconds: f32) {
        self.elapsed_seconds += dt_seconds.max(0.0) as f64;
    }

    pub fn now(&self) -> f64 {
        self.elapsed_seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTrigger {
    /// No instance was in flight; the caller must apply the effect now.
    Applied,
    /// An instance was already in flight; its pending expiry has been
    /// replaced by a fresh full-duration one. The caller must NOT
    /// re-apply the effect or re-snapshot any state captured at the
    /// first activation.
    Restarted,
}

/// One-shot cooperative timed effect: trigger now, expire once after a
/// duration of simulation time. Re-triggering while in flight restarts
/// the window instead of stacking a second instance. This is the only
/// place recurring "wait N seconds, then do X" logic lives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectTimer {
    deadline_seconds: Option<f64>,
}

impl EffectTimer {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.deadline_seconds.is_some()
    }

    pub fn trigger(&mut self, now_seconds: f64, duration_seconds: f32) -> EffectTrigger {
        let restarted = self.deadline_seconds.is_some();
        self.deadline_seconds = Some(now_seconds + duration_seconds.max(0.0) as f64);
        if restarted {
            EffectTrigger::Restarted
        } else {
            EffectTrigger::Applied
        }
    }

    /// Fires true exactly once at or after the deadline. Expiry may
    /// overshoot by up to one tick; there are no retries.
    pub fn poll_expired(&mut self, now_seconds: f64) -> bool {
        match self.deadline_seconds {
            Some(deadline) if now_seconds >= deadline => {
                self.deadline_seconds = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel_pending(&mut self) {
        self.deadline_seconds = None;
    }

    pub fn remaining_seconds(&self, now_seconds: f64) -> Option<f64> {
        self.deadline_seconds
            .map(|deadline| (deadline - now_seconds).max(0.0))
    }
}
