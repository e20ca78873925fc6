#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifecycleState {
    Active,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RespawnPhase {
    Idle,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoostPhase {
    Idle,
    Active,
}

/// Outcome of an Active -> Dead trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeathTransition {
    /// Already Dead or frozen; the trigger is a guarded no-op.
    Ignored,
    /// Dead now; the entity stays up until the death presentation
    /// wait expires.
    PresentationWait,
    /// Dead now and no presentation layer is attached; disable and
    /// request respawn in the same tick.
    DisableNow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PresentationSignal {
    Moving(bool),
    Died,
    Won,
}

/// External presentation layer. Entirely optional; every call site
/// degrades to a skip when no sink is attached.
pub(crate) trait PresentationSink {
    fn signal(&mut self, signal: PresentationSignal);
    fn set_count_text(&mut self, text: &str);
    fn set_timer_text(&mut self, text: &str);
    fn set_banner(&mut self, banner: Option<&str>);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SignalCounts {
    pub(crate) moving_started: u32,
    pub(crate) moving_stopped: u32,
    pub(crate) died: u32,
    pub(crate) won: u32,
}

impl SignalCounts {
    fn record(&mut self, signal: PresentationSignal) {
        match signal {
            PresentationSignal::Moving(true) => {
                self.moving_started = self.moving_started.saturating_add(1)
            }
            PresentationSignal::Moving(false) => {
                self.moving_stopped = self.moving_stopped.saturating_add(1)
            }
            PresentationSignal::Died => self.died = self.died.saturating_add(1),
            PresentationSignal::Won => self.won = self.won.saturating_add(1),
        }
    }
}

/// Cumulative record of the discrete presentation triggers, kept even
/// when no sink is attached so exactly-once contracts stay observable.
#[derive(Debug, Default)]
struct SignalBus {
    total_counts: SignalCounts,
}

impl SignalBus {
    fn emit(&mut self, signal: PresentationSignal) {
        self.total_counts.record(signal);
    }

    fn total_counts(&self) -> SignalCounts {
        self.total_counts
    }
}
