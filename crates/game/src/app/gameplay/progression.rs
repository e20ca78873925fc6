/// World-side consequences of the pickup count crossing a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressionAction {
    DeactivateObstacle,
    SwapEnemyTiers,
    DeclareVictory,
}

/// Fires each count threshold at most once, comparing with `>=` so a
/// crossing is never missed even if the count jumps past a threshold
/// in a single change.
#[derive(Debug)]
struct LevelProgressionHooks {
    mid_count_threshold: u32,
    max_count_threshold: u32,
    mid_applied: bool,
    max_applied: bool,
}

impl LevelProgressionHooks {
    fn new(mid_count_threshold: u32, max_count_threshold: u32) -> Self {
        Self {
            mid_count_threshold,
            max_count_threshold,
            mid_applied: false,
            max_applied: false,
        }
    }

    fn on_count_changed(&mut self, pickup_count: u32) -> Vec<ProgressionAction> {
        let mut actions = Vec::new();
        if !self.mid_applied && pickup_count >= self.mid_count_threshold {
            self.mid_applied = true;
            actions.push(ProgressionAction::DeactivateObstacle);
            actions.push(ProgressionAction::SwapEnemyTiers);
        }
        if !self.max_applied && pickup_count >= self.max_count_threshold {
            self.max_applied = true;
            actions.push(ProgressionAction::DeclareVictory);
        }
        actions
    }

    fn victory_declared(&self) -> bool {
        self.max_applied
    }
}
