use super::session::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Quit,
}

const ACTION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    /// Movement intent from the four directional actions, clamped to
    /// unit magnitude so diagonals are not faster than cardinals.
    pub(crate) fn intent_vector(&self) -> Vec2 {
        let mut x = 0.0f32;
        let mut y = 0.0f32;

        if self.is_down(InputAction::MoveRight) {
            x += 1.0;
        }
        if self.is_down(InputAction::MoveLeft) {
            x -= 1.0;
        }
        if self.is_down(InputAction::MoveUp) {
            y += 1.0;
        }
        if self.is_down(InputAction::MoveDown) {
            y -= 1.0;
        }

        clamp_intent(Vec2 { x, y })
    }
}

pub(crate) fn clamp_intent(raw: Vec2) -> Vec2 {
    let len_sq = raw.x * raw.x + raw.y * raw.y;
    if len_sq > 1.0 {
        let inv_len = len_sq.sqrt().recip();
        Vec2 {
            x: raw.x * inv_len,
            y: raw.y * inv_len,
        }
    } else {
        raw
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Quit => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_query_round_trip() {
        let mut states = ActionStates::default();
        states.set(InputAction::MoveLeft, true);

        assert!(states.is_down(InputAction::MoveLeft));
        assert!(!states.is_down(InputAction::MoveRight));

        states.set(InputAction::MoveLeft, false);
        assert!(!states.is_down(InputAction::MoveLeft));
    }

    #[test]
    fn diagonal_intent_is_unit_length() {
        let mut states = ActionStates::default();
        states.set(InputAction::MoveUp, true);
        states.set(InputAction::MoveRight, true);

        let intent = states.intent_vector();
        let magnitude = (intent.x * intent.x + intent.y * intent.y).sqrt();
        assert!((magnitude - 1.0).abs() < 0.0001);
    }

    #[test]
    fn opposing_actions_cancel() {
        let mut states = ActionStates::default();
        states.set(InputAction::MoveUp, true);
        states.set(InputAction::MoveDown, true);

        let intent = states.intent_vector();
        assert_eq!(intent.x, 0.0);
        assert_eq!(intent.y, 0.0);
    }

    #[test]
    fn sub_unit_analog_intent_is_preserved() {
        let intent = clamp_intent(Vec2 { x: 0.3, y: 0.4 });
        assert!((intent.x - 0.3).abs() < 0.0001);
        assert!((intent.y - 0.4).abs() < 0.0001);
    }

    #[test]
    fn oversized_analog_intent_is_normalized() {
        let intent = clamp_intent(Vec2 { x: 3.0, y: 4.0 });
        let magnitude = (intent.x * intent.x + intent.y * intent.y).sqrt();
        assert!((magnitude - 1.0).abs() < 0.0001);
        assert!((intent.x - 0.6).abs() < 0.0001);
    }
}
