//! Slider action vocabulary: the closed set of codes the handler accepts.
//!
//! The host framework identifies each slider position by a small integer in
//! a device-specific enumeration. The torch positions are 20 (off), 21 (on)
//! and 22 (blink); everything else belongs to other handlers.

use std::fmt;

/// Identifier the slider framework registers the torch handler under.
pub const HANDLER_ID: u32 = 2;

/// Slider position: torch off.
pub const ACTION_TORCH_OFF: i32 = 20;
/// Slider position: torch on.
pub const ACTION_TORCH_ON: i32 = 21;
/// Slider position: torch blinking.
pub const ACTION_TORCH_BLINK: i32 = 22;

/// A recognized slider action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderAction {
    Off,
    On,
    Blink,
}

/// Raw action code outside the torch handler's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownAction(pub i32);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown slider action code: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl TryFrom<i32> for SliderAction {
    type Error = UnknownAction;

    fn try_from(code: i32) -> Result<Self, UnknownAction> {
        match code {
            ACTION_TORCH_OFF => Ok(SliderAction::Off),
            ACTION_TORCH_ON => Ok(SliderAction::On),
            ACTION_TORCH_BLINK => Ok(SliderAction::Blink),
            other => Err(UnknownAction(other)),
        }
    }
}

impl SliderAction {
    /// The raw action code this variant maps to.
    pub fn code(self) -> i32 {
        match self {
            SliderAction::Off => ACTION_TORCH_OFF,
            SliderAction::On => ACTION_TORCH_ON,
            SliderAction::Blink => ACTION_TORCH_BLINK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_actions() {
        assert_eq!(SliderAction::try_from(20), Ok(SliderAction::Off));
        assert_eq!(SliderAction::try_from(21), Ok(SliderAction::On));
        assert_eq!(SliderAction::try_from(22), Ok(SliderAction::Blink));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(SliderAction::try_from(0), Err(UnknownAction(0)));
        assert_eq!(SliderAction::try_from(19), Err(UnknownAction(19)));
        assert_eq!(SliderAction::try_from(23), Err(UnknownAction(23)));
        assert_eq!(SliderAction::try_from(99), Err(UnknownAction(99)));
        assert_eq!(SliderAction::try_from(-1), Err(UnknownAction(-1)));
    }

    #[test]
    fn code_round_trips() {
        for action in [SliderAction::Off, SliderAction::On, SliderAction::Blink] {
            assert_eq!(SliderAction::try_from(action.code()), Ok(action));
        }
    }

    #[test]
    fn handler_id_matches_the_slider_position() {
        assert_eq!(HANDLER_ID, 2);
    }

    #[test]
    fn unknown_action_display() {
        assert_eq!(
            UnknownAction(99).to_string(),
            "Unknown slider action code: 99"
        );
    }
}
