//! Keyboard schemes. The browser hands us `KeyboardEvent.code` strings.

use serde::{Deserialize, Serialize};

use super::entity::Direction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    #[default]
    Arrows,
    Wasd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    Move(Direction),
    Attack,
}

impl ControlScheme {
    pub const ALL: [ControlScheme; 2] = [ControlScheme::Arrows, ControlScheme::Wasd];

    pub fn label(self) -> &'static str {
        match self {
            ControlScheme::Arrows => "Arrow keys + Space",
            ControlScheme::Wasd => "WASD + Space",
        }
    }

    /// Stable identifier used by the settings select element.
    pub fn key(self) -> &'static str {
        match self {
            ControlScheme::Arrows => "arrows",
            ControlScheme::Wasd => "wasd",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn map_key(self, code: &str) -> Option<InputCommand> {
        use Direction::*;
        let dir = match (self, code) {
            (_, "Space") => return Some(InputCommand::Attack),
            (ControlScheme::Arrows, "ArrowLeft") | (ControlScheme::Wasd, "KeyA") => Left,
            (ControlScheme::Arrows, "ArrowRight") | (ControlScheme::Wasd, "KeyD") => Right,
            (ControlScheme::Arrows, "ArrowUp") | (ControlScheme::Wasd, "KeyW") => Up,
            (ControlScheme::Arrows, "ArrowDown") | (ControlScheme::Wasd, "KeyS") => Down,
            _ => return None,
        };
        Some(InputCommand::Move(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ControlScheme::Arrows, "ArrowUp", Some(InputCommand::Move(Direction::Up)))]
    #[case(ControlScheme::Arrows, "KeyW", None)]
    #[case(ControlScheme::Wasd, "KeyW", Some(InputCommand::Move(Direction::Up)))]
    #[case(ControlScheme::Wasd, "KeyA", Some(InputCommand::Move(Direction::Left)))]
    #[case(ControlScheme::Wasd, "ArrowLeft", None)]
    #[case(ControlScheme::Wasd, "Space", Some(InputCommand::Attack))]
    #[case(ControlScheme::Arrows, "Space", Some(InputCommand::Attack))]
    #[case(ControlScheme::Arrows, "Enter", None)]
    fn maps_keys_per_scheme(
        #[case] scheme: ControlScheme,
        #[case] code: &str,
        #[case] expected: Option<InputCommand>,
    ) {
        assert_eq!(scheme.map_key(code), expected);
    }

    #[test]
    fn scheme_keys_round_trip() {
        for scheme in ControlScheme::ALL {
            assert_eq!(ControlScheme::from_key(scheme.key()), Some(scheme));
        }
        assert_eq!(ControlScheme::from_key("joystick"), None);
    }
}
