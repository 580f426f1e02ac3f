use serde::{Deserialize, Serialize};

/// Move and rotate signals asserted during one tick.
///
/// Signals are sampled, not queued: a key held across several ticks is
/// reported on each of them. Within a tick the session applies them in a
/// fixed order: rotate clockwise, rotate counterclockwise, shift left, shift
/// right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_clockwise: bool,
    pub rotate_counter_clockwise: bool,
    pub move_left: bool,
    pub move_right: bool,
}

impl TickInput {
    /// No signal asserted.
    pub const NONE: Self = Self {
        rotate_clockwise: false,
        rotate_counter_clockwise: false,
        move_left: false,
        move_right: false,
    };
}

/// How simultaneously asserted signals are combined within a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputResolution {
    /// Every asserted signal is attempted, each validated on its own.
    #[default]
    ApplyAll,
    /// At most one rotation and one shift per tick. Clockwise wins over
    /// counterclockwise and left wins over right.
    OnePerClass,
}

impl InputResolution {
    #[must_use]
    pub fn resolve(self, input: TickInput) -> TickInput {
        match self {
            InputResolution::ApplyAll => input,
            InputResolution::OnePerClass => TickInput {
                rotate_counter_clockwise: input.rotate_counter_clockwise
                    && !input.rotate_clockwise,
                move_right: input.move_right && !input.move_left,
                ..input
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: TickInput = TickInput {
        rotate_clockwise: true,
        rotate_counter_clockwise: true,
        move_left: true,
        move_right: true,
    };

    #[test]
    fn test_apply_all_keeps_every_signal() {
        assert_eq!(InputResolution::ApplyAll.resolve(ALL), ALL);
    }

    #[test]
    fn test_one_per_class_prefers_first_signal() {
        let resolved = InputResolution::OnePerClass.resolve(ALL);
        assert_eq!(
            resolved,
            TickInput {
                rotate_clockwise: true,
                rotate_counter_clockwise: false,
                move_left: true,
                move_right: false,
            }
        );
    }

    #[test]
    fn test_one_per_class_keeps_lone_signals() {
        let input = TickInput {
            rotate_counter_clockwise: true,
            move_right: true,
            ..TickInput::NONE
        };
        assert_eq!(InputResolution::OnePerClass.resolve(input), input);
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(TickInput::default(), TickInput::NONE);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&InputResolution::OnePerClass).unwrap();
        assert_eq!(json, "\"one-per-class\"");
    }
}
