use uuid::Uuid;

/// Selection state for recording an actual completion on the active date.
///
/// At most one habit is armed at a time. Arming is only legal for a habit
/// that has no record yet on the active date; creating the record, an
/// explicit cancel, or navigating to another date all return to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkingMode {
    #[default]
    Idle,
    Marking {
        habit_id: Uuid,
    },
}

impl MarkingMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, MarkingMode::Idle)
    }

    pub fn armed_habit(&self) -> Option<Uuid> {
        match self {
            MarkingMode::Idle => None,
            MarkingMode::Marking { habit_id } => Some(*habit_id),
        }
    }

    /// Arm a habit for recording. Ignored when the habit already has a
    /// record on the active date; re-selecting replaces any armed habit.
    pub fn select(self, habit_id: Uuid, already_recorded: bool) -> Self {
        if already_recorded {
            return self;
        }
        MarkingMode::Marking { habit_id }
    }

    pub fn cancel(self) -> Self {
        MarkingMode::Idle
    }

    /// The armed habit's record was created.
    pub fn recorded(self) -> Self {
        MarkingMode::Idle
    }

    /// Navigating to another calendar date disarms.
    pub fn navigate(self) -> Self {
        MarkingMode::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_arms_only_unrecorded_habits() {
        let habit = Uuid::new_v4();

        let armed = MarkingMode::Idle.select(habit, false);
        assert_eq!(armed.armed_habit(), Some(habit));

        let still_idle = MarkingMode::Idle.select(habit, true);
        assert!(still_idle.is_idle());
    }

    #[test]
    fn reselect_replaces_armed_habit() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let mode = MarkingMode::Idle.select(first, false).select(second, false);
        assert_eq!(mode.armed_habit(), Some(second));
    }

    #[test]
    fn all_exits_return_to_idle() {
        let habit = Uuid::new_v4();
        assert!(MarkingMode::Idle.select(habit, false).recorded().is_idle());
        assert!(MarkingMode::Idle.select(habit, false).cancel().is_idle());
        assert!(MarkingMode::Idle.select(habit, false).navigate().is_idle());
    }
}
