//! Recall quality for a single review.
use crate::error::ScheduleError;

/// SM-2 quality grade in `0..=5`.
///
/// - 0: complete blackout
/// - 1: incorrect, but the answer seemed familiar
/// - 2: incorrect, but the answer seemed easy to recall
/// - 3: correct with serious difficulty
/// - 4: correct after hesitation
/// - 5: perfect response
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Grade(u8);

impl Grade {
    pub const MAX: u8 = 5;
    pub const PASSING: u8 = 3;

    pub fn new(value: u8) -> Result<Self, ScheduleError> {
        if value > Self::MAX {
            return Err(ScheduleError::InvalidGrade(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 >= Self::PASSING
    }
}

impl TryFrom<u8> for Grade {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Grade::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_full_range() {
        for value in 0..=5 {
            assert_eq!(Grade::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(Grade::new(6), Err(ScheduleError::InvalidGrade(6)));
        assert_eq!(Grade::try_from(255), Err(ScheduleError::InvalidGrade(255)));
    }

    #[test]
    fn test_success_threshold() {
        assert!(!Grade::new(2).unwrap().is_success());
        assert!(Grade::new(3).unwrap().is_success());
    }
}
