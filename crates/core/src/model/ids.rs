use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One-based number of a stage.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StageNumber(u32);

impl StageNumber {
    /// The first stage, always unlocked.
    pub const FIRST: Self = Self(1);

    /// Creates a new `StageNumber`, rejecting zero.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The stage after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl TryFrom<u32> for StageNumber {
    type Error = ParseStageNumberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ParseStageNumberError::Zero)
    }
}

impl From<StageNumber> for u32 {
    fn from(value: StageNumber) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseStageNumberError {
    #[error("stage numbers start at 1")]
    Zero,
    #[error("invalid stage number: {0}")]
    Invalid(String),
}

impl FromStr for StageNumber {
    type Err = ParseStageNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| ParseStageNumberError::Invalid(s.to_owned()))?;
        Self::try_from(value)
    }
}

impl fmt::Debug for StageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StageNumber({})", self.0)
    }
}

impl fmt::Display for StageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(StageNumber::new(0).is_none());
        assert_eq!("0".parse::<StageNumber>(), Err(ParseStageNumberError::Zero));
    }

    #[test]
    fn parses_and_displays() {
        let stage: StageNumber = " 12 ".parse().unwrap();
        assert_eq!(stage.value(), 12);
        assert_eq!(stage.to_string(), "12");
        assert_eq!(stage.next().value(), 13);
        assert!("twelve".parse::<StageNumber>().is_err());
    }
}
