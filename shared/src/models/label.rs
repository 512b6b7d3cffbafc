//! Task label vocabulary
//!
//! The selection UI only offers these six values. Out-of-vocabulary strings
//! are still accepted on task writes, so stored `labels` stay plain strings
//! and this enum is the canonical list the UI draws from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed label vocabulary offered by the task editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Urgent,
    High,
    Low,
    Bug,
    Feature,
    Review,
}

impl Label {
    /// All labels, in the order the UI presents them
    pub const ALL: [Label; 6] = [
        Label::Urgent,
        Label::High,
        Label::Low,
        Label::Bug,
        Label::Feature,
        Label::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Urgent => "Urgent",
            Label::High => "High",
            Label::Low => "Low",
            Label::Bug => "Bug",
            Label::Feature => "Feature",
            Label::Review => "Review",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for strings outside the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Urgent" => Ok(Label::Urgent),
            "High" => Ok(Label::High),
            "Low" => Ok(Label::Low),
            "Bug" => Ok(Label::Bug),
            "Feature" => Ok(Label::Feature),
            "Review" => Ok(Label::Review),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_label() {
        for label in Label::ALL {
            assert_eq!(label.as_str().parse::<Label>().unwrap(), label);
        }
    }

    #[test]
    fn rejects_unknown_strings() {
        assert!("Critical".parse::<Label>().is_err());
        assert!("urgent".parse::<Label>().is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        assert_eq!(
            serde_json::to_string(&Label::Feature).unwrap(),
            "\"Feature\""
        );
    }
}
