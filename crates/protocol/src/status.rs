//! Gate status shared by evaluations, reports and promotions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Outcome of a quality gate evaluation.
///
/// Serialized as `PASSED`, `FAILED`, `PENDING` or `UNKNOWN`. Any other
/// string found in a document deserializes to [`GateStatus::Unknown`] so
/// that a document written by a different tool version still loads.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    /// Every gate passed.
    Passed,

    /// At least one gate failed.
    Failed,

    /// Evaluation has not completed yet.
    Pending,

    /// Status could not be determined.
    Unknown,
}

impl GateStatus {
    /// Wire representation of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            GateStatus::Passed => "PASSED",
            GateStatus::Failed => "FAILED",
            GateStatus::Pending => "PENDING",
            GateStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn is_passed(self) -> bool {
        matches!(self, GateStatus::Passed)
    }

    /// Parses a status label; unrecognised labels become `Unknown`.
    ///
    /// Matching is exact. `passed` or ` PASSED ` is not a passing status.
    pub fn from_label(label: &str) -> Self {
        match label {
            "PASSED" => GateStatus::Passed,
            "FAILED" => GateStatus::Failed,
            "PENDING" => GateStatus::Pending,
            _ => GateStatus::Unknown,
        }
    }

    /// `Passed` when `passed` is true, `Failed` otherwise.
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            GateStatus::Passed
        } else {
            GateStatus::Failed
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GateStatus::from_label(s))
    }
}

impl<'de> Deserialize<'de> for GateStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(GateStatus::from_label(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_labels() {
        assert_eq!("PASSED".parse::<GateStatus>(), Ok(GateStatus::Passed));
        assert_eq!("FAILED".parse::<GateStatus>(), Ok(GateStatus::Failed));
        assert_eq!("PENDING".parse::<GateStatus>(), Ok(GateStatus::Pending));
    }

    #[test]
    fn test_parse_rejects_other_spellings() {
        assert_eq!("passed".parse::<GateStatus>(), Ok(GateStatus::Unknown));
        assert_eq!(" PASSED ".parse::<GateStatus>(), Ok(GateStatus::Unknown));
        assert_eq!("Passed".parse::<GateStatus>(), Ok(GateStatus::Unknown));
    }

    #[test]
    fn test_unrecognised_status_is_unknown() {
        let status: GateStatus = serde_json::from_str("\"ERRORED\"").unwrap();
        assert_eq!(status, GateStatus::Unknown);
    }

    #[test]
    fn test_from_passed() {
        assert_eq!(GateStatus::from_passed(true), GateStatus::Passed);
        assert_eq!(GateStatus::from_passed(false), GateStatus::Failed);
        assert!(!GateStatus::Pending.is_passed());
    }
}
