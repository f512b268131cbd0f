//! Classification types: intents, business domains, and classifier outcomes.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed set of intents the system understands.
///
/// The primary classifier may return any string; values outside the known
/// set are preserved in `Other` rather than dropped, so downstream
/// templating can still label the workflow with whatever the model said.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Intent {
    HrOnboarding,
    HrOffboarding,
    ItTicket,
    ItPasswordReset,
    FinanceExpense,
    FinanceApproval,
    MeetingSchedule,
    GeneralQuery,
    /// Any intent string not in the known set
    Other(String),
}

impl Intent {
    /// Wire representation (matches the stored record format)
    pub fn as_str(&self) -> &str {
        match self {
            Self::HrOnboarding => "HR_Onboarding",
            Self::HrOffboarding => "HR_Offboarding",
            Self::ItTicket => "IT_Ticket",
            Self::ItPasswordReset => "IT_Password_Reset",
            Self::FinanceExpense => "Finance_Expense",
            Self::FinanceApproval => "Finance_Approval",
            Self::MeetingSchedule => "Meeting_Schedule",
            Self::GeneralQuery => "General_Query",
            Self::Other(s) => s,
        }
    }

    /// All known intent names, in the order the classification prompt lists them
    pub const KNOWN: [&'static str; 8] = [
        "HR_Onboarding",
        "HR_Offboarding",
        "IT_Ticket",
        "IT_Password_Reset",
        "Finance_Expense",
        "Finance_Approval",
        "Meeting_Schedule",
        "General_Query",
    ];
}

impl From<&str> for Intent {
    fn from(s: &str) -> Self {
        match s {
            "HR_Onboarding" => Self::HrOnboarding,
            "HR_Offboarding" => Self::HrOffboarding,
            "IT_Ticket" => Self::ItTicket,
            "IT_Password_Reset" => Self::ItPasswordReset,
            "Finance_Expense" => Self::FinanceExpense,
            "Finance_Approval" => Self::FinanceApproval,
            "Meeting_Schedule" => Self::MeetingSchedule,
            "General_Query" => Self::GeneralQuery,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::GeneralQuery
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Intent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Intent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Intent::from(s.as_str()))
    }
}

/// Business domain a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkDomain {
    Hr,
    It,
    Finance,
    General,
}

impl WorkDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hr => "HR",
            Self::It => "IT",
            Self::Finance => "Finance",
            Self::General => "General",
        }
    }
}

impl From<&str> for WorkDomain {
    fn from(s: &str) -> Self {
        match s {
            "HR" => Self::Hr,
            "IT" => Self::It,
            "Finance" => Self::Finance,
            // Unknown domains from the model collapse to General
            _ => Self::General,
        }
    }
}

impl Default for WorkDomain {
    fn default() -> Self {
        Self::General
    }
}

impl fmt::Display for WorkDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WorkDomain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkDomain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(WorkDomain::from(s.as_str()))
    }
}

/// Result of classifying a natural-language command.
///
/// All fields except `intent` default when absent, so a sparse-but-parsable
/// model response still deserializes. `confidence` is advisory only and
/// never gates control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub intent: Intent,

    #[serde(default)]
    pub entities: HashMap<String, String>,

    #[serde(default)]
    pub confidence: f64,

    #[serde(default)]
    pub domain: WorkDomain,
}

/// Why the primary classifier was bypassed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum DegradeReason {
    /// The model call itself failed (network, quota, service error)
    Transport(String),

    /// The model responded but its output was not parsable
    Parse(String),
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(detail) => write!(f, "model call failed: {}", detail),
            Self::Parse(detail) => write!(f, "model output unparsable: {}", detail),
        }
    }
}

/// Outcome of a classification attempt.
///
/// Degradation is never an error: the caller always gets a usable
/// classification, but can observe whether the keyword fallback produced it.
#[derive(Debug, Clone)]
pub enum ClassifierOutcome {
    /// The model classified the command
    Primary(Classification),

    /// The keyword fallback classified the command
    Degraded {
        classification: Classification,
        reason: DegradeReason,
    },
}

impl ClassifierOutcome {
    pub fn classification(&self) -> &Classification {
        match self {
            Self::Primary(c) => c,
            Self::Degraded { classification, .. } => classification,
        }
    }

    pub fn into_classification(self) -> Classification {
        match self {
            Self::Primary(c) => c,
            Self::Degraded { classification, .. } => classification,
        }
    }

    pub fn degrade_reason(&self) -> Option<&DegradeReason> {
        match self {
            Self::Primary(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}
