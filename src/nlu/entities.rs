//! Heuristic entity extraction from command text.
//!
//! Each entity kind has an independent heuristic; a miss simply omits the
//! entry. Extraction is pure and deterministic.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Job roles recognized by the role heuristic
const ROLE_VOCABULARY: [&str; 6] = [
    "developer",
    "engineer",
    "manager",
    "analyst",
    "designer",
    "intern",
];

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Maximal run of two or more capitalized words
    RE.get_or_init(|| Regex::new(r"[A-Z][a-z]+(?: [A-Z][a-z]+)+").unwrap())
}

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Optional leading $, decimal with optional two-digit fraction
    RE.get_or_init(|| Regex::new(r"\$?(\d+(?:\.\d{2})?)").unwrap())
}

/// Entity kinds the classifiers may request.
///
/// Only some kinds have heuristics today; the rest are explicit
/// placeholders that never produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    EmployeeName,
    Amount,
    Role,
    StartDate,
    IssueType,
    Priority,
    Description,
    Category,
    Date,
    Time,
    Attendees,
    Subject,
}

impl EntityKind {
    /// Key used in entity mappings and stored records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmployeeName => "employee_name",
            Self::Amount => "amount",
            Self::Role => "role",
            Self::StartDate => "start_date",
            Self::IssueType => "issue_type",
            Self::Priority => "priority",
            Self::Description => "description",
            Self::Category => "category",
            Self::Date => "date",
            Self::Time => "time",
            Self::Attendees => "attendees",
            Self::Subject => "subject",
        }
    }

    /// Apply this kind's heuristic to the text
    fn extract_from(&self, text: &str) -> Option<String> {
        match self {
            // A command verb at a sentence start is capitalized too ("Pay
            // John Smith"), so the run can start with a non-name word; the
            // last two words of the first run are the name.
            Self::EmployeeName => name_regex().find(text).map(|m| {
                let words: Vec<&str> = m.as_str().split(' ').collect();
                words[words.len() - 2..].join(" ")
            }),

            // Normalized to a leading $ whether or not the source had one
            Self::Amount => amount_regex()
                .captures(text)
                .map(|caps| format!("${}", &caps[1])),

            Self::Role => {
                let lower = text.to_lowercase();
                ROLE_VOCABULARY
                    .into_iter()
                    .find(|role| lower.contains(*role))
                    .map(title_case)
            }

            // No heuristic yet for the remaining kinds
            Self::StartDate
            | Self::IssueType
            | Self::Priority
            | Self::Description
            | Self::Category
            | Self::Date
            | Self::Time
            | Self::Attendees
            | Self::Subject => None,
        }
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Extract the requested entity kinds from free text.
///
/// Kinds whose heuristic finds nothing are omitted; the result may be empty
/// but is never an error.
pub fn extract(text: &str, wanted: &[EntityKind]) -> HashMap<String, String> {
    let mut entities = HashMap::new();

    for kind in wanted {
        if let Some(value) = kind.extract_from(text) {
            entities.insert(kind.as_str().to_string(), value);
        }
    }

    entities
}
