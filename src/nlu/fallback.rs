//! Keyword-based fallback classifier.
//!
//! Used whenever the model-backed classifier is unavailable or unparsable.
//! Branches are tested in a fixed priority order; the first matching keyword
//! set wins even when several would match.

use std::collections::HashMap;

use crate::domain::{Classification, Intent, WorkDomain};

use super::entities::{self, EntityKind};

/// Confidence assigned when a keyword set matches
const KEYWORD_CONFIDENCE: f64 = 0.8;

/// Confidence assigned to the catch-all General_Query branch
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Keyword branches in priority order
const BRANCHES: [KeywordBranch; 4] = [
    KeywordBranch {
        keywords: &["onboard", "hire", "new employee", "join"],
        intent: Intent::HrOnboarding,
        domain: WorkDomain::Hr,
        wanted: &[EntityKind::EmployeeName, EntityKind::Role, EntityKind::StartDate],
    },
    KeywordBranch {
        keywords: &["ticket", "issue", "problem", "bug", "error"],
        intent: Intent::ItTicket,
        domain: WorkDomain::It,
        wanted: &[EntityKind::IssueType, EntityKind::Priority, EntityKind::Description],
    },
    KeywordBranch {
        keywords: &["expense", "reimburse", "receipt", "payment"],
        intent: Intent::FinanceExpense,
        domain: WorkDomain::Finance,
        wanted: &[EntityKind::Amount, EntityKind::Category, EntityKind::Description],
    },
    KeywordBranch {
        keywords: &["meeting", "schedule", "calendar", "appointment"],
        intent: Intent::MeetingSchedule,
        domain: WorkDomain::General,
        wanted: &[
            EntityKind::Date,
            EntityKind::Time,
            EntityKind::Attendees,
            EntityKind::Subject,
        ],
    },
];

struct KeywordBranch {
    keywords: &'static [&'static str],
    intent: Intent,
    domain: WorkDomain,
    wanted: &'static [EntityKind],
}

/// Classify a command by keyword matching.
///
/// Always succeeds; text matching no branch becomes a low-confidence
/// `General_Query`.
pub fn classify(text: &str) -> Classification {
    let lower = text.to_lowercase();

    for branch in &BRANCHES {
        if branch.keywords.iter().any(|kw| lower.contains(kw)) {
            return Classification {
                intent: branch.intent.clone(),
                entities: entities::extract(text, branch.wanted),
                confidence: KEYWORD_CONFIDENCE,
                domain: branch.domain,
            };
        }
    }

    Classification {
        intent: Intent::GeneralQuery,
        entities: HashMap::new(),
        confidence: DEFAULT_CONFIDENCE,
        domain: WorkDomain::General,
    }
}
