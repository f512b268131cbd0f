//! Workflow templates keyed by intent.
//!
//! Pure lookup: each known intent maps to a title rule, a description rule,
//! and an ordered step list. Anything else, including intents the model
//! invented, falls through to a generic two-step template.

use std::collections::HashMap;

use crate::domain::{Intent, WorkflowStep};

fn entity_or<'a>(entities: &'a HashMap<String, String>, key: &str, default: &'a str) -> &'a str {
    entities.get(key).map(String::as_str).unwrap_or(default)
}

/// Title for a workflow, substituting an entity with a named default
pub fn title(intent: &Intent, entities: &HashMap<String, String>) -> String {
    match intent {
        Intent::HrOnboarding => format!(
            "Employee Onboarding - {}",
            entity_or(entities, "employee_name", "New Employee")
        ),
        Intent::ItTicket => format!(
            "IT Support Ticket - {}",
            entity_or(entities, "issue_type", "Technical Issue")
        ),
        Intent::FinanceExpense => format!(
            "Expense Report - {}",
            entity_or(entities, "description", "Business Expense")
        ),
        Intent::MeetingSchedule => format!(
            "Schedule Meeting - {}",
            entity_or(entities, "subject", "Meeting")
        ),
        other => format!("Workflow - {}", other),
    }
}

/// Description for a workflow
pub fn description(intent: &Intent, entities: &HashMap<String, String>) -> String {
    match intent {
        Intent::HrOnboarding => format!(
            "Setting up accounts, scheduling orientation, and preparing workspace for {}.",
            entity_or(entities, "role", "new role")
        ),
        Intent::ItTicket => format!(
            "Investigating and resolving {}.",
            entity_or(entities, "description", "technical issue")
        ),
        Intent::FinanceExpense => format!(
            "Processing expense report for {}.",
            entity_or(entities, "amount", "business expense")
        ),
        Intent::MeetingSchedule => "Scheduling meeting and sending calendar invites.".to_string(),
        _ => "Processing workflow request.".to_string(),
    }
}

/// Ordered step template for a workflow
pub fn steps(intent: &Intent) -> Vec<WorkflowStep> {
    let names: &[&str] = match intent {
        Intent::HrOnboarding => &[
            "Create employee record",
            "Setup IT accounts",
            "Schedule orientation",
            "Prepare workspace",
            "Send welcome email",
        ],
        Intent::ItTicket => &[
            "Ticket creation",
            "Issue assessment",
            "Assign technician",
            "Resolve issue",
        ],
        Intent::FinanceExpense => &[
            "Expense validation",
            "Manager approval",
            "Finance review",
            "Payment processing",
        ],
        Intent::MeetingSchedule => &[
            "Check availability",
            "Book meeting room",
            "Send invitations",
            "Set up equipment",
        ],
        _ => &["Process request", "Complete workflow"],
    };

    names.iter().copied().map(WorkflowStep::pending).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StepState;

    fn entities(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_onboarding_title_with_entity() {
        let e = entities(&[("employee_name", "Jane Doe"), ("role", "Engineer")]);
        assert_eq!(
            title(&Intent::HrOnboarding, &e),
            "Employee Onboarding - Jane Doe"
        );
        assert_eq!(
            description(&Intent::HrOnboarding, &e),
            "Setting up accounts, scheduling orientation, and preparing workspace for Engineer."
        );
    }

    #[test]
    fn test_onboarding_defaults_when_entities_missing() {
        let e = HashMap::new();
        assert_eq!(
            title(&Intent::HrOnboarding, &e),
            "Employee Onboarding - New Employee"
        );
        assert_eq!(
            description(&Intent::HrOnboarding, &e),
            "Setting up accounts, scheduling orientation, and preparing workspace for new role."
        );
    }

    #[test]
    fn test_expense_templates() {
        let e = entities(&[("amount", "$250.00")]);
        assert_eq!(
            title(&Intent::FinanceExpense, &e),
            "Expense Report - Business Expense"
        );
        assert_eq!(
            description(&Intent::FinanceExpense, &e),
            "Processing expense report for $250.00."
        );
    }

    #[test]
    fn test_meeting_description_is_static() {
        let e = entities(&[("subject", "Quarterly Review")]);
        assert_eq!(
            title(&Intent::MeetingSchedule, &e),
            "Schedule Meeting - Quarterly Review"
        );
        assert_eq!(
            description(&Intent::MeetingSchedule, &e),
            "Scheduling meeting and sending calendar invites."
        );
    }

    #[test]
    fn test_generic_fallback_for_uncataloged_intents() {
        let e = HashMap::new();

        for intent in [
            Intent::GeneralQuery,
            Intent::HrOffboarding,
            Intent::ItPasswordReset,
            Intent::FinanceApproval,
            Intent::Other("Legal_Review".to_string()),
        ] {
            assert_eq!(title(&intent, &e), format!("Workflow - {}", intent));
            assert_eq!(description(&intent, &e), "Processing workflow request.");

            let steps = steps(&intent);
            assert_eq!(steps.len(), 2);
            assert_eq!(steps[0].name, "Process request");
            assert_eq!(steps[1].name, "Complete workflow");
        }
    }

    #[test]
    fn test_bespoke_step_lists() {
        assert_eq!(steps(&Intent::HrOnboarding).len(), 5);
        assert_eq!(steps(&Intent::ItTicket).len(), 4);
        assert_eq!(steps(&Intent::FinanceExpense).len(), 4);
        assert_eq!(steps(&Intent::MeetingSchedule).len(), 4);

        assert!(steps(&Intent::HrOnboarding)
            .iter()
            .all(|s| s.status == StepState::Pending));
    }
}
