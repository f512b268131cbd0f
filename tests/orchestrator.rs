//! End-to-end orchestration: validation, persistence, and linked writes.

use async_trait::async_trait;
use tempfile::TempDir;
use uuid::Uuid;

use opsflow::adapters::{ModelError, TextModel};
use opsflow::nlu::IntentClassifier;
use opsflow::store::JsonlStore;
use opsflow::{CommandError, Intent, Orchestrator, WorkflowStatus, WorkflowStore};

struct UnreachableModel;

#[async_trait]
impl TextModel for UnreachableModel {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::Api {
            status: 500,
            body: "boom".to_string(),
        })
    }
}

struct CannedModel(&'static str);

#[async_trait]
impl TextModel for CannedModel {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        Ok(self.0.to_string())
    }
}

fn orchestrator_with(
    model: Box<dyn TextModel>,
    temp: &TempDir,
) -> (Orchestrator<JsonlStore>, JsonlStore) {
    // Second store handle on the same directory for assertions
    let inspector = JsonlStore::new(temp.path());
    let orchestrator = Orchestrator::new(
        IntentClassifier::new(model),
        JsonlStore::new(temp.path()),
    );
    (orchestrator, inspector)
}

#[tokio::test]
async fn empty_text_is_rejected_before_any_write() {
    let temp = TempDir::new().unwrap();
    let (orchestrator, inspector) = orchestrator_with(Box::new(UnreachableModel), &temp);

    for text in ["", "   ", "\n"] {
        let err = orchestrator.handle_command(text, false).await.unwrap_err();
        assert!(matches!(err, CommandError::EmptyText));
        assert_eq!(err.to_string(), "Text input is required");
    }

    assert!(inspector.active_workflows().await.unwrap().is_empty());
    assert!(inspector.recent_activity(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn command_creates_workflow_with_linked_history() {
    let temp = TempDir::new().unwrap();
    let (orchestrator, inspector) = orchestrator_with(
        Box::new(CannedModel(
            r#"{"intent": "HR_Onboarding", "entities": {"employee_name": "John Smith", "role": "Developer"}, "confidence": 0.95, "domain": "HR"}"#,
        )),
        &temp,
    );

    let response = orchestrator
        .handle_command("onboard John Smith as a developer", false)
        .await
        .unwrap();

    assert!(response.degraded.is_none());
    assert_eq!(response.intent.intent, Intent::HrOnboarding);
    assert_eq!(
        response.message,
        "Workflow Employee Onboarding - John Smith has been initiated and is now in progress."
    );

    let record = inspector
        .get_workflow(response.workflow_id)
        .await
        .unwrap()
        .expect("workflow persisted");
    assert_eq!(record.title, "Employee Onboarding - John Smith");
    assert_eq!(record.status, WorkflowStatus::InProgress);
    assert_eq!(record.progress, 0);
    assert_eq!(record.steps.len(), 5);
    assert_eq!(record.original_text, "onboard John Smith as a developer");
    assert!(!record.is_voice);

    // Exactly one history entry, linked to the workflow
    let activity = inspector.recent_activity(10).await.unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].workflow_id, response.workflow_id);
    assert_eq!(activity[0].action, "workflow_started");
    assert_eq!(
        activity[0].message,
        "Workflow initiated: Employee Onboarding - John Smith"
    );
}

#[tokio::test]
async fn degraded_classification_still_creates_a_workflow() {
    let temp = TempDir::new().unwrap();
    let (orchestrator, inspector) = orchestrator_with(Box::new(UnreachableModel), &temp);

    let response = orchestrator
        .handle_command("file an expense for $30", true)
        .await
        .unwrap();

    assert!(response.degraded.is_some());
    assert_eq!(response.intent.intent, Intent::FinanceExpense);

    let record = inspector
        .get_workflow(response.workflow_id)
        .await
        .unwrap()
        .unwrap();
    assert!(record.is_voice);
    assert_eq!(record.entities.get("amount").unwrap(), "$30");
}

#[tokio::test]
async fn identical_commands_produce_distinct_workflows() {
    let temp = TempDir::new().unwrap();
    let (orchestrator, inspector) = orchestrator_with(Box::new(UnreachableModel), &temp);

    let first = orchestrator
        .handle_command("open a ticket for the printer", false)
        .await
        .unwrap();
    let second = orchestrator
        .handle_command("open a ticket for the printer", false)
        .await
        .unwrap();

    assert_ne!(first.workflow_id, second.workflow_id);

    let active = inspector.active_workflows().await.unwrap();
    assert_eq!(active.len(), 2);

    let ids: Vec<Uuid> = active.iter().map(|w| w.id).collect();
    assert!(ids.contains(&first.workflow_id));
    assert!(ids.contains(&second.workflow_id));
}

#[tokio::test]
async fn model_invented_intent_gets_generic_template() {
    let temp = TempDir::new().unwrap();
    let (orchestrator, inspector) = orchestrator_with(
        Box::new(CannedModel(
            r#"{"intent": "Procurement_Order", "confidence": 0.6, "domain": "General"}"#,
        )),
        &temp,
    );

    let response = orchestrator
        .handle_command("order new laptops", false)
        .await
        .unwrap();

    let record = inspector
        .get_workflow(response.workflow_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.title, "Workflow - Procurement_Order");
    assert_eq!(record.description, "Processing workflow request.");
    assert_eq!(record.steps.len(), 2);
    assert_eq!(record.steps[0].name, "Process request");
    assert_eq!(record.steps[1].name, "Complete workflow");
}

#[tokio::test]
async fn stats_reflect_created_workflows() {
    let temp = TempDir::new().unwrap();
    let (orchestrator, _inspector) = orchestrator_with(Box::new(UnreachableModel), &temp);

    orchestrator
        .handle_command("schedule a meeting", false)
        .await
        .unwrap();
    orchestrator
        .handle_command("schedule another meeting", true)
        .await
        .unwrap();

    let stats = orchestrator.today_stats().await.unwrap();
    assert_eq!(stats.total_today, 2);
    assert_eq!(stats.in_progress, 2);
    assert_eq!(stats.voice_commands, 1);
    assert_eq!(stats.completed, 0);
}
