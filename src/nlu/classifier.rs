//! Model-backed intent classifier with keyword fallback.
//!
//! The primary path asks a generative text model to classify the command and
//! return a JSON object. Any failure along that path degrades to the keyword
//! classifier; degradation is recorded but never surfaced as an error.

use tracing::{debug, warn};

use crate::adapters::TextModel;
use crate::domain::{Classification, ClassifierOutcome, DegradeReason, Intent};

use super::fallback;

/// Intent classifier combining a text model with the keyword fallback
pub struct IntentClassifier {
    model: Box<dyn TextModel>,
}

impl IntentClassifier {
    pub fn new(model: Box<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Classify a command. Never fails: model or parse failures degrade to
    /// the keyword classifier, with the reason captured in the outcome.
    pub async fn classify(&self, text: &str) -> ClassifierOutcome {
        let prompt = build_prompt(text);

        let generated = match self.model.generate(&prompt).await {
            Ok(generated) => generated,
            Err(e) => {
                warn!(model = %self.model.name(), error = %e, "Model call failed, using keyword fallback");
                return ClassifierOutcome::Degraded {
                    classification: fallback::classify(text),
                    reason: DegradeReason::Transport(e.to_string()),
                };
            }
        };

        match parse_model_output(&generated) {
            Ok(classification) => {
                debug!(
                    intent = %classification.intent,
                    confidence = classification.confidence,
                    "Model classified command"
                );
                ClassifierOutcome::Primary(classification)
            }
            Err(e) => {
                warn!(error = %e, "Model output unparsable, using keyword fallback");
                ClassifierOutcome::Degraded {
                    classification: fallback::classify(text),
                    reason: DegradeReason::Parse(e.to_string()),
                }
            }
        }
    }
}

/// Build the classification prompt embedding the command text
fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following business command and extract:
1. Intent (one of: {intents})
2. Entities (key-value pairs of relevant information)
3. Confidence (0-1 score)
4. Domain (HR, IT, Finance, or General)

Command: "{text}"

Respond with ONLY a JSON object in this format:
{{
    "intent": "HR_Onboarding",
    "entities": {{"employee_name": "John Doe", "role": "Developer", "start_date": "Monday"}},
    "confidence": 0.95,
    "domain": "HR"
}}"#,
        intents = Intent::KNOWN.join(", "),
        text = text,
    )
}

/// Parse the model's raw output as a classification.
///
/// The parsed object is taken verbatim; serde defaults cover missing
/// optional fields, and no further schema validation is applied.
fn parse_model_output(generated: &str) -> Result<Classification, serde_json::Error> {
    serde_json::from_str(generated.trim())
}
