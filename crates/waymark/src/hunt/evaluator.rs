//! Unlock gate evaluation.

use waymark_common::constants::messages;
use waymark_common::{CompletionResult, CredentialRule, UnlockOutcome, WaymarkError};

use super::Registry;

/// Stateless unlock evaluator
pub struct UnlockEvaluator {
    /// Password normalization rule
    rule: CredentialRule,
    /// Token that marks the whole hunt complete, if enabled
    final_answer: Option<String>,
}

impl UnlockEvaluator {
    pub fn new(rule: CredentialRule, final_answer: Option<String>) -> Self {
        Self { rule, final_answer }
    }

    pub fn final_answer_enabled(&self) -> bool {
        self.final_answer.is_some()
    }

    /// Decide whether a location's content is revealed for this request.
    ///
    /// The entry point is always unlocked. Otherwise the submitted password,
    /// normalized by the active rule, must equal the normalized secret.
    pub fn evaluate(
        &self,
        registry: &Registry,
        id: &str,
        credential: Option<&str>,
    ) -> Result<UnlockOutcome, WaymarkError> {
        let record = registry.get(id)?;

        if registry.is_entry(id) {
            return Ok(UnlockOutcome::Unlocked);
        }

        let Some(submitted) = credential else {
            return Ok(UnlockOutcome::Locked);
        };

        let outcome = if self.rule.normalize(submitted) == self.rule.normalize(&record.unlock_secret) {
            UnlockOutcome::Unlocked
        } else {
            UnlockOutcome::Rejected
        };

        tracing::debug!(location = %id, outcome = ?outcome, "Evaluated unlock attempt");

        Ok(outcome)
    }

    /// Check the final answer submitted at the last location.
    ///
    /// Exact, case-sensitive match; independent of the per-location password.
    pub fn check_final_answer(
        &self,
        registry: &Registry,
        id: &str,
        answer: &str,
    ) -> Result<CompletionResult, WaymarkError> {
        let record = registry.get(id)?;

        if !record.is_terminal() {
            return Err(WaymarkError::InvalidInput(format!(
                "location {} does not accept a final answer",
                id
            )));
        }

        let Some(ref expected) = self.final_answer else {
            return Err(WaymarkError::InvalidInput(
                "final answer is not enabled for this hunt".into(),
            ));
        };

        if answer == expected {
            tracing::info!(location = %id, "🏁 Hunt completed");
            Ok(CompletionResult::completed(messages::HUNT_COMPLETE))
        } else {
            tracing::debug!(location = %id, "Final answer rejected");
            Ok(CompletionResult::failed(messages::INCORRECT_FINAL_ANSWER))
        }
    }
}
