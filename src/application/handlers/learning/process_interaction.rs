//! ProcessInteraction - Command handler folding a question/response pair
//! into the learner's stored profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::learning::{
    apply_interaction, evaluate, InteractionEvaluation, InteractionType, LearningStyleProfile,
    LlmInteraction, ProfileMetrics,
};
use crate::ports::LearningProfileRepository;

use super::UserLocks;

/// Command to evaluate an interaction and update the learner's profile.
#[derive(Debug, Clone)]
pub struct ProcessInteractionCommand {
    pub user_id: UserId,
    pub question: String,
    pub response: String,
    pub interaction_type: InteractionType,
}

/// Evaluation of the interaction plus the updated profile summary.
#[derive(Debug, Clone)]
pub struct ProcessInteractionResult {
    pub evaluation: InteractionEvaluation,
    pub profile_metrics: ProfileMetrics,
}

/// Handler for processing interactions.
pub struct ProcessInteractionHandler {
    repository: Arc<dyn LearningProfileRepository>,
    locks: Arc<UserLocks>,
}

impl ProcessInteractionHandler {
    pub fn new(repository: Arc<dyn LearningProfileRepository>, locks: Arc<UserLocks>) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(
        &self,
        cmd: ProcessInteractionCommand,
    ) -> Result<ProcessInteractionResult, DomainError> {
        let mut interaction =
            LlmInteraction::new(cmd.question, cmd.response, cmd.interaction_type);
        let evaluation = evaluate(&interaction);
        interaction.record_evaluation(&evaluation);

        let _guard = self.locks.acquire(&cmd.user_id).await;

        let mut profile = match self.repository.find_by_user(&cmd.user_id).await? {
            Some(profile) => profile,
            None => {
                tracing::debug!(user_id = %cmd.user_id, "No stored profile, starting fresh");
                LearningStyleProfile::new(Timestamp::now())
            }
        };

        apply_interaction(&mut profile, &interaction, &evaluation, Timestamp::now());
        self.repository.save(&cmd.user_id, &profile).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            interaction_type = %interaction.interaction_type,
            evaluation_score = interaction.evaluation_score,
            "Interaction processed"
        );

        Ok(ProcessInteractionResult {
            evaluation,
            profile_metrics: ProfileMetrics::from_profile(&profile),
        })
    }
}
