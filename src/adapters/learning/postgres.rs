//! PostgreSQL learning repositories.
//!
//! Profiles live in `learning_profiles`, one row per user with a JSONB
//! column per section. Rows are reassembled into a versioned payload and
//! lifted through [`ProfileSchema`] before typed decoding, so rows written
//! by older deployments stay readable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::learning::{
    KnowledgeState, LearningStyleProfile, ProfileSchema, CURRENT_PROFILE_SCHEMA,
};
use crate::ports::{KnowledgeStateRepository, LearningProfileRepository};

/// Maps driver errors onto the domain taxonomy.
///
/// Connection-level failures mean the store is unreachable or misconfigured;
/// everything else is a query failure.
pub(crate) fn map_sqlx_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    match error {
        sqlx::Error::Configuration(_)
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => {
            DomainError::configuration(format!("{}: storage unavailable: {}", context, error))
        }
        other => DomainError::database(format!("{}: {}", context, other)),
    }
}

fn to_json<T: Serialize>(section: &str, value: &T) -> Result<JsonValue, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::database(format!("Failed to serialize {}: {}", section, e))
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Learning profiles
// ════════════════════════════════════════════════════════════════════════════════

/// PostgreSQL implementation of the LearningProfileRepository port.
pub struct PostgresLearningProfileRepository {
    pool: PgPool,
    schema: ProfileSchema,
}

impl PostgresLearningProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: ProfileSchema::standard(),
        }
    }
}

/// Database row representation of a learning profile.
#[derive(Debug, sqlx::FromRow)]
struct LearningProfileRow {
    schema_version: i32,
    perceptual_mode: JsonValue,
    cognitive_style: JsonValue,
    social_preference: JsonValue,
    instruction_style: JsonValue,
    assessment_preference: JsonValue,
    cognitive_metrics: JsonValue,
    behavioral_metrics: JsonValue,
    learning_metrics: Option<JsonValue>,
    last_updated: DateTime<Utc>,
}

impl LearningProfileRow {
    /// Versioned payload as understood by `ProfileSchema`.
    fn into_payload(self) -> JsonValue {
        json!({
            "schema_version": self.schema_version,
            "perceptual_mode": self.perceptual_mode,
            "cognitive_style": self.cognitive_style,
            "social_preference": self.social_preference,
            "instruction_style": self.instruction_style,
            "assessment_preference": self.assessment_preference,
            "cognitive_metrics": self.cognitive_metrics,
            "behavioral_metrics": self.behavioral_metrics,
            "learning_metrics": self.learning_metrics.unwrap_or(JsonValue::Null),
            "last_updated": Timestamp::from_datetime(self.last_updated),
        })
    }
}

#[async_trait]
impl LearningProfileRepository for PostgresLearningProfileRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LearningStyleProfile>, DomainError> {
        let row: Option<LearningProfileRow> = sqlx::query_as(
            r#"
            SELECT schema_version, perceptual_mode, cognitive_style, social_preference,
                   instruction_style, assessment_preference, cognitive_metrics,
                   behavioral_metrics, learning_metrics, last_updated
            FROM learning_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to fetch learning profile", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored_version = row.schema_version;
        let profile = self.schema.decode(row.into_payload()).map_err(|e| {
            tracing::error!(
                user_id = %user_id.as_str(),
                stored_version,
                error = %e,
                "Stored learning profile could not be decoded"
            );
            DomainError::from(e)
        })?;

        Ok(Some(profile))
    }

    async fn save(
        &self,
        user_id: &UserId,
        profile: &LearningStyleProfile,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO learning_profiles (
                user_id, schema_version, perceptual_mode, cognitive_style,
                social_preference, instruction_style, assessment_preference,
                cognitive_metrics, behavioral_metrics, learning_metrics, last_updated
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id) DO UPDATE SET
                schema_version = EXCLUDED.schema_version,
                perceptual_mode = EXCLUDED.perceptual_mode,
                cognitive_style = EXCLUDED.cognitive_style,
                social_preference = EXCLUDED.social_preference,
                instruction_style = EXCLUDED.instruction_style,
                assessment_preference = EXCLUDED.assessment_preference,
                cognitive_metrics = EXCLUDED.cognitive_metrics,
                behavioral_metrics = EXCLUDED.behavioral_metrics,
                learning_metrics = EXCLUDED.learning_metrics,
                last_updated = EXCLUDED.last_updated
            "#,
        )
        .bind(user_id.as_str())
        .bind(CURRENT_PROFILE_SCHEMA as i32)
        .bind(to_json("perceptual_mode", &profile.perceptual_mode)?)
        .bind(to_json("cognitive_style", &profile.cognitive_style)?)
        .bind(to_json("social_preference", &profile.social_preference)?)
        .bind(to_json("instruction_style", &profile.instruction_style)?)
        .bind(to_json("assessment_preference", &profile.assessment_preference)?)
        .bind(to_json("cognitive_metrics", &profile.cognitive_metrics)?)
        .bind(to_json("behavioral_metrics", &profile.behavioral_metrics)?)
        .bind(to_json("learning_metrics", &profile.learning_metrics)?)
        .bind(profile.last_updated.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to save learning profile", e))?;

        tracing::debug!(user_id = %user_id.as_str(), "Learning profile saved");
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM learning_profiles WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete learning profile", e))?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Knowledge states
// ════════════════════════════════════════════════════════════════════════════════

/// PostgreSQL implementation of the KnowledgeStateRepository port.
pub struct PostgresKnowledgeStateRepository {
    pool: PgPool,
}

impl PostgresKnowledgeStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct KnowledgeStateRow {
    topics: JsonValue,
    misconceptions: Vec<String>,
    strengths: Vec<String>,
    areas_for_improvement: Vec<String>,
    last_updated: DateTime<Utc>,
}

impl TryFrom<KnowledgeStateRow> for KnowledgeState {
    type Error = DomainError;

    fn try_from(row: KnowledgeStateRow) -> Result<Self, Self::Error> {
        let topics: BTreeMap<String, f64> = serde_json::from_value(row.topics).map_err(|e| {
            DomainError::database(format!("Invalid topics in knowledge state: {}", e))
        })?;
        Ok(KnowledgeState {
            topics,
            misconceptions: row.misconceptions,
            strengths: row.strengths,
            areas_for_improvement: row.areas_for_improvement,
            last_updated: Timestamp::from_datetime(row.last_updated),
        })
    }
}

#[async_trait]
impl KnowledgeStateRepository for PostgresKnowledgeStateRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<KnowledgeState>, DomainError> {
        let row: Option<KnowledgeStateRow> = sqlx::query_as(
            r#"
            SELECT topics, misconceptions, strengths, areas_for_improvement, last_updated
            FROM knowledge_states
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to fetch knowledge state", e))?;

        row.map(KnowledgeState::try_from).transpose()
    }

    async fn save(&self, user_id: &UserId, state: &KnowledgeState) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO knowledge_states (
                user_id, topics, misconceptions, strengths, areas_for_improvement, last_updated
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                topics = EXCLUDED.topics,
                misconceptions = EXCLUDED.misconceptions,
                strengths = EXCLUDED.strengths,
                areas_for_improvement = EXCLUDED.areas_for_improvement,
                last_updated = EXCLUDED.last_updated
            "#,
        )
        .bind(user_id.as_str())
        .bind(to_json("topics", &state.topics)?)
        .bind(&state.misconceptions)
        .bind(&state.strengths)
        .bind(&state.areas_for_improvement)
        .bind(state.last_updated.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to save knowledge state", e))?;

        Ok(())
    }
}
