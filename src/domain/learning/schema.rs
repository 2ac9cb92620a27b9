//! Versioned profile payloads and the migrations that lift old ones.
//!
//! Stored profiles are JSON documents tagged with `schema_version`. Each
//! [`ProfileMigration`] lifts a payload by exactly one version;
//! [`ProfileSchema`] chains them until the payload reaches
//! [`CURRENT_PROFILE_SCHEMA`] and then deserializes it.
//!
//! Version history:
//! - v1: untyped legacy document. No version tag, sections may be missing
//!   keys, `learning_metrics` may be absent, and level/progress fields may
//!   hold raw percentages.
//! - v2: the typed [`LearningStyleProfile`] shape.

use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

use super::profile::LearningStyleProfile;

/// Version written by this build.
pub const CURRENT_PROFILE_SCHEMA: u32 = 2;

/// Version assumed for payloads without a `schema_version` tag.
pub const LEGACY_PROFILE_SCHEMA: u32 = 1;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("profile payload must be a JSON object")]
    NotAnObject,

    #[error("profile schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("no migration from profile schema version {0}")]
    MissingMigration(u32),

    #[error("profile payload does not match schema: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<SchemaError> for DomainError {
    fn from(err: SchemaError) -> Self {
        let code = match err {
            SchemaError::UnsupportedVersion { .. } | SchemaError::NotAnObject => {
                ErrorCode::ValidationFailed
            }
            _ => ErrorCode::DatabaseError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Lifts a profile payload from `source_version` to `source_version + 1`.
pub trait ProfileMigration: Send + Sync {
    fn source_version(&self) -> u32;

    fn migrate(&self, payload: JsonValue) -> Result<JsonValue, SchemaError>;
}

/// Cognitive fields v2 stores as fractions of 1.
const FRACTION_FIELDS: [&str; 4] = [
    "beginner_level",
    "intermediate_level",
    "advanced_level",
    "overall_progress",
];

/// v1 → v2: fills every missing key from a zeroed profile and rescales
/// percentage-valued level fields to fractions.
pub struct LegacyProfileToV2;

impl ProfileMigration for LegacyProfileToV2 {
    fn source_version(&self) -> u32 {
        1
    }

    fn migrate(&self, payload: JsonValue) -> Result<JsonValue, SchemaError> {
        let JsonValue::Object(legacy) = payload else {
            return Err(SchemaError::NotAnObject);
        };
        let mut merged = serde_json::to_value(LearningStyleProfile::new(Timestamp::now()))?;
        if let JsonValue::Object(defaults) = &mut merged {
            merge_missing(defaults, legacy);
            if let Some(JsonValue::Object(cognitive)) = defaults.get_mut("cognitive_metrics") {
                rescale_percentages(cognitive);
            }
            defaults.insert("schema_version".to_string(), JsonValue::from(2));
        }
        Ok(merged)
    }
}

/// Overlays `source` onto `target`, recursing into nested objects so partial
/// sections keep their defaults for absent keys.
fn merge_missing(target: &mut Map<String, JsonValue>, source: Map<String, JsonValue>) {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(JsonValue::Object(existing)), JsonValue::Object(incoming)) => {
                merge_missing(existing, incoming);
            }
            (_, JsonValue::Null) => {}
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// Values above 1 in fraction fields are read as percentages.
fn rescale_percentages(cognitive: &mut Map<String, JsonValue>) {
    for field in FRACTION_FIELDS {
        let Some(value) = cognitive.get(field).and_then(JsonValue::as_f64) else {
            continue;
        };
        if value > 1.0 {
            cognitive.insert(field.to_string(), JsonValue::from(value / 100.0));
        }
    }
}

fn payload_version(payload: &JsonValue) -> Result<u32, SchemaError> {
    let Some(raw) = payload.get("schema_version").and_then(JsonValue::as_u64) else {
        return Ok(LEGACY_PROFILE_SCHEMA);
    };
    u32::try_from(raw).map_err(|_| SchemaError::UnsupportedVersion {
        found: raw,
        supported: CURRENT_PROFILE_SCHEMA,
    })
}

/// Registry of profile migrations.
pub struct ProfileSchema {
    migrations: HashMap<u32, Arc<dyn ProfileMigration>>,
}

impl ProfileSchema {
    pub fn empty() -> Self {
        Self {
            migrations: HashMap::new(),
        }
    }

    /// All migrations shipped with this build.
    pub fn standard() -> Self {
        let mut schema = Self::empty();
        schema.register(Arc::new(LegacyProfileToV2));
        schema
    }

    pub fn register(&mut self, migration: Arc<dyn ProfileMigration>) {
        self.migrations.insert(migration.source_version(), migration);
    }

    /// Lifts `payload` to the current version without deserializing it.
    pub fn upgrade(&self, payload: JsonValue) -> Result<JsonValue, SchemaError> {
        if !payload.is_object() {
            return Err(SchemaError::NotAnObject);
        }
        let mut version = payload_version(&payload)?;
        if version > CURRENT_PROFILE_SCHEMA {
            return Err(SchemaError::UnsupportedVersion {
                found: u64::from(version),
                supported: CURRENT_PROFILE_SCHEMA,
            });
        }

        let mut current = payload;
        while version < CURRENT_PROFILE_SCHEMA {
            let migration = self
                .migrations
                .get(&version)
                .ok_or(SchemaError::MissingMigration(version))?;
            current = migration.migrate(current)?;
            version += 1;
            if let JsonValue::Object(map) = &mut current {
                map.insert("schema_version".to_string(), JsonValue::from(version));
            }
        }
        Ok(current)
    }

    /// Upgrades and deserializes a stored payload, re-applying the `[0, 1]`
    /// bounds on metric fields.
    pub fn decode(&self, payload: JsonValue) -> Result<LearningStyleProfile, SchemaError> {
        let upgraded = self.upgrade(payload)?;
        let mut profile: LearningStyleProfile = serde_json::from_value(upgraded)?;
        profile.clamp_metrics();
        Ok(profile)
    }

    /// Serializes a profile at the current version.
    pub fn encode(&self, profile: &LearningStyleProfile) -> Result<JsonValue, SchemaError> {
        let mut payload = serde_json::to_value(profile)?;
        if let JsonValue::Object(map) = &mut payload {
            map.insert(
                "schema_version".to_string(),
                JsonValue::from(CURRENT_PROFILE_SCHEMA),
            );
        }
        Ok(payload)
    }
}

impl Default for ProfileSchema {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_payload_gains_defaults_and_version() {
        let legacy = json!({
            "perceptual_mode": { "visual": 0.6, "auditory": 0.1 },
            "cognitive_metrics": {
                "beginner_level": 0.5,
                "total_quizzes_taken": 3,
                "quiz_scores": [80, 60]
            },
            "last_updated": "2024-01-15T10:30:00Z"
        });

        let profile = ProfileSchema::standard().decode(legacy).unwrap();

        assert_eq!(profile.schema_version, CURRENT_PROFILE_SCHEMA);
        assert_eq!(profile.perceptual_mode.visual, 0.6);
        assert_eq!(profile.perceptual_mode.kinesthetic, 0.0);
        assert_eq!(profile.cognitive_metrics.total_quizzes_taken, 3);
        assert_eq!(profile.cognitive_metrics.quiz_scores, vec![80.0, 60.0]);
        assert_eq!(profile.learning_metrics.completion_rate, 0.0);
    }

    #[test]
    fn legacy_percentage_levels_become_fractions() {
        let legacy = json!({
            "cognitive_metrics": {
                "beginner_level": 70,
                "intermediate_level": 0.4,
                "overall_progress": 70
            }
        });

        let profile = ProfileSchema::standard().decode(legacy).unwrap();

        assert!((profile.cognitive_metrics.beginner_level - 0.7).abs() < 1e-9);
        assert!((profile.cognitive_metrics.intermediate_level - 0.4).abs() < 1e-9);
        assert!((profile.cognitive_metrics.overall_progress - 0.7).abs() < 1e-9);
    }

    #[test]
    fn decode_clamps_out_of_range_current_payloads() {
        let mut profile = LearningStyleProfile::default();
        profile.behavioral_metrics.session_completion_rate = 3.0;
        let schema = ProfileSchema::standard();
        let payload = schema.encode(&profile).unwrap();

        let decoded = schema.decode(payload).unwrap();

        assert_eq!(decoded.behavioral_metrics.session_completion_rate, 1.0);
    }

    #[test]
    fn legacy_nulls_fall_back_to_defaults() {
        let legacy = json!({ "learning_metrics": null, "last_updated": null });
        let profile = ProfileSchema::standard().decode(legacy).unwrap();
        assert_eq!(profile.learning_metrics.engagement_score, 0.0);
    }

    #[test]
    fn current_payload_decodes_unchanged() {
        let mut profile = LearningStyleProfile::default();
        profile.social_preference.collaborative = 0.125;
        profile.cognitive_metrics.concept_detective_scores = vec![12.5, 99.0];

        let schema = ProfileSchema::standard();
        let payload = schema.encode(&profile).unwrap();
        let decoded = schema.decode(payload).unwrap();

        assert_eq!(decoded, profile);
    }

    #[test]
    fn future_version_is_rejected() {
        let payload = json!({ "schema_version": 99 });
        let err = ProfileSchema::standard().decode(payload).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedVersion { found: 99, .. }));

        let domain: DomainError = err.into();
        assert_eq!(domain.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn oversized_version_is_rejected_not_truncated() {
        // 2^32 + 2 would read as 2 if narrowed
        let payload = json!({ "schema_version": 4_294_967_298u64 });
        let err = ProfileSchema::standard().decode(payload).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnsupportedVersion {
                found: 4_294_967_298,
                ..
            }
        ));
    }

    #[test]
    fn missing_migration_is_reported() {
        let err = ProfileSchema::empty().upgrade(json!({})).unwrap_err();
        assert!(matches!(err, SchemaError::MissingMigration(1)));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = ProfileSchema::standard().upgrade(json!([1, 2])).unwrap_err();
        assert!(matches!(err, SchemaError::NotAnObject));
    }
}
