//! Personality profiles that shape every reply.
//!
//! A profile is pure configuration data: the system prompt, three request
//! templates, and the user-facing messages for each failure class. The
//! first profile in a [`PersonaSet`] is the fallback for unknown modes.

mod builtin;

use crate::error::ConfigError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalityProfile {
    pub id: String,
    pub name: String,
    pub system_prompt: String,
    /// Tera template, receives `message`.
    pub image_request_template: String,
    /// Tera template, receives `message`.
    pub image_analysis_template: String,
    /// Tera template, receives `message`, `file_type` and `file_content`.
    pub file_analysis_template: String,
    /// Appended verbatim to replies for image-generation requests.
    pub image_generation_notice: String,
    pub error_message: String,
    pub exhausted_message: String,
    pub upload_error_message: String,
}

/// Summary row for listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct PersonaSet {
    profiles: Vec<PersonalityProfile>,
}

impl PersonaSet {
    /// Build a set from caller-supplied profiles.
    ///
    /// Ids are normalized to lowercase; the set must be non-empty and ids
    /// must be unique after normalization.
    pub fn new(profiles: Vec<PersonalityProfile>) -> Result<Self, ConfigError> {
        if profiles.is_empty() {
            return Err(ConfigError::Validation(
                "at least one personality profile is required".into(),
            ));
        }

        let mut normalized: Vec<PersonalityProfile> = Vec::with_capacity(profiles.len());
        for mut profile in profiles {
            profile.id = normalize_mode(&profile.id);
            if profile.id.is_empty() {
                return Err(ConfigError::Validation(
                    "personality profile id must not be empty".into(),
                ));
            }
            if normalized.iter().any(|existing| existing.id == profile.id) {
                return Err(ConfigError::Validation(format!(
                    "duplicate personality profile id: {}",
                    profile.id
                )));
            }
            normalized.push(profile);
        }

        Ok(Self {
            profiles: normalized,
        })
    }

    /// The shipped profiles: `normal` (default), `bijo`, `ajai`.
    pub fn builtin() -> Self {
        Self {
            profiles: vec![builtin::normal(), builtin::bijo(), builtin::ajai()],
        }
    }

    pub fn default_profile(&self) -> &PersonalityProfile {
        // `new` and `builtin` both guarantee at least one profile.
        &self.profiles[0]
    }

    pub fn get(&self, id: &str) -> Option<&PersonalityProfile> {
        let id = normalize_mode(id);
        self.profiles.iter().find(|profile| profile.id == id)
    }

    /// Resolve a requested mode. Absent, blank and unknown modes all fall
    /// back to the default profile; lookup ignores case and surrounding
    /// whitespace.
    pub fn select(&self, mode: Option<&str>) -> &PersonalityProfile {
        match mode {
            Some(mode) => self.get(mode).unwrap_or_else(|| {
                tracing::debug!(mode, "Unknown personality mode, using default");
                self.default_profile()
            }),
            None => self.default_profile(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonalityProfile> {
        self.profiles.iter()
    }

    pub fn summaries(&self) -> Vec<PersonaSummary> {
        self.profiles
            .iter()
            .map(|profile| PersonaSummary {
                id: profile.id.clone(),
                name: profile.name.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for PersonaSet {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_mode(mode: &str) -> String {
    mode.trim().to_lowercase()
}
