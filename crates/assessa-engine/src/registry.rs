//! Profile registry: create, select, edit, and cascade-delete respondent
//! profiles inside a document.

use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use assessa_core::models::document::Document;
use assessa_core::models::profile::{Demographics, NewProfile, Profile, ProfileUpdate};

use crate::error::EngineError;

/// Name given to a profile created with a blank name.
pub const PLACEHOLDER_NAME: &str = "Anonymous";

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_OCCUPATION_LEN: usize = 100;
pub const MAX_GOALS_LEN: usize = 300;

/// What a delete actually removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDeletion {
    pub profile_removed: bool,
    pub results_removed: usize,
}

/// Validate `input` and append a new profile.
///
/// Anonymous profiles never keep demographics, whatever the input carried.
pub fn create_profile(
    document: &mut Document,
    input: NewProfile,
    now: Timestamp,
) -> Result<Profile, EngineError> {
    let name = normalize_name(&input.name)?;
    let demographics = if input.is_anonymous {
        Demographics::default()
    } else {
        normalize_demographics(input.demographics)?
    };

    let mut id = Uuid::new_v4();
    while document.profile(id).is_some() {
        id = Uuid::new_v4();
    }

    let profile = Profile {
        id,
        name,
        is_anonymous: input.is_anonymous,
        demographics,
        created: now,
        last_used: now,
    };
    document.profiles.push(profile.clone());
    Ok(profile)
}

pub fn find_profile(document: &Document, id: Uuid) -> Result<&Profile, EngineError> {
    document.profile(id).ok_or(EngineError::ProfileNotFound(id))
}

/// Mark a profile as the one in use, bumping `lastUsed`.
pub fn select_profile(
    document: &mut Document,
    id: Uuid,
    now: Timestamp,
) -> Result<Profile, EngineError> {
    let profile = document
        .profile_mut(id)
        .ok_or(EngineError::ProfileNotFound(id))?;
    profile.last_used = now;
    Ok(profile.clone())
}

/// Apply a partial edit. `created` and `lastUsed` are left alone.
pub fn update_profile(
    document: &mut Document,
    id: Uuid,
    update: ProfileUpdate,
) -> Result<Profile, EngineError> {
    // Validate everything before touching the stored profile.
    let name = update.name.as_deref().map(normalize_name).transpose()?;
    let demographics = update.demographics.map(normalize_demographics).transpose()?;

    let profile = document
        .profile_mut(id)
        .ok_or(EngineError::ProfileNotFound(id))?;

    if let Some(name) = name {
        profile.name = name;
    }
    if let Some(is_anonymous) = update.is_anonymous {
        profile.is_anonymous = is_anonymous;
    }
    if let Some(demographics) = demographics {
        profile.demographics = demographics;
    }
    if profile.is_anonymous {
        profile.demographics = Demographics::default();
    }

    Ok(profile.clone())
}

/// Remove a profile and every result recorded under it.
///
/// Deleting an id that is not present is a no-op, not an error: the caller's
/// intent (no such profile, no such results) already holds.
pub fn delete_profile(document: &mut Document, id: Uuid) -> ProfileDeletion {
    let profiles_before = document.profiles.len();
    document.profiles.retain(|p| p.id != id);

    let results_before = document.test_results.len();
    document.test_results.retain(|r| r.profile_id != id);

    ProfileDeletion {
        profile_removed: document.profiles.len() != profiles_before,
        results_removed: results_before - document.test_results.len(),
    }
}

fn normalize_name(name: &str) -> Result<String, EngineError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Ok(PLACEHOLDER_NAME.to_string());
    }
    check_len("name", trimmed, MAX_NAME_LEN)?;
    Ok(trimmed.to_string())
}

fn normalize_demographics(demographics: Demographics) -> Result<Demographics, EngineError> {
    Ok(Demographics {
        birth_date: demographics.birth_date,
        pronouns: optional_text("pronouns", demographics.pronouns, MAX_NAME_LEN)?,
        height: demographics.height,
        weight: demographics.weight,
        occupation: optional_text("occupation", demographics.occupation, MAX_OCCUPATION_LEN)?,
        goals: optional_text("goals", demographics.goals, MAX_GOALS_LEN)?,
    })
}

/// Trim; blank becomes `None`.
fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, EngineError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    check_len(field, trimmed, max)?;
    Ok(Some(trimmed.to_string()))
}

pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), EngineError> {
    let len = value.chars().count();
    if len > max {
        return Err(EngineError::InvalidInput {
            field,
            reason: format!("{len} characters exceeds the limit of {max}"),
        });
    }
    Ok(())
}
