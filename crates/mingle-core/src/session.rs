use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::error::{MingleError, Result};
use crate::models::{Profile, ProfileField};

// What a viewer types to leave the optional photo step empty.
pub const PHOTO_SKIP_KEYWORD: &str = "skip";

// Steps of the profile collection form, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    Name,
    Branch,
    Role,
    About,
    Photo,
}

impl FormStep {
    pub fn field(self) -> ProfileField {
        match self {
            Self::Name => ProfileField::Name,
            Self::Branch => ProfileField::Branch,
            Self::Role => ProfileField::Role,
            Self::About => ProfileField::About,
            Self::Photo => ProfileField::Photo,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Name => Some(Self::Branch),
            Self::Branch => Some(Self::Role),
            Self::Role => Some(Self::About),
            Self::About => Some(Self::Photo),
            Self::Photo => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub role: Option<String>,
    pub about: Option<String>,
    pub photo_ref: Option<String>,
}

impl ProfileDraft {
    fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.name = Some(value),
            ProfileField::Branch => self.branch = Some(value),
            ProfileField::Role => self.role = Some(value),
            ProfileField::About => self.about = Some(value),
            ProfileField::Photo => self.photo_ref = Some(value),
        }
    }

    // Everything but the photo reference must be present by now.
    pub fn into_profile(self, user_id: i64) -> Result<Profile> {
        let missing = |field: ProfileField| {
            MingleError::Validation(format!("form incomplete: {} missing", field.as_str()))
        };
        Ok(Profile {
            user_id,
            name: self.name.ok_or_else(|| missing(ProfileField::Name))?,
            branch: self.branch.ok_or_else(|| missing(ProfileField::Branch))?,
            role: self.role.ok_or_else(|| missing(ProfileField::Role))?,
            about: self.about.ok_or_else(|| missing(ProfileField::About))?,
            photo_ref: self.photo_ref,
            created_at: Utc::now(),
        })
    }
}

// Creating a fresh profile step by step, or editing one field of an
// existing profile. A tagged variant, not an edit flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    CreatingProfile { step: FormStep, draft: ProfileDraft },
    EditingField { field: ProfileField, prior: Profile },
}

impl SessionState {
    pub fn creating() -> Self {
        Self::CreatingProfile {
            step: FormStep::Name,
            draft: ProfileDraft::default(),
        }
    }

    pub fn editing(field: ProfileField, prior: Profile) -> Self {
        Self::EditingField { field, prior }
    }

    // The field the session is currently waiting on.
    pub fn awaiting(&self) -> ProfileField {
        match self {
            Self::CreatingProfile { step, .. } => step.field(),
            Self::EditingField { field, .. } => *field,
        }
    }
}

// Every input either advances the machine, re-prompts, or completes it;
// there is no silent fallthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Advanced(SessionState),
    Rejected { state: SessionState, reason: String },
    CompletedDraft(ProfileDraft),
    CompletedEdit(Profile),
}

impl SessionState {
    pub fn apply_text(self, input: &str) -> FormEvent {
        match self {
            Self::CreatingProfile { step, draft } => apply_creating(step, draft, input),
            Self::EditingField { field, prior } => apply_editing(field, prior, input),
        }
    }
}

fn apply_creating(step: FormStep, mut draft: ProfileDraft, input: &str) -> FormEvent {
    let field = step.field();
    match accept_field(field, input) {
        Ok(value) => {
            if let Some(value) = value {
                draft.set(field, value);
            }
            match step.next() {
                Some(next) => FormEvent::Advanced(SessionState::CreatingProfile { step: next, draft }),
                None => FormEvent::CompletedDraft(draft),
            }
        }
        Err(err) => FormEvent::Rejected {
            state: SessionState::CreatingProfile { step, draft },
            reason: err.to_string(),
        },
    }
}

fn apply_editing(field: ProfileField, mut prior: Profile, input: &str) -> FormEvent {
    match accept_field(field, input) {
        Ok(value) => {
            match field {
                ProfileField::Name => prior.name = value.unwrap_or_default(),
                ProfileField::Branch => prior.branch = value.unwrap_or_default(),
                ProfileField::Role => prior.role = value.unwrap_or_default(),
                ProfileField::About => prior.about = value.unwrap_or_default(),
                ProfileField::Photo => prior.photo_ref = value,
            }
            FormEvent::CompletedEdit(prior)
        }
        Err(err) => FormEvent::Rejected {
            state: SessionState::EditingField { field, prior },
            reason: err.to_string(),
        },
    }
}

// `Ok(None)` means the optional photo step was skipped; every other field
// must pass its minimum-length predicate.
fn accept_field(field: ProfileField, input: &str) -> Result<Option<String>> {
    let trimmed = input.trim();
    if field == ProfileField::Photo {
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(PHOTO_SKIP_KEYWORD) {
            return Ok(None);
        }
        return Ok(Some(trimmed.to_string()));
    }
    field.validate(trimmed)?;
    Ok(Some(trimmed.to_string()))
}

// Per-viewer session registry, linearized the same way as the view tracker.
#[derive(Clone, Default)]
pub struct SessionMap {
    sessions: Arc<Mutex<HashMap<i64, SessionState>>>,
}

impl std::fmt::Debug for SessionMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionMap").finish_non_exhaustive()
    }
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_sessions<T>(&self, f: impl FnOnce(&mut HashMap<i64, SessionState>) -> T) -> Result<T> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| MingleError::mutex_poisoned("session map"))?;
        Ok(f(&mut sessions))
    }

    pub fn set(&self, viewer: i64, state: SessionState) -> Result<()> {
        self.with_sessions(|sessions| {
            sessions.insert(viewer, state);
        })
    }

    pub fn get(&self, viewer: i64) -> Result<Option<SessionState>> {
        self.with_sessions(|sessions| sessions.get(&viewer).cloned())
    }

    pub fn remove(&self, viewer: i64) -> Result<Option<SessionState>> {
        self.with_sessions(|sessions| sessions.remove(&viewer))
    }
}
