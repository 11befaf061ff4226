use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MingleError, Result};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_BRANCH_CHARS: usize = 2;
pub const MIN_ROLE_CHARS: usize = 2;
pub const MIN_ABOUT_CHARS: usize = 10;

// `user_id` is the platform-assigned numeric identity, trusted as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: i64,
    pub name: String,
    pub branch: String,
    pub role: String,
    pub about: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Branch,
    Role,
    About,
    Photo,
}

impl ProfileField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Branch => "branch",
            Self::Role => "role",
            Self::About => "about",
            Self::Photo => "photo",
        }
    }

    pub fn min_chars(self) -> usize {
        match self {
            Self::Name => MIN_NAME_CHARS,
            Self::Branch => MIN_BRANCH_CHARS,
            Self::Role => MIN_ROLE_CHARS,
            Self::About => MIN_ABOUT_CHARS,
            Self::Photo => 0,
        }
    }

    pub fn validate(self, value: &str) -> Result<()> {
        let trimmed = value.trim();
        if trimmed.chars().count() < self.min_chars() {
            return Err(MingleError::Validation(format!(
                "{} must be at least {} characters",
                self.as_str(),
                self.min_chars()
            )));
        }
        Ok(())
    }
}

impl Profile {
    pub fn validate(&self) -> Result<()> {
        ProfileField::Name.validate(&self.name)?;
        ProfileField::Branch.validate(&self.branch)?;
        ProfileField::Role.validate(&self.role)?;
        ProfileField::About.validate(&self.about)?;
        Ok(())
    }

    pub fn search_text(&self) -> String {
        format!("{} {} {} {}", self.name, self.branch, self.role, self.about)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextOutcome {
    Candidate(Profile),
    // Terminal, not an error; clearing the tracker is the transport's call.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Pending,
    // Informing both parties is the caller's job.
    Matched(Profile, Profile),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub profile: Profile,
    pub score: f32,
}
