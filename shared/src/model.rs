use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ApiConfig;

/// A user record as returned by the backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// ISO 8601 string, kept verbatim and only parsed for display.
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("name is required")]
    EmptyName,
    #[error("email is required")]
    EmptyEmail,
}

/// Not-yet-submitted user data. Serializes to the `POST /users/` body.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub email: String,
}

impl Draft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.is_empty() {
            return Err(DraftError::EmptyName);
        }
        if self.email.is_empty() {
            return Err(DraftError::EmptyEmail);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Fetching,
    Submitting,
}

/// Tags every outbound request so responses that outlive their view can be
/// told apart from current ones.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl SessionId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub config: ApiConfig,
    pub session: SessionId,
    pub mounted: bool,

    pub users: Vec<User>,
    pub draft: Draft,
    pub is_submitting: bool,
    pub status: Option<StatusMessage>,
    pub is_connected: bool,

    /// Sequence number of the newest list request issued.
    pub fetch_issued: u64,
    /// Sequence number of the newest list request that has come back.
    pub fetch_settled: u64,

    pub selected_id: Option<i64>,
    pub selected: Option<User>,
}

impl Model {
    /// Fresh per-mount state. Session counters survive so that responses
    /// from an earlier mount can still be recognised as stale.
    pub fn reset(&mut self, config: ApiConfig) {
        let session = self.session.next();
        *self = Self {
            config,
            session,
            ..Self::default()
        };
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch_settled < self.fetch_issued
    }

    pub fn phase(&self) -> Phase {
        if self.is_submitting {
            Phase::Submitting
        } else if self.is_fetching() {
            Phase::Fetching
        } else {
            Phase::Idle
        }
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_issued += 1;
        self.fetch_issued
    }

    /// Marks `seq` as settled. Returns `false` when a newer request already
    /// settled, in which case the response must not be applied.
    pub fn settle_fetch(&mut self, seq: u64) -> bool {
        if seq <= self.fetch_settled {
            return false;
        }
        self.fetch_settled = seq;
        true
    }
}
