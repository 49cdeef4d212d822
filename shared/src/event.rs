use serde::{Deserialize, Serialize};

use crate::capabilities::HttpResult;
use crate::card::CardInput;
use crate::config::ApiConfig;
use crate::model::SessionId;

#[derive(Serialize, Deserialize, Debug)]
pub enum Event {
    // Lifecycle
    Mounted {
        config: ApiConfig,
    },
    Unmounted,

    // Connectivity
    ProbeRequested,

    // Collection
    RefreshRequested,
    NameChanged(String),
    EmailChanged(String),
    CreateRequested,

    // Selection
    UserSelected {
        id: i64,
    },
    SelectionCleared,
    /// Click or key press on a grid card; the card decides whether it
    /// selects the user.
    CardActivated {
        id: i64,
        input: CardInput,
    },

    // Capability responses (boxed to keep enum size small)
    #[serde(skip)]
    ProbeCompleted {
        session: SessionId,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    UsersFetched {
        session: SessionId,
        seq: u64,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    UserCreated {
        session: SessionId,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    UserFetched {
        session: SessionId,
        id: i64,
        result: Box<HttpResult>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mounted { .. } => "mounted",
            Self::Unmounted => "unmounted",
            Self::ProbeRequested => "probe_requested",
            Self::RefreshRequested => "refresh_requested",
            Self::NameChanged(_) => "name_changed",
            Self::EmailChanged(_) => "email_changed",
            Self::CreateRequested => "create_requested",
            Self::UserSelected { .. } => "user_selected",
            Self::SelectionCleared => "selection_cleared",
            Self::CardActivated { .. } => "card_activated",
            Self::ProbeCompleted { .. } => "probe_completed",
            Self::UsersFetched { .. } => "users_fetched",
            Self::UserCreated { .. } => "user_created",
            Self::UserFetched { .. } => "user_fetched",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::ProbeRequested
                | Self::RefreshRequested
                | Self::NameChanged(_)
                | Self::EmailChanged(_)
                | Self::CreateRequested
                | Self::UserSelected { .. }
                | Self::SelectionCleared
                | Self::CardActivated { .. }
        )
    }

    /// Session a capability response was issued under, `None` for inputs
    /// coming from the shell.
    #[must_use]
    pub const fn session(&self) -> Option<SessionId> {
        match self {
            Self::ProbeCompleted { session, .. }
            | Self::UsersFetched { session, .. }
            | Self::UserCreated { session, .. }
            | Self::UserFetched { session, .. } => Some(*session),
            _ => None,
        }
    }
}
