//! Presentation contract for a single user.
//!
//! [`UserCard`] holds no state of its own and knows nothing about the
//! collection it is shown in. Give it a user and, optionally, a click
//! callback; it renders a [`UserCardView`] and forwards activations.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::User;

pub const EMAIL_ICON: &str = "📧";
pub const DATE_ICON: &str = "📅";
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCardView {
    pub id: i64,
    pub name: String,
    pub badge: String,
    pub email: String,
    pub email_icon: String,
    pub created_at: String,
    pub date_icon: String,
    pub interactive: bool,
    pub role: Option<String>,
    pub tab_index: Option<i32>,
}

impl UserCardView {
    pub(crate) fn new(user: &User, interactive: bool) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            badge: format!("#{}", user.id),
            email: user.email.clone(),
            email_icon: EMAIL_ICON.to_string(),
            created_at: format_created_at(&user.created_at),
            date_icon: DATE_ICON.to_string(),
            interactive,
            role: interactive.then(|| "button".to_string()),
            tab_index: interactive.then_some(0),
        }
    }
}

/// Keys that activate a focused interactive card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKey {
    Enter,
    Space,
    Other,
}

/// Raw input the shell observed on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardInput {
    Click,
    Key(CardKey),
}

pub struct UserCard<'a> {
    user: &'a User,
    on_click: Option<Box<dyn FnMut(&User) + 'a>>,
}

impl<'a> UserCard<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            user,
            on_click: None,
        }
    }

    #[must_use]
    pub fn on_click(mut self, callback: impl FnMut(&User) + 'a) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn user(&self) -> &User {
        self.user
    }

    pub fn is_interactive(&self) -> bool {
        self.on_click.is_some()
    }

    pub fn render(&self) -> UserCardView {
        UserCardView::new(self.user, self.is_interactive())
    }

    /// Invokes the callback with the user. Returns whether anything ran.
    pub fn click(&mut self) -> bool {
        match self.on_click.as_mut() {
            Some(callback) => {
                callback(self.user);
                true
            }
            None => false,
        }
    }

    pub fn key_down(&mut self, key: CardKey) -> bool {
        match key {
            CardKey::Enter | CardKey::Space => self.click(),
            CardKey::Other => false,
        }
    }

    pub fn activate(&mut self, input: CardInput) -> bool {
        match input {
            CardInput::Click => self.click(),
            CardInput::Key(key) => self.key_down(key),
        }
    }
}

impl fmt::Debug for UserCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCard")
            .field("user_id", &self.user.id)
            .field("interactive", &self.is_interactive())
            .finish()
    }
}

/// Formats a backend timestamp as e.g. `Jan 5, 2024, 09:30 AM` (UTC).
///
/// Offset-aware RFC 3339 values are converted to UTC; naive values are
/// already UTC. Anything unparseable is shown as-is.
pub fn format_created_at(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}
