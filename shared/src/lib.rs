// lib.rs - User directory shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capabilities;
pub mod card;
pub mod config;
pub mod event;
pub mod model;

use serde::{Deserialize, Serialize};

pub use app::App;
pub use capabilities::{ApiError, Capabilities, Effect};
pub use card::{CardInput, CardKey, UserCard, UserCardView};
pub use config::{ApiConfig, ConfigError};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::{Draft, DraftError, Model, Phase, SessionId, StatusKind, StatusMessage, User};

pub const PROBE_FAILED_MESSAGE: &str = "Failed to connect to backend";
pub const FETCH_USERS_FAILED_MESSAGE: &str = "Error fetching users";
pub const FETCH_USER_FAILED_MESSAGE: &str = "Error fetching user";
pub const CREATE_SUCCESS_MESSAGE: &str = "User created successfully!";
pub const CREATE_FAILED_MESSAGE: &str = "Error creating user";

pub const CONNECTED_LABEL: &str = "Connected";
pub const DISCONNECTED_LABEL: &str = "Disconnected";
pub const SUBMIT_LABEL: &str = "Create User";
pub const SUBMITTING_LABEL: &str = "Creating...";
pub const EMPTY_TITLE: &str = "No users found";
pub const EMPTY_HINT: &str = "Create your first user above!";

#[must_use]
pub fn connected_message(reported_status: &str) -> String {
    format!("Backend connected! Status: {reported_status}")
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionView {
    pub is_connected: bool,
    pub label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormView {
    pub name: String,
    pub email: String,
    pub is_submitting: bool,
    pub can_submit: bool,
    pub submit_label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UsersView {
    Loading,
    Empty { title: String, hint: String },
    Grid { cards: Vec<UserCardView> },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub phase: Phase,
    pub connection: ConnectionView,
    pub status: Option<StatusMessage>,
    pub form: FormView,
    pub heading: String,
    pub user_count: usize,
    pub users: UsersView,
    pub selected: Option<UserCardView>,
}

pub mod app {
    use tracing::{debug, info, warn};

    use super::*;
    use crate::capabilities::{
        decode_json, expect_success, user_path, HealthStatus, HttpResult, HEALTH_PATH,
        USERS_PATH,
    };

    /// Grid cards are interactive; activating one records the selection
    /// event for its user in `selection`.
    fn grid_card<'a>(user: &'a User, selection: &'a mut Option<Event>) -> UserCard<'a> {
        UserCard::new(user).on_click(move |u| {
            *selection = Some(Event::UserSelected { id: u.id });
        })
    }

    #[derive(Default)]
    pub struct App;

    impl App {
        fn send_probe(model: &Model, caps: &Capabilities) {
            let session = model.session;
            caps.http
                .get(model.config.endpoint(HEALTH_PATH))
                .send(move |result| Event::ProbeCompleted {
                    session,
                    result: Box::new(result),
                });
        }

        fn send_refresh(model: &mut Model, caps: &Capabilities) {
            let session = model.session;
            let seq = model.begin_fetch();
            caps.http
                .get(model.config.endpoint(USERS_PATH))
                .send(move |result| Event::UsersFetched {
                    session,
                    seq,
                    result: Box::new(result),
                });
        }

        fn send_create(model: &mut Model, caps: &Capabilities) {
            let session = model.session;
            let request = caps
                .http
                .post(model.config.endpoint(USERS_PATH))
                .body_json(&model.draft);

            match request {
                Ok(builder) => {
                    model.is_submitting = true;
                    builder.send(move |result| Event::UserCreated {
                        session,
                        result: Box::new(result),
                    });
                }
                Err(e) => {
                    warn!(error = %e, "create request could not be encoded");
                    model.set_status(StatusMessage::error(CREATE_FAILED_MESSAGE));
                }
            }
        }

        /// The event the grid card for user `id` emits for `input`, if any.
        pub fn card_event(model: &Model, id: i64, input: CardInput) -> Option<Event> {
            let user = model.users.iter().find(|u| u.id == id)?;
            let mut selection = None;
            grid_card(user, &mut selection).activate(input);
            selection
        }

        fn send_user_lookup(id: i64, model: &Model, caps: &Capabilities) {
            let session = model.session;
            caps.http
                .get(model.config.endpoint(&user_path(id)))
                .send(move |result| Event::UserFetched {
                    session,
                    id,
                    result: Box::new(result),
                });
        }

        fn handle_probe_response(result: HttpResult, model: &mut Model) {
            match decode_json::<HealthStatus>(result) {
                Ok(health) => {
                    info!(status = %health.status, "backend reachable");
                    model.is_connected = true;
                    model.set_status(StatusMessage::success(connected_message(&health.status)));
                }
                Err(e) => {
                    warn!(status = ?e.status(), error = %e, "health probe failed");
                    model.is_connected = false;
                    model.set_status(StatusMessage::error(PROBE_FAILED_MESSAGE));
                }
            }
        }

        fn handle_users_response(seq: u64, result: HttpResult, model: &mut Model) {
            if !model.settle_fetch(seq) {
                debug!(seq, settled = model.fetch_settled, "dropping superseded list response");
                return;
            }

            match decode_json::<Vec<User>>(result) {
                Ok(users) => {
                    info!(count = users.len(), "user list refreshed");
                    model.users = users;
                }
                Err(e) => {
                    warn!(status = ?e.status(), error = %e, "user list fetch failed");
                    model.set_status(StatusMessage::error(FETCH_USERS_FAILED_MESSAGE));
                }
            }
        }

        fn handle_create_response(result: HttpResult, model: &mut Model, caps: &Capabilities) {
            model.is_submitting = false;

            match expect_success(result) {
                Ok(body) => {
                    // Any 2xx counts; the body is only read for the log line.
                    if let Ok(user) = serde_json::from_slice::<User>(&body) {
                        info!(user_id = user.id, "user created");
                    } else {
                        info!("user created");
                    }
                    model.draft.clear();
                    model.set_status(StatusMessage::success(CREATE_SUCCESS_MESSAGE));
                    Self::send_refresh(model, caps);
                }
                Err(e) => {
                    warn!(status = ?e.status(), error = %e, "user creation failed");
                    model.set_status(StatusMessage::error(e.user_message(CREATE_FAILED_MESSAGE)));
                }
            }
        }

        fn handle_user_response(id: i64, result: HttpResult, model: &mut Model) {
            if model.selected_id != Some(id) {
                debug!(user_id = id, "dropping lookup for a user no longer selected");
                return;
            }

            match decode_json::<User>(result) {
                Ok(user) => model.selected = Some(user),
                Err(e) => {
                    warn!(user_id = id, status = ?e.status(), error = %e, "user lookup failed");
                    model.selected_id = None;
                    model.set_status(StatusMessage::error(
                        e.user_message(FETCH_USER_FAILED_MESSAGE),
                    ));
                }
            }
        }

        fn build_users_view(model: &Model) -> UsersView {
            if !model.users.is_empty() {
                return UsersView::Grid {
                    cards: model
                        .users
                        .iter()
                        .map(|user| grid_card(user, &mut None).render())
                        .collect(),
                };
            }

            if model.is_fetching() {
                UsersView::Loading
            } else {
                UsersView::Empty {
                    title: EMPTY_TITLE.into(),
                    hint: EMPTY_HINT.into(),
                }
            }
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            debug!(
                event = event.name(),
                user_initiated = event.is_user_initiated(),
                "update"
            );

            if !model.mounted && !matches!(event, Event::Mounted { .. }) {
                debug!(event = event.name(), "ignoring event while unmounted");
                return;
            }

            if let Some(session) = event.session() {
                if session != model.session {
                    debug!(event = event.name(), "dropping response from a previous session");
                    return;
                }
            }

            match event {
                Event::Mounted { config } => {
                    model.reset(config);
                    model.mounted = true;

                    Self::send_probe(model, caps);
                    Self::send_refresh(model, caps);
                    caps.render.render();
                }

                Event::Unmounted => {
                    let config = model.config.clone();
                    model.reset(config);
                }

                Event::ProbeRequested => {
                    Self::send_probe(model, caps);
                }

                Event::RefreshRequested => {
                    Self::send_refresh(model, caps);
                    caps.render.render();
                }

                Event::NameChanged(name) => {
                    if model.is_submitting {
                        return;
                    }
                    model.draft.name = name;
                    caps.render.render();
                }

                Event::EmailChanged(email) => {
                    if model.is_submitting {
                        return;
                    }
                    model.draft.email = email;
                    caps.render.render();
                }

                Event::CreateRequested => {
                    if model.is_submitting {
                        debug!("create ignored while a submission is in flight");
                        return;
                    }

                    if let Err(e) = model.draft.validate() {
                        debug!(reason = %e, "create suppressed");
                        return;
                    }

                    Self::send_create(model, caps);
                    caps.render.render();
                }

                Event::UserSelected { id } => {
                    model.selected_id = Some(id);
                    model.selected = None;

                    Self::send_user_lookup(id, model, caps);
                    caps.render.render();
                }

                Event::CardActivated { id, input } => {
                    match Self::card_event(model, id, input) {
                        Some(event) => self.update(event, model, caps),
                        None => {
                            debug!(user_id = id, "card activation ignored");
                        }
                    }
                }

                Event::SelectionCleared => {
                    model.selected_id = None;
                    model.selected = None;
                    caps.render.render();
                }

                Event::ProbeCompleted { result, .. } => {
                    Self::handle_probe_response(*result, model);
                    caps.render.render();
                }

                Event::UsersFetched { seq, result, .. } => {
                    Self::handle_users_response(seq, *result, model);
                    caps.render.render();
                }

                Event::UserCreated { result, .. } => {
                    Self::handle_create_response(*result, model, caps);
                    caps.render.render();
                }

                Event::UserFetched { id, result, .. } => {
                    Self::handle_user_response(id, *result, model);
                    caps.render.render();
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            let connection = ConnectionView {
                is_connected: model.is_connected,
                label: if model.is_connected {
                    CONNECTED_LABEL
                } else {
                    DISCONNECTED_LABEL
                }
                .into(),
            };

            let form = FormView {
                name: model.draft.name.clone(),
                email: model.draft.email.clone(),
                is_submitting: model.is_submitting,
                can_submit: !model.is_submitting && model.draft.validate().is_ok(),
                submit_label: if model.is_submitting {
                    SUBMITTING_LABEL
                } else {
                    SUBMIT_LABEL
                }
                .into(),
            };

            ViewModel {
                phase: model.phase(),
                connection,
                status: model.status.clone(),
                form,
                heading: format!("Users List ({})", model.users.len()),
                user_count: model.users.len(),
                users: Self::build_users_view(model),
                selected: model
                    .selected
                    .as_ref()
                    .map(|user| UserCard::new(user).render()),
            }
        }
    }
}
