pub mod http;

pub use self::http::{
    decode_json, expect_success, user_path, ApiError, HealthStatus, HttpResult, HEALTH_PATH,
    USERS_PATH,
};

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::event::Event;

pub type AppHttp = Http<Event>;
pub type AppRender = Render<Event>;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
