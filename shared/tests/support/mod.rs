#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_core::Request;
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};
use crux_http::HttpError;
use serde::Serialize;
use shared::{ApiConfig, App, Effect, Event, Model, User};

pub const BASE: &str = "http://api.test";

pub fn tester() -> AppTester<App, Effect> {
    AppTester::default()
}

pub fn config() -> ApiConfig {
    ApiConfig::new(BASE).expect("valid test origin")
}

pub fn user(id: i64, name: &str, email: &str) -> User {
    User {
        id,
        name: name.into(),
        email: email.into(),
        created_at: "2024-01-05T09:30:00.123456".into(),
    }
}

pub fn http_requests(effects: Vec<Effect>) -> Vec<Request<HttpRequest>> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .collect()
}

pub fn describe(request: &Request<HttpRequest>) -> (String, String) {
    (request.operation.method.clone(), request.operation.url.clone())
}

pub fn ok_json(body: &impl Serialize) -> HttpResult {
    HttpResult::Ok(HttpResponse::ok().json(body).build())
}

pub fn status_json(status: u16, body: &impl Serialize) -> HttpResult {
    HttpResult::Ok(HttpResponse::status(status).json(body).build())
}

pub fn status_text(status: u16, body: &str) -> HttpResult {
    HttpResult::Ok(HttpResponse::status(status).body(body.as_bytes().to_vec()).build())
}

pub fn network_failure() -> HttpResult {
    HttpResult::Err(HttpError::Io("connection refused".into()))
}

/// Answers `request` and feeds the resulting events back into the app,
/// returning every effect the app asked for in response.
pub fn respond(
    app: &AppTester<App, Effect>,
    request: &mut Request<HttpRequest>,
    response: HttpResult,
    model: &mut Model,
) -> Vec<Effect> {
    let update = app.resolve(request, response).expect("request resolves");
    update
        .events
        .into_iter()
        .flat_map(|event| app.update(event, model).effects)
        .collect()
}

/// Mounts the app and returns the (probe, list) requests it issued.
pub fn mount(
    app: &AppTester<App, Effect>,
    model: &mut Model,
) -> (Request<HttpRequest>, Request<HttpRequest>) {
    let update = app.update(Event::Mounted { config: config() }, model);
    let mut requests = http_requests(update.effects);
    assert_eq!(requests.len(), 2, "mount issues a probe and a list fetch");

    let list = requests.pop().expect("list request");
    let probe = requests.pop().expect("probe request");
    assert_eq!(describe(&probe), ("GET".into(), format!("{BASE}/health")));
    assert_eq!(describe(&list), ("GET".into(), format!("{BASE}/users/")));
    (probe, list)
}

/// Mounts, answers the probe as healthy and the list with `users`.
pub fn mounted_with(app: &AppTester<App, Effect>, users: &[User]) -> Model {
    let mut model = Model::default();
    let (mut probe, mut list) = mount(app, &mut model);
    respond(app, &mut probe, ok_json(&serde_json::json!({ "status": "healthy" })), &mut model);
    respond(app, &mut list, ok_json(&users), &mut model);
    model
}

pub fn type_draft(app: &AppTester<App, Effect>, model: &mut Model, name: &str, email: &str) {
    app.update(Event::NameChanged(name.into()), model);
    app.update(Event::EmailChanged(email.into()), model);
}
