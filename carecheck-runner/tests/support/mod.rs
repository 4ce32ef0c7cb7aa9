//! In-process mock of the scheduling service
//!
//! Enforces the tenant header and bearer token, stores created entities,
//! answers slot queries in both wire shapes and classifies bookings the way
//! the real service does for synthetic data.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use carecheck_client::SchedulingClient;
use carecheck_runner::PipelineExecutor;
use carecheck_runner::service::{Credentials, SessionAuthenticator, StaticCredentials};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const TENANT: &str = "stage_aithinkitive";
pub const USERNAME: &str = "rose.gomez@jourrapide.com";
pub const PASSWORD: &str = "Pass@123";

/// JWT-shaped token issued for valid credentials
pub const TOKEN: &str = concat!(
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9",
    ".",
    "eyJzdWIiOiJyb3NlLmdvbWV6QGpvdXJyYXBpZGUuY29tIiwidGVuYW50Ijoic3RhZ2VfYWl0aGlua2l0aXZl",
    "IiwiaWF0IjoxNzU0MzgwMDAwfQ",
    ".",
    "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c"
);

/// Knobs for the mock's behavior
#[derive(Debug, Clone)]
pub struct MockOptions {
    /// Whether created entities show up in name searches
    pub searchable: bool,
    /// Whether configured providers have bookable slots
    pub slots: bool,
    /// Fixed status for every booking, with a message body
    pub booking_status: Option<u16>,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            searchable: true,
            slots: true,
            booking_status: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stored {
    pub uuid: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Default)]
struct Inner {
    providers: Vec<Stored>,
    patients: Vec<Stored>,
    configured: HashSet<String>,
    logins: usize,
    bookings: Vec<Value>,
}

#[derive(Clone)]
struct MockState {
    options: MockOptions,
    inner: Arc<Mutex<Inner>>,
}

/// A running mock bound to an ephemeral local port
pub struct MockService {
    pub base_url: String,
    state: MockState,
}

impl MockService {
    pub async fn start(options: MockOptions) -> Self {
        let state = MockState {
            options,
            inner: Arc::new(Mutex::new(Inner::default())),
        };

        let app = Router::new()
            .route("/api/master/login", post(login))
            .route(
                "/api/master/provider",
                get(search_providers).post(create_provider),
            )
            .route(
                "/api/master/provider/availability-setting",
                post(set_availability),
            )
            .route(
                "/api/master/provider/{id}/slots/{slot_type}",
                get(provider_slots),
            )
            .route(
                "/api/master/patient",
                get(search_patients).post(create_patient),
            )
            .route("/api/master/appointment", post(create_appointment))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> SchedulingClient {
        SchedulingClient::new(self.base_url.clone(), TENANT)
    }

    pub fn executor(&self) -> PipelineExecutor {
        self.executor_with(PASSWORD)
    }

    pub fn executor_with(&self, password: &str) -> PipelineExecutor {
        let credentials = StaticCredentials::new(Credentials::new(USERNAME, password));
        let authenticator = SessionAuthenticator::new(Arc::new(credentials), 100);
        PipelineExecutor::new(Arc::new(self.client()), Arc::new(authenticator))
    }

    pub fn providers(&self) -> Vec<Stored> {
        self.state.inner.lock().unwrap().providers.clone()
    }

    pub fn logins(&self) -> usize {
        self.state.inner.lock().unwrap().logins
    }

    pub fn bookings(&self) -> Vec<Value> {
        self.state.inner.lock().unwrap().bookings.clone()
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn envelope(code: &str, message: &str) -> Value {
    json!({
        "code": code,
        "message": message,
        "date": "2025-08-05T10:00:00.000Z",
    })
}

fn check_tenant(headers: &HeaderMap) -> Result<(), Response> {
    match headers.get("X-TENANT-ID").and_then(|v| v.to_str().ok()) {
        Some(TENANT) => Ok(()),
        _ => Err(reply(
            StatusCode::BAD_REQUEST,
            json!({"message": "Unknown tenant"}),
        )),
    }
}

fn check_auth(headers: &HeaderMap) -> Result<(), Response> {
    check_tenant(headers)?;
    let expected = format!("Bearer {}", TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(reply(
            StatusCode::UNAUTHORIZED,
            json!({"message": "Full authentication is required"}),
        )),
    }
}

fn text(body: &Value, field: &str) -> String {
    body.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn store(list: &mut Vec<Stored>, body: &Value) -> Option<()> {
    let first_name = text(body, "firstName");
    let last_name = text(body, "lastName");
    if first_name.is_empty() || last_name.is_empty() || text(body, "email").is_empty() {
        return None;
    }
    list.push(Stored {
        uuid: Uuid::new_v4().to_string(),
        first_name,
        last_name,
    });
    Some(())
}

fn search(list: &[Stored], params: &HashMap<String, String>) -> Value {
    let name = params.get("searchString").map(String::as_str).unwrap_or_default();
    let size = params
        .get("size")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);
    let content: Vec<Value> = list
        .iter()
        .filter(|s| format!("{} {}", s.first_name, s.last_name) == name)
        .take(size)
        .map(|s| json!({"uuid": s.uuid, "firstName": s.first_name, "lastName": s.last_name}))
        .collect();
    json!({"data": {"content": content}})
}

async fn login(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_tenant(&headers) {
        return resp;
    }
    state.inner.lock().unwrap().logins += 1;
    if text(&body, "username") != USERNAME || text(&body, "password") != PASSWORD {
        return reply(StatusCode::UNAUTHORIZED, json!({"message": "Bad credentials"}));
    }
    reply(StatusCode::OK, json!({"data": {"access_token": TOKEN}}))
}

async fn create_provider(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let mut inner = state.inner.lock().unwrap();
    match store(&mut inner.providers, &body) {
        Some(()) => reply(
            StatusCode::CREATED,
            envelope("PROVIDER_CREATED", "Provider created successfully"),
        ),
        None => reply(StatusCode::BAD_REQUEST, json!({"message": "Missing mandatory fields"})),
    }
}

async fn search_providers(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let inner = state.inner.lock().unwrap();
    let visible: &[Stored] = if state.options.searchable { &inner.providers } else { &[] };
    reply(StatusCode::OK, search(visible, &params))
}

async fn create_patient(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let mut inner = state.inner.lock().unwrap();
    match store(&mut inner.patients, &body) {
        Some(()) => reply(
            StatusCode::CREATED,
            envelope("PATIENT_CREATED", "Patient details added successfully"),
        ),
        None => reply(StatusCode::BAD_REQUEST, json!({"message": "Missing mandatory fields"})),
    }
}

async fn search_patients(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let inner = state.inner.lock().unwrap();
    let visible: &[Stored] = if state.options.searchable { &inner.patients } else { &[] };
    reply(StatusCode::OK, search(visible, &params))
}

async fn set_availability(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let provider_id = text(&body, "providerId");
    let mut inner = state.inner.lock().unwrap();
    if !inner.providers.iter().any(|p| p.uuid == provider_id) {
        return reply(StatusCode::NOT_FOUND, json!({"message": "Provider not found"}));
    }
    inner.configured.insert(provider_id);
    reply(
        StatusCode::OK,
        envelope("AVAILABILITY_ADDED", "Availability added successfully"),
    )
}

async fn provider_slots(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path((id, slot_type)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    if slot_type != "NEW"
        || params.get("availabilityMode").map(String::as_str) != Some("VIRTUAL")
        || !params.contains_key("startDate")
        || !params.contains_key("endDate")
    {
        return reply(StatusCode::BAD_REQUEST, json!({"message": "Invalid slot query"}));
    }

    let inner = state.inner.lock().unwrap();
    let content = if state.options.slots && inner.configured.contains(&id) {
        json!([
            {"slotTimeRange": {
                "startTime": "2025-08-06T03:30:00.000Z",
                "endTime": "2025-08-06T04:00:00.000Z"
            }},
            {"startTime": "2025-08-06T04:00:00.000Z", "endTime": "2025-08-06T04:30:00.000Z"},
        ])
    } else {
        json!([])
    };
    reply(StatusCode::OK, json!({"data": {"content": content}}))
}

async fn create_appointment(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(status) = state.options.booking_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
        return reply(status, json!({"message": "Booking refused"}));
    }
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }

    let provider_id = text(&body, "providerId");
    let patient_id = text(&body, "patientId");
    let mut inner = state.inner.lock().unwrap();
    inner.bookings.push(body.clone());

    let known_patient = inner.patients.iter().any(|p| p.uuid == patient_id);
    if !inner.configured.contains(&provider_id) || !known_patient {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({"message": "Provider is not available for the selected slot"}),
        );
    }
    reply(
        StatusCode::CREATED,
        envelope("APPOINTMENT_CREATED", "Appointment booked successfully"),
    )
}
