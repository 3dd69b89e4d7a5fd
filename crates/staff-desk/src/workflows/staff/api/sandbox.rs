use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use super::{ApiError, StaffApi};
use crate::workflows::staff::domain::{Gender, StaffId, StaffRecord, VacancyRecord};
use crate::workflows::staff::form::{FormError, LoginPassword, StaffFormPayload};

/// In-memory stand-in for the staff backend, used for demos and tests.
#[derive(Debug, Default)]
pub struct SandboxBackend {
    state: Mutex<SandboxState>,
}

#[derive(Debug, Default)]
struct SandboxState {
    last_id: i64,
    staff: Vec<StaffRecord>,
    passwords: HashMap<StaffId, LoginPassword>,
    vacancies: Vec<VacancyRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SandboxError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error("employee code '{0}' is already in use")]
    DuplicateEmployeeCode(String),
    #[error("staff {0} not found")]
    NotFound(StaffId),
}

impl SandboxBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vacancies(vacancies: Vec<VacancyRecord>) -> Self {
        let backend = Self::default();
        backend.lock().vacancies = vacancies;
        backend
    }

    pub fn add_vacancy(&self, vacancy: VacancyRecord) {
        self.lock().vacancies.push(vacancy);
    }

    pub fn staff(&self) -> Vec<StaffRecord> {
        self.lock().staff.clone()
    }

    pub fn vacancies(&self) -> Vec<VacancyRecord> {
        self.lock().vacancies.clone()
    }

    pub fn password_matches(&self, id: StaffId, candidate: &str) -> bool {
        self.lock()
            .passwords
            .get(&id)
            .is_some_and(|password| password.expose() == candidate)
    }

    pub fn create(&self, payload: &StaffFormPayload) -> Result<StaffRecord, SandboxError> {
        if payload.login_password.is_empty() {
            return Err(FormError::PasswordRequired.into());
        }
        payload.validate_fields()?;

        let mut state = self.lock();
        ensure_unique_code(&state, payload, None)?;

        state.last_id += 1;
        let id = StaffId(state.last_id);
        let record = record_from_payload(id, payload, Utc::now());
        state.staff.push(record.clone());
        state.passwords.insert(id, payload.login_password.clone());

        info!(%id, employee_code = %payload.employee_code, "sandbox staff created");
        Ok(record)
    }

    pub fn update(
        &self,
        id: StaffId,
        payload: &StaffFormPayload,
    ) -> Result<StaffRecord, SandboxError> {
        payload.validate_fields()?;

        let mut state = self.lock();
        ensure_unique_code(&state, payload, Some(id))?;

        let position = state
            .staff
            .iter()
            .position(|record| record.id == id)
            .ok_or(SandboxError::NotFound(id))?;
        let created_at = state.staff[position].created_at.unwrap_or_else(Utc::now);
        let record = record_from_payload(id, payload, created_at);
        state.staff[position] = record.clone();

        if !payload.login_password.is_empty() {
            state.passwords.insert(id, payload.login_password.clone());
        }

        info!(%id, "sandbox staff updated");
        Ok(record)
    }

    fn lock(&self) -> MutexGuard<'_, SandboxState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn ensure_unique_code(
    state: &SandboxState,
    payload: &StaffFormPayload,
    except: Option<StaffId>,
) -> Result<(), SandboxError> {
    let code = payload.employee_code.trim();
    let taken = state.staff.iter().any(|record| {
        Some(record.id) != except
            && record
                .employee_code
                .as_deref()
                .is_some_and(|existing| existing.eq_ignore_ascii_case(code))
    });
    if taken {
        Err(SandboxError::DuplicateEmployeeCode(code.to_string()))
    } else {
        Ok(())
    }
}

fn record_from_payload(
    id: StaffId,
    payload: &StaffFormPayload,
    created_at: chrono::DateTime<Utc>,
) -> StaffRecord {
    let required = |value: &str| Some(value.trim().to_string());
    let optional = |value: &str| Some(value.trim().to_string()).filter(|value| !value.is_empty());

    StaffRecord {
        id,
        first_name: required(&payload.first_name),
        last_name: required(&payload.last_name),
        email: required(&payload.email),
        phone: required(&payload.phone),
        alternate_phone: optional(&payload.alternate_phone),
        gender: Some(payload.gender).filter(|gender| *gender != Gender::Unspecified),
        date_of_birth: optional(&payload.date_of_birth),
        employee_code: required(&payload.employee_code),
        department: required(&payload.department),
        designation: required(&payload.designation),
        employment_type: Some(payload.employment_type),
        date_of_joining: required(&payload.date_of_joining),
        experience_years: Some(payload.experience_years),
        salary: Some(payload.salary),
        address_line1: required(&payload.address_line1),
        address_line2: optional(&payload.address_line2),
        city: required(&payload.city),
        state: required(&payload.state),
        postal_code: required(&payload.postal_code),
        country: required(&payload.country),
        emergency_contact_name: required(&payload.emergency_contact_name),
        emergency_contact_phone: required(&payload.emergency_contact_phone),
        status: Some(payload.status),
        notes: optional(&payload.notes),
        created_at: Some(created_at),
    }
}

#[async_trait]
impl StaffApi for SandboxBackend {
    async fn list_staff(&self) -> Result<Vec<StaffRecord>, ApiError> {
        Ok(self.staff())
    }

    async fn list_vacancies(&self) -> Result<Vec<VacancyRecord>, ApiError> {
        Ok(self.vacancies())
    }

    async fn create_staff(&self, payload: &StaffFormPayload) -> Result<StaffRecord, ApiError> {
        self.create(payload).map_err(ApiError::from)
    }

    async fn update_staff(
        &self,
        id: StaffId,
        payload: &StaffFormPayload,
    ) -> Result<StaffRecord, ApiError> {
        self.update(id, payload).map_err(ApiError::from)
    }
}

impl From<SandboxError> for ApiError {
    fn from(error: SandboxError) -> Self {
        match error {
            SandboxError::NotFound(_) => Self::Transport(error.to_string()),
            SandboxError::Invalid(_) | SandboxError::DuplicateEmployeeCode(_) => {
                Self::Validation(error.to_string())
            }
        }
    }
}

/// HTTP surface matching the routes [`super::HttpStaffApi`] calls.
pub fn sandbox_router(backend: Arc<SandboxBackend>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route(
            "/api/company/staff",
            get(list_staff_handler).post(create_staff_handler),
        )
        .route("/api/company/staff/:id", put(update_staff_handler))
        .route("/api/company/vacancies", get(list_vacancies_handler))
        .with_state(backend)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn list_staff_handler(State(backend): State<Arc<SandboxBackend>>) -> Response {
    (StatusCode::OK, Json(backend.staff())).into_response()
}

pub(crate) async fn list_vacancies_handler(
    State(backend): State<Arc<SandboxBackend>>,
) -> Response {
    (StatusCode::OK, Json(backend.vacancies())).into_response()
}

pub(crate) async fn create_staff_handler(
    State(backend): State<Arc<SandboxBackend>>,
    Json(payload): Json<StaffFormPayload>,
) -> Response {
    match backend.create(&payload) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_staff_handler(
    State(backend): State<Arc<SandboxBackend>>,
    Path(id): Path<i64>,
    Json(payload): Json<StaffFormPayload>,
) -> Response {
    match backend.update(StaffId(id), &payload) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SandboxError) -> Response {
    let status = match error {
        SandboxError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SandboxError::DuplicateEmployeeCode(_) => StatusCode::CONFLICT,
        SandboxError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
