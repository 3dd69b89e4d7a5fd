use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::workflows::staff::api::{ApiError, StaffApi};
use crate::workflows::staff::domain::{
    EmploymentType, StaffId, StaffRecord, StaffStatus, VacancyId, VacancyRecord,
};
use crate::workflows::staff::form::StaffFormPayload;

/// Scriptable backend double. Failures are consumed by the next matching call.
#[derive(Default)]
pub(super) struct FakeApi {
    pub staff: Mutex<Vec<StaffRecord>>,
    pub vacancies: Mutex<Vec<VacancyRecord>>,
    pub staff_failure: Mutex<Option<ApiError>>,
    pub vacancy_failure: Mutex<Option<ApiError>>,
    pub submit_failure: Mutex<Option<ApiError>>,
    pub submissions: Mutex<Vec<(Option<StaffId>, StaffFormPayload)>>,
    pub submit_gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn seeded() -> Self {
        Self {
            staff: Mutex::new(vec![staff_record(1, "EMP-001"), staff_record(2, "EMP-002")]),
            vacancies: Mutex::new(vec![
                vacancy(10, "Backend Engineer", 82.6, Some(1)),
                vacancy(11, "Recruiter", 70.0, Some(2)),
                vacancy(12, "Data Analyst", 64.5, Some(1)),
            ]),
            ..Self::default()
        }
    }

    /// Submissions block until the returned handle is notified.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.submit_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn fail_vacancies_with(&self, message: &str) {
        *self.vacancy_failure.lock().expect("fake lock") =
            Some(ApiError::Transport(message.to_string()));
    }

    pub fn fail_staff_with(&self, message: &str) {
        *self.staff_failure.lock().expect("fake lock") =
            Some(ApiError::Transport(message.to_string()));
    }

    pub fn fail_next_submit_with(&self, error: ApiError) {
        *self.submit_failure.lock().expect("fake lock") = Some(error);
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().expect("fake lock").len()
    }

    async fn record_submission(
        &self,
        id: Option<StaffId>,
        payload: &StaffFormPayload,
    ) -> Result<StaffRecord, ApiError> {
        if let Some(gate) = &self.submit_gate {
            gate.notified().await;
        }
        self.submissions
            .lock()
            .expect("fake lock")
            .push((id, payload.clone()));
        if let Some(error) = self.submit_failure.lock().expect("fake lock").take() {
            return Err(error);
        }

        let mut staff = self.staff.lock().expect("fake lock");
        let id = id.unwrap_or(StaffId(staff.len() as i64 + 1));
        let mut record = staff_record(id.0, &payload.employee_code);
        record.first_name = Some(payload.first_name.clone());
        record.last_name = Some(payload.last_name.clone());
        match staff.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = record.clone(),
            None => staff.push(record.clone()),
        }
        Ok(record)
    }
}

#[async_trait]
impl StaffApi for FakeApi {
    async fn list_staff(&self) -> Result<Vec<StaffRecord>, ApiError> {
        if let Some(error) = self.staff_failure.lock().expect("fake lock").take() {
            return Err(error);
        }
        Ok(self.staff.lock().expect("fake lock").clone())
    }

    async fn list_vacancies(&self) -> Result<Vec<VacancyRecord>, ApiError> {
        if let Some(error) = self.vacancy_failure.lock().expect("fake lock").take() {
            return Err(error);
        }
        Ok(self.vacancies.lock().expect("fake lock").clone())
    }

    async fn create_staff(&self, payload: &StaffFormPayload) -> Result<StaffRecord, ApiError> {
        self.record_submission(None, payload).await
    }

    async fn update_staff(
        &self,
        id: StaffId,
        payload: &StaffFormPayload,
    ) -> Result<StaffRecord, ApiError> {
        self.record_submission(Some(id), payload).await
    }
}

pub(super) fn staff_record(id: i64, code: &str) -> StaffRecord {
    StaffRecord {
        id: StaffId(id),
        first_name: Some("Priya".to_string()),
        last_name: Some(format!("Menon{id}")),
        email: Some(format!("priya{id}@example.com")),
        phone: Some("+91 98450 00000".to_string()),
        alternate_phone: None,
        gender: None,
        date_of_birth: None,
        employee_code: Some(code.to_string()),
        department: Some("Talent".to_string()),
        designation: Some("Recruiter".to_string()),
        employment_type: Some(EmploymentType::FullTime),
        date_of_joining: Some("2023-04-03".to_string()),
        experience_years: Some(6.0),
        salary: Some(1_250_000.0),
        address_line1: Some("12 MG Road".to_string()),
        address_line2: None,
        city: Some("Bengaluru".to_string()),
        state: Some("Karnataka".to_string()),
        postal_code: Some("560001".to_string()),
        country: Some("India".to_string()),
        emergency_contact_name: Some("Ravi Menon".to_string()),
        emergency_contact_phone: Some("+91 98450 11111".to_string()),
        status: Some(StaffStatus::Active),
        notes: None,
        created_at: None,
    }
}

pub(super) fn vacancy(id: i64, title: &str, threshold: f64, owner: Option<i64>) -> VacancyRecord {
    VacancyRecord {
        id: VacancyId(id),
        job_title: title.to_string(),
        department: "Engineering".to_string(),
        employment_type: "full-time".to_string(),
        openings: 2,
        match_threshold: threshold,
        mcq_question_count: 20,
        mcq_pass_threshold: 70.0,
        status: "open".to_string(),
        created_by_staff_id: owner.map(StaffId),
        created_by_name: owner.map(|_| "Priya Menon".to_string()),
    }
}

/// A payload that passes every field-level check.
pub(super) fn complete_payload(code: &str) -> StaffFormPayload {
    StaffFormPayload {
        first_name: "Arjun".to_string(),
        last_name: "Rao".to_string(),
        email: "arjun.rao@example.com".to_string(),
        phone: "+91 90000 12345".to_string(),
        employee_code: code.to_string(),
        department: "Engineering".to_string(),
        designation: "Hiring Manager".to_string(),
        date_of_joining: "2024-01-15".to_string(),
        experience_years: 8.5,
        salary: 2_400_000.0,
        address_line1: "4 Residency Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        postal_code: "560025".to_string(),
        country: "India".to_string(),
        emergency_contact_name: "Meera Rao".to_string(),
        emergency_contact_phone: "+91 90000 54321".to_string(),
        ..StaffFormPayload::default()
    }
}
