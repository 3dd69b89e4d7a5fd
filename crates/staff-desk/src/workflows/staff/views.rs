use serde::Serialize;

use super::domain::{StaffId, StaffRecord, VacancyRecord};
use super::export::format_percentage;

const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffRowView {
    pub id: StaffId,
    pub name: String,
    pub code: String,
    pub department: String,
    pub designation: String,
    pub status: &'static str,
}

impl From<&StaffRecord> for StaffRowView {
    fn from(record: &StaffRecord) -> Self {
        Self {
            id: record.id,
            name: record.full_name(),
            code: record.employee_code().to_string(),
            department: record.department.clone().unwrap_or_default(),
            designation: record.designation.clone().unwrap_or_default(),
            status: record.status.map(|status| status.label()).unwrap_or_default(),
        }
    }
}

/// Expanded-row detail panel. Blank optional fields render as `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffDetailView {
    pub name: String,
    pub details: Vec<(&'static str, String)>,
    pub address: String,
    pub notes: String,
}

impl From<&StaffRecord> for StaffDetailView {
    fn from(record: &StaffRecord) -> Self {
        let details = vec![
            ("Email", text(&record.email)),
            ("Phone", text(&record.phone)),
            ("Alternate Phone", or_placeholder(&record.alternate_phone)),
            (
                "Gender",
                record
                    .gender
                    .map(|gender| gender.as_str().to_string())
                    .filter(|gender| !gender.is_empty())
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            ),
            ("Date of Birth", or_placeholder(&record.date_of_birth)),
            (
                "Employment Type",
                record
                    .employment_type
                    .map(|kind| kind.as_str().to_string())
                    .unwrap_or_default(),
            ),
            ("Date of Joining", text(&record.date_of_joining)),
            (
                "Experience (Years)",
                record.experience_years.unwrap_or_default().to_string(),
            ),
            ("Salary", record.salary.unwrap_or_default().to_string()),
            ("Emergency Contact", text(&record.emergency_contact_name)),
            ("Emergency Phone", text(&record.emergency_contact_phone)),
            (
                "Created At",
                record
                    .created_at
                    .map(|created| created.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            ),
        ];

        Self {
            name: record.full_name(),
            details,
            address: compose_address(record),
            notes: or_placeholder(&record.notes),
        }
    }
}

/// `line1[, line2], city, state, postal, country`.
pub fn compose_address(record: &StaffRecord) -> String {
    let mut address = text(&record.address_line1);
    if let Some(line2) = record.address_line2.as_deref().filter(|line| !line.is_empty()) {
        address.push_str(", ");
        address.push_str(line2);
    }
    for part in [
        &record.city,
        &record.state,
        &record.postal_code,
        &record.country,
    ] {
        address.push_str(", ");
        address.push_str(part.as_deref().unwrap_or_default());
    }
    address
}

/// Row of the company-wide vacancy listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyListingView {
    pub job_title: String,
    pub department: String,
    pub employment_type: String,
    pub openings: u32,
    pub match_threshold: String,
    pub mcq_config: String,
    pub created_by: String,
    pub status: String,
}

impl From<&VacancyRecord> for VacancyListingView {
    fn from(vacancy: &VacancyRecord) -> Self {
        Self {
            job_title: vacancy.job_title.clone(),
            department: vacancy.department.clone(),
            employment_type: vacancy.employment_type.clone(),
            openings: vacancy.openings,
            match_threshold: format_percentage(vacancy.match_threshold),
            mcq_config: format!(
                "{} Q / {}",
                vacancy.mcq_question_count,
                format_percentage(vacancy.mcq_pass_threshold)
            ),
            created_by: or_placeholder(&vacancy.created_by_name),
            status: vacancy.status.clone(),
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn or_placeholder(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}
