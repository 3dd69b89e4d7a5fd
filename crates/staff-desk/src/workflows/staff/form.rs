//! Create/edit lifecycle for the staff form.
//!
//! [`StaffForm`] owns the draft payload, the separately held password
//! confirmation, the create/edit mode, and the in-flight flag. All transitions
//! are synchronous; the console drives the async backend call between
//! [`StaffForm::begin_submit`] and [`StaffForm::finish_submit`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::{EmploymentType, Gender, StaffId, StaffRecord, StaffStatus, UnknownVariant};

/// Write-only password value. Never shown in debug output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginPassword(String);

impl LoginPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for LoginPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("LoginPassword(<empty>)")
        } else {
            f.write_str("LoginPassword(<redacted>)")
        }
    }
}

/// Draft sent to the backend on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffFormPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub alternate_phone: String,
    pub gender: Gender,
    pub date_of_birth: String,
    pub employee_code: String,
    pub department: String,
    pub designation: String,
    pub employment_type: EmploymentType,
    pub date_of_joining: String,
    pub experience_years: f64,
    pub salary: f64,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub status: StaffStatus,
    pub notes: String,
    pub login_password: LoginPassword,
}

impl StaffFormPayload {
    /// Total mapping from a loaded record into an edit draft.
    ///
    /// Absent strings become `""`, absent numbers `0`, absent employment type
    /// `full-time`, absent status `active`, absent gender unspecified. The
    /// password is always empty.
    pub fn from_record(record: &StaffRecord) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            first_name: text(&record.first_name),
            last_name: text(&record.last_name),
            email: text(&record.email),
            phone: text(&record.phone),
            alternate_phone: text(&record.alternate_phone),
            gender: record.gender.unwrap_or_default(),
            date_of_birth: text(&record.date_of_birth),
            employee_code: text(&record.employee_code),
            department: text(&record.department),
            designation: text(&record.designation),
            employment_type: record.employment_type.unwrap_or_default(),
            date_of_joining: text(&record.date_of_joining),
            experience_years: record.experience_years.unwrap_or_default(),
            salary: record.salary.unwrap_or_default(),
            address_line1: text(&record.address_line1),
            address_line2: text(&record.address_line2),
            city: text(&record.city),
            state: text(&record.state),
            postal_code: text(&record.postal_code),
            country: text(&record.country),
            emergency_contact_name: text(&record.emergency_contact_name),
            emergency_contact_phone: text(&record.emergency_contact_phone),
            status: record.status.unwrap_or_default(),
            notes: text(&record.notes),
            login_password: LoginPassword::default(),
        }
    }

    /// Update one field from its textual form, keyed by the wire name.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let key = field.trim().replace('-', "_").to_ascii_lowercase();
        let slot = match key.as_str() {
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "alternate_phone" => &mut self.alternate_phone,
            "date_of_birth" => &mut self.date_of_birth,
            "employee_code" => &mut self.employee_code,
            "department" => &mut self.department,
            "designation" => &mut self.designation,
            "date_of_joining" => &mut self.date_of_joining,
            "address_line1" => &mut self.address_line1,
            "address_line2" => &mut self.address_line2,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "postal_code" => &mut self.postal_code,
            "country" => &mut self.country,
            "emergency_contact_name" => &mut self.emergency_contact_name,
            "emergency_contact_phone" => &mut self.emergency_contact_phone,
            "notes" => &mut self.notes,
            "gender" => {
                self.gender = value.parse().map_err(|err| invalid("gender", err))?;
                return Ok(());
            }
            "employment_type" => {
                self.employment_type = value
                    .parse()
                    .map_err(|err| invalid("employment_type", err))?;
                return Ok(());
            }
            "status" => {
                self.status = value.parse().map_err(|err| invalid("status", err))?;
                return Ok(());
            }
            "experience_years" => {
                self.experience_years = parse_number("experience_years", value)?;
                return Ok(());
            }
            "salary" => {
                self.salary = parse_number("salary", value)?;
                return Ok(());
            }
            "login_password" => {
                self.login_password = LoginPassword::new(value);
                return Ok(());
            }
            _ => return Err(FormError::UnknownField(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn required_fields(&self) -> [(&'static str, &str); 15] {
        [
            ("First Name", self.first_name.as_str()),
            ("Last Name", self.last_name.as_str()),
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
            ("Employee Code", self.employee_code.as_str()),
            ("Department", self.department.as_str()),
            ("Designation", self.designation.as_str()),
            ("Date of Joining", self.date_of_joining.as_str()),
            ("Address Line 1", self.address_line1.as_str()),
            ("City", self.city.as_str()),
            ("State", self.state.as_str()),
            ("Postal Code", self.postal_code.as_str()),
            ("Country", self.country.as_str()),
            ("Emergency Contact Name", self.emergency_contact_name.as_str()),
            ("Emergency Contact Phone", self.emergency_contact_phone.as_str()),
        ]
    }

    /// Field-level checks shared by the form and the sandbox backend.
    /// Password rules depend on the mode and live in [`StaffForm`].
    pub fn validate_fields(&self) -> Result<(), FormError> {
        if let Some((label, _)) = self
            .required_fields()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(FormError::MissingField(label));
        }

        if !looks_like_email(&self.email) {
            return Err(FormError::InvalidEmail(self.email.clone()));
        }

        check_date("Date of Joining", &self.date_of_joining)?;
        if !self.date_of_birth.trim().is_empty() {
            check_date("Date of Birth", &self.date_of_birth)?;
        }

        if !self.experience_years.is_finite() || self.experience_years < 0.0 {
            return Err(FormError::NegativeNumber("Experience (years)"));
        }
        if !self.salary.is_finite() || self.salary < 0.0 {
            return Err(FormError::NegativeNumber("Salary"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, err: UnknownVariant) -> FormError {
    FormError::InvalidValue {
        field,
        value: err.0,
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| FormError::InvalidValue {
            field,
            value: value.to_string(),
        })
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

fn check_date(label: &'static str, value: &str) -> Result<(), FormError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| FormError::InvalidDate {
            field: label,
            value: value.to_string(),
        })
}

/// Local validation failures and guard rejections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Login password is required for new staff")]
    PasswordRequired,
    #[error("Password and confirm password do not match")]
    PasswordMismatch,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("{field} must be a YYYY-MM-DD date, got '{value}'")]
    InvalidDate { field: &'static str, value: String },
    #[error("{0} cannot be negative")]
    NegativeNumber(&'static str),
    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },
    #[error("unknown staff field '{0}'")]
    UnknownField(String),
    #[error("a staff submission is already in progress")]
    SubmissionInFlight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Editing(StaffId),
}

/// Which backend call a validated submission goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(StaffId),
}

impl SubmitTarget {
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Staff created successfully.",
            Self::Update(_) => "Staff updated successfully.",
        }
    }
}

/// Snapshot of a validated draft, handed to the backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    pub target: SubmitTarget,
    pub payload: StaffFormPayload,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffForm {
    mode: FormMode,
    payload: StaffFormPayload,
    confirmation: LoginPassword,
    in_flight: bool,
}

impl StaffForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn payload(&self) -> &StaffFormPayload {
        &self.payload
    }

    pub fn confirmation(&self) -> &LoginPassword {
        &self.confirmation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn editing_id(&self) -> Option<StaffId> {
        match self.mode {
            FormMode::Create => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    pub fn start_edit(&mut self, record: &StaffRecord) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.payload = StaffFormPayload::from_record(record);
        self.mode = FormMode::Editing(record.id);
        self.confirmation = LoginPassword::default();
        Ok(())
    }

    pub fn cancel_edit(&mut self) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.reset();
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.payload.set_field(field, value)
    }

    pub fn set_confirmation(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.confirmation = LoginPassword::new(value);
        Ok(())
    }

    /// Validate and mark the form as submitting.
    ///
    /// On success the caller owns the only outstanding ticket until
    /// [`Self::finish_submit`] runs.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, FormError> {
        self.ensure_idle()?;

        let password = &self.payload.login_password;
        if self.mode == FormMode::Create && password.is_empty() {
            return Err(FormError::PasswordRequired);
        }
        if !password.is_empty() && *password != self.confirmation {
            return Err(FormError::PasswordMismatch);
        }
        self.payload.validate_fields()?;

        self.in_flight = true;
        let target = match self.mode {
            FormMode::Create => SubmitTarget::Create,
            FormMode::Editing(id) => SubmitTarget::Update(id),
        };
        Ok(SubmitTicket {
            target,
            payload: self.payload.clone(),
        })
    }

    /// Close the outstanding submission. Success resets to a blank create
    /// form; failure keeps the draft and mode as they were.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.in_flight = false;
        if succeeded {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.payload = StaffFormPayload::default();
        self.confirmation = LoginPassword::default();
    }

    fn ensure_idle(&self) -> Result<(), FormError> {
        if self.in_flight {
            Err(FormError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }
}
