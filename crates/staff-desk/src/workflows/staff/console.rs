//! Session controller for the staff page.
//!
//! [`StaffPageState`] holds everything a render needs and changes only through
//! synchronous transitions. [`StaffConsole`] wraps it behind a mutex, performs
//! the backend calls, and applies their results. The mutex is never held
//! across an `.await`, and nothing is written back once the console has been
//! unmounted.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::api::{ApiError, StaffApi};
use super::directory::StaffDirectory;
use super::domain::{StaffId, StaffRecord, VacancyRecord};
use super::export::{ExportError, ExportFormat, VacancyExport};
use super::form::{FormError, StaffForm, SubmitTarget};

/// The single user-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("staff {0} is not in the loaded directory")]
    UnknownStaff(StaffId),
    #[error("no staff row is expanded")]
    NothingExpanded,
    #[error("the staff console has been closed")]
    Detached,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffPageState {
    pub form: StaffForm,
    pub directory: StaffDirectory,
    pub notice: Option<Notice>,
}

impl StaffPageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_edit(&mut self, id: StaffId) -> Result<(), ConsoleError> {
        let record = self
            .directory
            .record(id)
            .cloned()
            .ok_or(ConsoleError::UnknownStaff(id))?;
        self.form.start_edit(&record)?;
        self.notice = None;
        Ok(())
    }

    pub fn cancel_edit(&mut self) -> Result<(), ConsoleError> {
        self.form.cancel_edit()?;
        self.notice = None;
        Ok(())
    }

    pub fn toggle_expand(&mut self, id: StaffId) -> Option<StaffId> {
        self.directory.toggle_expand(id)
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Error(message.into()));
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Success(message.into()));
    }

    /// Expanded record and its vacancies, detached from the state.
    pub fn expanded_export(&self) -> Result<(StaffRecord, Vec<VacancyRecord>), ConsoleError> {
        let record = self
            .directory
            .expanded_record()
            .cloned()
            .ok_or(ConsoleError::NothingExpanded)?;
        let vacancies = self
            .directory
            .expanded_vacancies()
            .into_iter()
            .cloned()
            .collect();
        Ok((record, vacancies))
    }
}

pub struct StaffConsole<A> {
    api: Arc<A>,
    state: Arc<Mutex<StaffPageState>>,
    mounted: Arc<AtomicBool>,
}

impl<A> Clone for StaffConsole<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            mounted: Arc::clone(&self.mounted),
        }
    }
}

impl<A> StaffConsole<A>
where
    A: StaffApi + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(StaffPageState::new())),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn snapshot(&self) -> StaffPageState {
        self.lock().clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.lock().notice.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Tear the page down. Calls still in flight finish, but their results
    /// are dropped instead of written into the state. A submission pending at
    /// unmount therefore leaves the form marked in flight; every later call
    /// fails with [`ConsoleError::Detached`], so nothing observes it.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    /// Fetch staff and vacancies concurrently and replace both lists
    /// together. On failure nothing is replaced.
    pub async fn load(&self) -> Result<(), ConsoleError> {
        let ticket = {
            let mut state = self.lock();
            if !self.is_mounted() {
                return Err(ConsoleError::Detached);
            }
            if state.notice.as_ref().is_some_and(Notice::is_error) {
                state.notice = None;
            }
            state.directory.begin_load()
        };

        let (staff, vacancies) = tokio::join!(self.api.list_staff(), self.api.list_vacancies());
        let outcome = match (staff, vacancies) {
            (Ok(staff), Ok(vacancies)) => Ok((staff, vacancies)),
            (Err(error), _) | (_, Err(error)) => Err(error),
        };

        if !self.is_mounted() {
            debug!("console unmounted; discarding directory load result");
            return outcome.map(|_| ()).map_err(ConsoleError::from);
        }

        let mut state = self.lock();
        match outcome {
            Ok((staff, vacancies)) => {
                let (staff_count, vacancy_count) = (staff.len(), vacancies.len());
                if state.directory.complete_load(ticket, staff, vacancies) {
                    info!(staff = staff_count, vacancies = vacancy_count, "staff directory loaded");
                } else {
                    debug!("newer directory load in progress; discarding stale result");
                }
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "staff directory load failed");
                if state.directory.fail_load(ticket) {
                    state.show_error(error.to_string());
                }
                Err(error.into())
            }
        }
    }

    pub fn start_edit(&self, id: StaffId) -> Result<(), ConsoleError> {
        self.lock().start_edit(id)
    }

    pub fn cancel_edit(&self) -> Result<(), ConsoleError> {
        self.lock().cancel_edit()
    }

    pub fn set_field(&self, field: &str, value: &str) -> Result<(), ConsoleError> {
        self.lock().form.set_field(field, value)?;
        Ok(())
    }

    pub fn set_confirmation(&self, value: impl Into<String>) -> Result<(), ConsoleError> {
        self.lock().form.set_confirmation(value)?;
        Ok(())
    }

    pub fn toggle_expand(&self, id: StaffId) -> Option<StaffId> {
        self.lock().toggle_expand(id)
    }

    /// Validate, send create or update, then reload the directory.
    ///
    /// A second call while one is pending is rejected with
    /// [`FormError::SubmissionInFlight`] and leaves the state alone.
    pub async fn submit(&self) -> Result<StaffRecord, ConsoleError> {
        let ticket = {
            let mut state = self.lock();
            if !self.is_mounted() {
                return Err(ConsoleError::Detached);
            }
            match state.form.begin_submit() {
                Ok(ticket) => {
                    state.notice = None;
                    ticket
                }
                Err(FormError::SubmissionInFlight) => {
                    debug!("submission already in flight; ignoring");
                    return Err(FormError::SubmissionInFlight.into());
                }
                Err(error) => {
                    state.show_error(error.to_string());
                    return Err(error.into());
                }
            }
        };

        info!(kind = ?ticket.target, "submitting staff form");
        let result = match ticket.target {
            SubmitTarget::Create => self.api.create_staff(&ticket.payload).await,
            SubmitTarget::Update(id) => self.api.update_staff(id, &ticket.payload).await,
        };

        if !self.is_mounted() {
            debug!("console unmounted; discarding submission result");
            return result.map_err(ConsoleError::from);
        }

        {
            let mut state = self.lock();
            match &result {
                Ok(record) => {
                    info!(id = %record.id, "staff saved");
                    state.form.finish_submit(true);
                    state.show_success(ticket.target.success_message());
                }
                Err(error) => {
                    warn!(error = %error, "staff submission failed");
                    state.form.finish_submit(false);
                    state.show_error(error.to_string());
                }
            }
        }

        let record = result?;
        if let Err(error) = self.load().await {
            warn!(error = %error, "directory reload after save failed");
        }
        Ok(record)
    }

    /// Write the expanded row's vacancies in `format` under `dir`.
    pub fn export_expanded(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf, ConsoleError> {
        let (record, vacancies) = self.lock().expanded_export()?;
        let export = VacancyExport::new(&record, vacancies.iter().collect());

        export.write(format, dir).map_err(|error| {
            warn!(error = %error, %format, "vacancy export failed");
            if self.is_mounted() {
                self.lock().show_error(error.to_string());
            }
            ConsoleError::from(error)
        })
    }

    fn lock(&self) -> MutexGuard<'_, StaffPageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
