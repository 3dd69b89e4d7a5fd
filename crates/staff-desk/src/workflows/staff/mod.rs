//! Staff management: the create/edit form, the staff directory with its
//! joined vacancies, the vacancy exports, and the backend contract.

pub mod api;
pub mod console;
pub mod directory;
pub mod domain;
pub mod export;
pub mod form;
pub mod views;

#[cfg(test)]
mod tests;

pub use api::{ApiError, HttpStaffApi, SandboxBackend, StaffApi};
pub use console::{ConsoleError, Notice, StaffConsole, StaffPageState};
pub use directory::{LoadTicket, StaffDirectory};
pub use domain::{
    EmploymentType, Gender, StaffId, StaffRecord, StaffStatus, VacancyId, VacancyRecord,
};
pub use export::{ExportFormat, VacancyExport};
pub use form::{FormError, FormMode, LoginPassword, StaffForm, StaffFormPayload, SubmitTarget};
pub use views::{StaffDetailView, StaffRowView, VacancyListingView};
