//! Contract with the backend that owns staff and vacancy records.

mod http;
pub mod sandbox;

use async_trait::async_trait;
use std::sync::Arc;

use super::domain::{StaffId, StaffRecord, VacancyRecord};
use super::form::StaffFormPayload;

pub use http::HttpStaffApi;
pub use sandbox::{sandbox_router, SandboxBackend, SandboxError};

/// Backend calls used by the console. Every call is a single
/// request/response; there is no retry.
#[async_trait]
pub trait StaffApi: Send + Sync {
    async fn list_staff(&self) -> Result<Vec<StaffRecord>, ApiError>;
    async fn list_vacancies(&self) -> Result<Vec<VacancyRecord>, ApiError>;
    async fn create_staff(&self, payload: &StaffFormPayload) -> Result<StaffRecord, ApiError>;
    /// An empty `login_password` means "leave the password unchanged".
    async fn update_staff(
        &self,
        id: StaffId,
        payload: &StaffFormPayload,
    ) -> Result<StaffRecord, ApiError>;
}

#[async_trait]
impl<T: StaffApi + ?Sized> StaffApi for Arc<T> {
    async fn list_staff(&self) -> Result<Vec<StaffRecord>, ApiError> {
        (**self).list_staff().await
    }

    async fn list_vacancies(&self) -> Result<Vec<VacancyRecord>, ApiError> {
        (**self).list_vacancies().await
    }

    async fn create_staff(&self, payload: &StaffFormPayload) -> Result<StaffRecord, ApiError> {
        (**self).create_staff(payload).await
    }

    async fn update_staff(
        &self,
        id: StaffId,
        payload: &StaffFormPayload,
    ) -> Result<StaffRecord, ApiError> {
        (**self).update_staff(id, payload).await
    }
}

/// Backend failures. The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the payload.
    #[error("{0}")]
    Validation(String),
    /// Network, authentication, or server failure.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::Transport(message) => message,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
