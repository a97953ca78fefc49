use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid athlete id: {0:?}")]
    InvalidAthleteId(String),
    #[error("invalid metric id: {0:?}")]
    InvalidMetricId(String),
    #[error("invalid organization id: {0:?}")]
    InvalidOrganizationId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
