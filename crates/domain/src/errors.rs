use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Worker pool backlog is full ({capacity} pending tasks)")]
    WorkerPoolFull { capacity: usize },

    #[error("Worker pool is shut down")]
    WorkerPoolClosed,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Expected outcome of a dynamic update for a token/IP combination that
    /// matches nothing; callers skip it instead of surfacing it.
    pub fn is_update_mismatch(&self) -> bool {
        matches!(
            self,
            DomainError::NotFound(_) | DomainError::ValidationFailed(_)
        )
    }
}
