use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("patient not found: {0}")]
    PatientNotFound(Uuid),
    #[error("join row references unknown {kind} {id}")]
    DanglingReference { kind: &'static str, id: Uuid },
    #[error("{kind} already exists: {id}")]
    DuplicateId { kind: &'static str, id: Uuid },

    #[error("failed to read seed file: {0}")]
    SeedRead(std::io::Error),
    #[error("failed to parse seed file: {0}")]
    SeedParse(serde_json::Error),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl PatientError {
    /// True for the expected "no such record" outcome, as opposed to a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PatientError::PatientNotFound(_))
    }
}

impl From<pas_types::TextError> for PatientError {
    fn from(err: pas_types::TextError) -> Self {
        PatientError::InvalidInput(err.to_string())
    }
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
