use ecohub_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using EcoHubError
pub type Result<T> = std::result::Result<T, EcoHubError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code usable by callers, tests and any
/// network-facing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    InvalidInput,
    NotFound,
    UnknownEntity,
    /// A compare-and-swap update saw a different record version
    Conflict,
    Serialization,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::UnknownEntity => "ERR_UNKNOWN_ENTITY",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional context for debugging and for
/// rendering at the outer edge.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    record_id: Option<u64>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    candidates: Option<Vec<String>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            record_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            candidates: None,
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Name of the entity type (collection) involved
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_record_id(mut self, id: u64) -> Self {
        self.record_id = Some(id);
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Valid alternatives the caller could have used (e.g. entity names)
    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn record_id(&self) -> Option<u64> {
        self.record_id
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(id) = self.record_id {
            write!(f, " (record_id: {})", id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for record store operations
///
/// Missing records are a soft result (`None` / `false`) on the record store
/// itself; `RecordNotFound` only appears at the command boundary, where a
/// batch must abort.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcoHubError {
    /// Entity type name not recognised
    #[error("Unknown entity type: {name}")]
    UnknownEntity { name: String },

    /// Command targeted a record that does not exist
    #[error("{entity} record not found: {id}")]
    RecordNotFound { entity: String, id: String },

    /// Compare-and-swap update saw a newer version
    #[error("{entity} record {id} version conflict: expected {expected}, found {actual}")]
    VersionConflict {
        entity: String,
        id: u64,
        expected: u64,
        actual: u64,
    },

    /// Field payload is not a mapping
    #[error("Invalid fields: {reason}")]
    InvalidFields { reason: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<EcoHubError> for ExError {
    fn from(err: EcoHubError) -> Self {
        match err {
            EcoHubError::UnknownEntity { name } => ExError::new(ExErrorKind::UnknownEntity)
                .with_message(format!("Unknown entity type '{}'", name))
                .with_candidates(
                    crate::model::EntityKind::ALL
                        .iter()
                        .map(|kind| kind.name().to_string())
                        .collect(),
                ),

            EcoHubError::RecordNotFound { entity, id } => ExError::new(ExErrorKind::NotFound)
                .with_entity(entity)
                .with_message(format!("Record {} not found", id)),

            EcoHubError::VersionConflict {
                entity,
                id,
                expected,
                actual,
            } => ExError::new(ExErrorKind::Conflict)
                .with_entity(entity)
                .with_record_id(id)
                .with_message(format!(
                    "Expected version {}, found {}",
                    expected, actual
                )),

            EcoHubError::InvalidFields { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            EcoHubError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for EcoHubError {
    fn from(err: serde_json::Error) -> Self {
        EcoHubError::Serialization {
            message: err.to_string(),
        }
    }
}
