use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlarmError {
    #[error("target identifier is empty")]
    EmptyIdentifier,

    #[error("malformed topic ARN '{0}': expected arn:<partition>:sns:<region>:<account>:<topic>")]
    MalformedIdentifier(String),

    #[error("invalid alarm state '{0}': expected one of OK, IN_ALARM, INSUFFICIENT_DATA")]
    InvalidState(String),

    #[error("no alarm states selected")]
    NoStatesSelected,

    #[error("invalid action '{0}': expected 'add' or 'remove'")]
    InvalidOperation(String),

    #[error("invalid batch size {0}: must be between 1 and {max}", max = crate::fetch::MAX_BATCH_SIZE)]
    InvalidBatchSize(usize),

    #[error("invalid alarm list: {0}")]
    InvalidAlarmList(String),

    #[error("alarm list is empty")]
    EmptyAlarmList,

    #[error("{} alarm(s) not found: {}", .0.len(), .0.join(", "))]
    AlarmsNotFound(Vec<String>),

    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("failed to update alarm '{alarm}': {reason}")]
    WriteFailed { alarm: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AlarmError>;
