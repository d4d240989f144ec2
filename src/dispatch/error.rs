use thiserror::Error;

/// Failures reported by a [`Platform`](super::Platform) capability
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Package not installed: {0}")]
    NotInstalled(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Why a missed-call action was not delivered
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Messaging app unavailable: {0}")]
    TargetAppUnavailable(String),

    #[error("Number not valid for WhatsApp: {0:?}")]
    InvalidNumber(String),

    #[error("Message must not be empty")]
    EmptyMessage,

    #[error("Unexpected dispatch failure: {0}")]
    Unexpected(String),
}

impl From<PlatformError> for DispatchError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::PermissionDenied(what) => DispatchError::PermissionDenied(what),
            PlatformError::NotInstalled(package) => DispatchError::TargetAppUnavailable(package),
            other => DispatchError::Unexpected(other.to_string()),
        }
    }
}
