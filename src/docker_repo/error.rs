// Typed failures of the runtime client

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error("cannot reach docker: {0}")]
    Connection(String),
    #[error("no such object: {0}")]
    NotFound(String),
    #[error("docker api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("stream error: {0}")]
    Stream(String),
}

impl From<bollard::errors::Error> for RuntimeError {
    fn from(e: bollard::errors::Error) -> Self {
        use bollard::errors::Error;
        match &e {
            Error::DockerResponseServerError {
                status_code: 404,
                message,
            } => RuntimeError::NotFound(message.clone()),
            Error::DockerResponseServerError {
                status_code,
                message,
            } => RuntimeError::Api {
                status: *status_code,
                message: message.clone(),
            },
            Error::RequestTimeoutError => RuntimeError::Timeout(Duration::ZERO),
            Error::IOError { .. } | Error::HyperResponseError { .. } => {
                RuntimeError::Connection(e.to_string())
            }
            _ => RuntimeError::Stream(e.to_string()),
        }
    }
}
