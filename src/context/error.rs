use thiserror::Error;

/// Failure talking to the Backend or Database service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid service endpoint {uri}: {source}")]
    InvalidEndpoint {
        uri: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("gRPC Error: {}", status_summary(.0))]
    Status(#[source] Box<tonic::Status>),

    #[error("connection failed: {0}")]
    Transport(#[from] tonic::transport::Error),
}

impl From<tonic::Status> for ClientError {
    fn from(status: tonic::Status) -> Self {
        ClientError::Status(Box::new(status))
    }
}

impl ClientError {
    /// Text shown to the user. A status from the service already names itself
    /// as a gRPC error; any other failure is prefixed with `context`.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            ClientError::Status(_) => self.to_string(),
            _ => format!("{context}: {self}"),
        }
    }
}

fn status_summary(status: &tonic::Status) -> String {
    format!("{:?} - {}", status.code(), status.message())
}
