#[derive(Debug)]
pub enum OllamaError {
    /// The request never produced a usable response: connection refused,
    /// timeout, or a failure while reading the body.
    Request(String),
    /// The server answered with a non-success status code.
    Status { status: u16, body: String },
    /// The response body (or one NDJSON line of it) was not valid JSON for
    /// the expected type.
    Decode(String),
}

impl std::fmt::Display for OllamaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OllamaError::Request(s) => write!(f, "Request Error: {s}"),
            OllamaError::Status { status, body } => {
                write!(f, "API Error: server returned {status}: {body}")
            }
            OllamaError::Decode(s) => write!(f, "Decode Error: {s}"),
        }
    }
}

impl std::error::Error for OllamaError {}
