use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend answered 401. The session token has already been cleared.
    #[error("session expired; redirect to {login_route}")]
    Unauthorized { login_route: String },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
}

impl ClientError {
    /// Message suitable for showing next to a form or list.
    ///
    /// Transport and backend failures collapse into one generic sentence;
    /// only input problems are spelled out.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClientError::MissingFields { fields } => {
                format!("Please fill in: {}.", fields.join(", "))
            }
            ClientError::NotFound { .. } => "We couldn't find what you were looking for.".into(),
            ClientError::Unauthorized { .. } => "Please sign in to continue.".into(),
            _ => "Something went wrong. Please try again.".into(),
        }
    }
}
