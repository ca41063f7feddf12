use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EasyEnergyError {
    /// Connection failures and non-2xx responses.
    #[error("http request error")]
    Transport(#[source] reqwest::Error),
    #[error("http request timed out")]
    Timeout(#[source] reqwest::Error),
    #[error("api responded with unexpected content type {content_type:?}")]
    UnexpectedContentType { content_type: String, body: String },
    #[error("api responded with malformed json")]
    Json(#[from] serde_json::Error),
    #[error("api responded with an unsupported response: {0}")]
    UnsupportedResponse(String),
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("price series is empty")]
    EmptySeries,
    #[error("no price found for {0}")]
    NotFound(DateTime<Utc>),
}

impl EasyEnergyError {
    /// Whether the error happened while talking to the API.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Whether the API answered with something that could not be mapped to prices.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::Json(_) | Self::UnsupportedResponse(_) | Self::UnexpectedContentType { .. }
        )
    }
}

impl From<reqwest::Error> for EasyEnergyError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error)
        } else {
            Self::Transport(error)
        }
    }
}

pub type Result<T, E = EasyEnergyError> = std::result::Result<T, E>;
