use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartyPlannerError {
    #[error("Forum returned {status} for {url}")]
    UpstreamStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl PartyPlannerError {
    /// True when the forum answered a page fetch with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UpstreamStatus { status, .. } if *status == reqwest::StatusCode::NOT_FOUND
        )
    }
}

/// Looks through any added context for an upstream 404.
pub fn is_upstream_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PartyPlannerError>()
        .is_some_and(PartyPlannerError::is_not_found)
}
