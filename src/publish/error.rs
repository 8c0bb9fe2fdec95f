use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("State update request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("State update for {entity_id} rejected with status {status}")]
    HttpStatus {
        entity_id: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },
}
