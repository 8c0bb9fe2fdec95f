use crate::fetch::error::FetchError;
use crate::publish::error::PublishError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CgespError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
