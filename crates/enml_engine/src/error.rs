use std::io;

use thiserror::Error;

use crate::resource::ResourceError;
use crate::FetchError;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("parse failure: {0}")]
    ParseFailure(String),
    #[error("body element not found")]
    MissingBody,
    #[error("illegal element ({0})")]
    IllegalElement(String),
    #[error("resource {url} not found: {cause}")]
    ResourceFetchFailure { url: String, cause: FetchError },
    #[error("mime type of resource {url} could not be identified")]
    ResourceMimeUnknown { url: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<ResourceError> for ConvertError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::Fetch { url, source } => ConvertError::ResourceFetchFailure { url, cause: source },
            ResourceError::MimeUnknown { url } => ConvertError::ResourceMimeUnknown { url },
        }
    }
}
