use thiserror::Error;

pub use crate::routes::RouteError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),
}
