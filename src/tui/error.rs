use crate::database::DatabaseError;
use crate::engine::OrderingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("IO/Terminal error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Reorder error: {0}")]
    OrderingError(#[from] OrderingError),

    #[error("Render error: {0}")]
    RenderError(String),
}
