use thiserror::Error;
use view_node::{TreeError, ViewNodeId};

pub type Result<T> = std::result::Result<T, DisplayError>;

#[derive(Debug, Error, PartialEq)]
pub enum DisplayError {
    #[error("zoom factor must be finite and positive, got {0}")]
    InvalidZoom(f32),

    #[error("view node {0} is not part of the loaded snapshot")]
    UnknownNode(ViewNodeId),

    #[error(transparent)]
    Tree(#[from] TreeError),
}
