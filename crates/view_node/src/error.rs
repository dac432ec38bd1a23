use crate::node::ViewNodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("view node {0} is not part of this tree")]
    UnknownNode(ViewNodeId),
}
