//! Captured view hierarchy model for the layout inspector.
//!
//! A snapshot of a rendered screen arrives as a tree of views, each with its
//! own local geometry ([`DisplayInfo`]). This crate stores that tree in an
//! arena ([`ViewTree`]), tracks which views actually end up on screen, and
//! provides the integer preview-space types the resolver and picker work in.

pub mod bounds;
pub mod coords;
mod display_info;
mod error;
mod node;
mod snapshot;
mod tree;

pub use bounds::{ClipRect, PreviewBox};
pub use coords::{DrawShift, PreviewPoint, ScreenPoint};
pub use display_info::DisplayInfo;
pub use error::{Result, TreeError};
pub use node::{ForcedState, ViewNode, ViewNodeId, EMPTY_ID};
pub use snapshot::ViewNodeSnapshot;
pub use tree::{NodePath, Preorder, ViewTree};
