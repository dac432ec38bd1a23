//! Interactive preview of a captured view hierarchy.
//!
//! [`ActiveDisplay`] shows a screen capture with the boxes of its views on
//! top. It resolves every view's absolute box from the local geometry in the
//! [`view_node::ViewTree`], finds the views under the pointer, lets the user
//! cycle through overlapping candidates, and reports hover, selection and
//! double-click changes to subscribers.
//!
//! Rendering is left to the host: [`ActiveDisplay::paint_plan`] describes
//! what to draw and where.

mod config;
mod display;
mod error;
mod events;
mod interaction;
mod paint;
pub mod picker;
pub mod resolver;
mod viewport;

pub use config::{DisplayConfig, NoDrawPolicy};
pub use display::{ActiveDisplay, Overlay};
pub use error::{DisplayError, Result};
pub use events::{DisplayEvent, SubscriptionId, Subscribers};
pub use interaction::{CycleDirection, InteractionPhase, InteractionState};
pub use paint::{BoxStyle, DrawCommand, ImageFilter, PaintPlan};
pub use picker::pick_at;
pub use resolver::{BoundsResolver, Placement};
pub use viewport::Viewport;
