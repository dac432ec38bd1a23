//! # Bounds Resolver
//!
//! Turns every view's local geometry into an absolute box in preview space.
//!
//! Each view's position is relative to its parent, its scale multiplies the
//! scale accumulated from its ancestors, and scaling happens about the
//! view's own center. The walk carries the accumulated shift and scale down
//! the tree, so one pre-order pass resolves the whole hierarchy:
//!
//! ```text
//! new_scale = scale * local_scale
//! origin    = shift + (position + translation) * scale + size * (scale - new_scale) / 2
//! box       = round(origin * zoom), round(size * new_scale * zoom)
//! ```
//!
//! Children inherit the unzoomed `origin` and `new_scale`. Zoom is applied
//! only when a box is written, so rounding never compounds down the tree.

use glam::{IVec2, Vec2};
use view_node::{DisplayInfo, PreviewBox, ViewNodeId, ViewTree};

/// Unzoomed placement of one view, in root-relative device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub origin: Vec2,
    /// Scale accumulated from the root down to and including this view
    pub scale: Vec2,
    pub size: Vec2,
}

impl Placement {
    /// Places a view given the shift and scale inherited from its parent.
    pub fn new(info: &DisplayInfo, shift: Vec2, scale: Vec2) -> Self {
        let new_scale = scale * Vec2::new(info.scale_x, info.scale_y);
        let position = Vec2::new(info.left + info.translate_x, info.top + info.translate_y);
        let size = Vec2::new(info.width, info.height);

        Self {
            origin: shift + position * scale + size * (scale - new_scale) / 2.0,
            scale: new_scale,
            size: size * new_scale,
        }
    }

    /// Snaps the placement to whole pixels at the given zoom.
    ///
    /// Non-finite values collapse to zero, leaving a box nothing can hit.
    pub fn to_preview_box(&self, zoom: f32) -> PreviewBox {
        let origin = (self.origin * zoom).round();
        let size = (self.size * zoom).round();
        PreviewBox::new(
            origin.x as i32,
            origin.y as i32,
            size.x as i32,
            size.y as i32,
        )
    }
}

/// Inputs that produced the current boxes.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PassKey {
    zoom: f32,
    surface: IVec2,
}

/// Keeps preview boxes in sync with zoom and surface size, without
/// redoing passes when nothing relevant changed.
#[derive(Debug, Default)]
pub struct BoundsResolver {
    last_pass: Option<PassKey>,
    dirty: bool,
    passes: usize,
}

impl BoundsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the next [`ensure_resolved`](Self::ensure_resolved) to run a
    /// pass, e.g. after a new snapshot is installed.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn needs_pass(&self, tree: &ViewTree, zoom: f32, surface: IVec2) -> bool {
        self.dirty || !tree.is_resolved() || self.last_pass != Some(PassKey { zoom, surface })
    }

    /// Runs a pass if the zoom, surface size or tree changed since the
    /// last one. Returns whether a pass ran.
    pub fn ensure_resolved(&mut self, tree: &mut ViewTree, zoom: f32, surface: IVec2) -> bool {
        if !self.needs_pass(tree, zoom, surface) {
            return false;
        }
        Self::resolve(tree, zoom);
        self.last_pass = Some(PassKey { zoom, surface });
        self.dirty = false;
        self.passes += 1;
        true
    }

    /// Writes the preview box of every view in `tree` for the given zoom.
    ///
    /// The root is placed at the origin with its own transform dropped, so
    /// its box always starts at `(0, 0)`.
    pub fn resolve(tree: &mut ViewTree, zoom: f32) {
        debug_assert!(zoom > 0.0, "zoom must be positive");

        let root = tree.root();
        let mut boxes = Vec::with_capacity(tree.len());
        let mut stack: Vec<(ViewNodeId, Vec2, Vec2)> = vec![(root, Vec2::ZERO, Vec2::ONE)];

        while let Some((node_id, shift, scale)) = stack.pop() {
            let Some(node) = tree.node(node_id) else {
                continue;
            };
            let info = if node_id == root {
                node.display_info.at_origin()
            } else {
                node.display_info
            };

            let placement = Placement::new(&info, shift, scale);
            boxes.push((node_id, placement.to_preview_box(zoom)));

            stack.extend(
                node.children()
                    .iter()
                    .rev()
                    .map(|&child| (child, placement.origin, placement.scale)),
            );
        }

        let count = boxes.len();
        tree.store_resolved_boxes(boxes);
        log::debug!("resolved {} view boxes at zoom {:.3}", count, zoom);
    }
}
