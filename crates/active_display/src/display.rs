use crate::config::DisplayConfig;
use crate::error::{DisplayError, Result};
use crate::events::{DisplayEvent, SubscriptionId, Subscribers};
use crate::interaction::{CycleDirection, InteractionPhase, InteractionState};
use crate::paint::{plan_frame, FrameParams, PaintPlan};
use crate::picker::pick_at;
use crate::resolver::BoundsResolver;
use crate::viewport::Viewport;
use glam::{IVec2, Vec2};
use image::RgbaImage;
use view_node::{
    DrawShift, ForcedState, PreviewBox, PreviewPoint, ScreenPoint, ViewNodeId, ViewTree,
};

/// An image blended over the preview to compare it against a design mock.
#[derive(Clone, Debug)]
pub struct Overlay {
    pub image: RgbaImage,
    /// Where the image came from, for display in the host UI
    pub name: Option<String>,
    pub alpha: f32,
}

/// A captured screen with pickable view boxes.
///
/// Owns the view tree and its preview image, keeps the view boxes in sync
/// with the surface size and zoom, and turns pointer input into hover,
/// selection and double-click events.
///
/// All methods taking a [`ScreenPoint`] expect pointer coordinates relative
/// to the display surface; the draw shift is removed internally.
#[derive(Debug)]
pub struct ActiveDisplay {
    tree: ViewTree,
    preview: Option<RgbaImage>,
    overlay: Option<Overlay>,
    grid_visible: bool,
    viewport: Viewport,
    interaction: InteractionState,
    resolver: BoundsResolver,
    config: DisplayConfig,
    subscribers: Subscribers,
}

impl ActiveDisplay {
    pub fn new(tree: ViewTree, preview: Option<RgbaImage>) -> Self {
        Self::with_config(tree, preview, DisplayConfig::default())
    }

    pub fn with_config(tree: ViewTree, preview: Option<RgbaImage>, config: DisplayConfig) -> Self {
        let mut display = Self {
            tree,
            preview,
            overlay: None,
            grid_visible: false,
            viewport: Viewport::new(),
            interaction: InteractionState::new(),
            resolver: BoundsResolver::new(),
            config,
            subscribers: Subscribers::new(),
        };
        display.resolve();
        display
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn preview(&self) -> Option<&RgbaImage> {
        self.preview.as_ref()
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn zoom(&self) -> f32 {
        self.viewport.zoom()
    }

    pub fn draw_shift(&self) -> DrawShift {
        self.viewport.shift()
    }

    pub fn hovered(&self) -> Option<ViewNodeId> {
        self.interaction.hovered()
    }

    pub fn selected(&self) -> Option<ViewNodeId> {
        self.interaction.selected()
    }

    pub fn candidate_index(&self) -> usize {
        self.interaction.candidate_index()
    }

    pub fn phase(&self) -> InteractionPhase {
        self.interaction.phase()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DisplayEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // === Geometry ===

    /// Unzoomed size of the root view.
    fn root_size(&self) -> Vec2 {
        self.tree
            .node(self.tree.root())
            .map(|root| Vec2::new(root.display_info.width, root.display_info.height))
            .unwrap_or(Vec2::ZERO)
    }

    fn resolve(&mut self) {
        self.resolver
            .ensure_resolved(&mut self.tree, self.viewport.zoom(), self.viewport.surface());
    }

    /// Adapts to the current surface size. Call whenever the host surface
    /// is laid out; does nothing unless the size changed or the boxes are
    /// stale.
    ///
    /// The first layout zooms the preview to fit.
    pub fn layout(&mut self, width: i32, height: i32) {
        let surface = IVec2::new(width, height);
        if !self.resolver.needs_pass(&self.tree, self.viewport.zoom(), surface) {
            return;
        }

        let root_size = self.root_size();
        let first_layout = !self.viewport.has_layout();
        self.viewport.set_surface(surface);
        if first_layout {
            self.viewport.fit(root_size, self.config.fit_padding);
        }
        self.viewport.center(root_size);
        self.resolve();
    }

    /// Changes the zoom and re-resolves every box.
    pub fn set_zoom(&mut self, zoom: f32) -> Result<()> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(DisplayError::InvalidZoom(zoom));
        }
        log::debug!("zoom {:.3} -> {:.3}", self.viewport.zoom(), zoom);
        self.viewport.set_zoom(zoom);
        self.viewport.center(self.root_size());
        self.resolve();
        Ok(())
    }

    /// Surface size that shows the zoomed preview without margins.
    pub fn preferred_size(&self) -> IVec2 {
        self.viewport.preferred_size(self.root_size())
    }

    /// Replaces the displayed capture.
    ///
    /// Hover, selection and cycling are cleared and the zoom is refit to
    /// the surface.
    pub fn load_snapshot(&mut self, tree: ViewTree, preview: Option<RgbaImage>) {
        self.tree = tree;
        self.preview = preview;
        self.interaction.reset();
        self.resolver.invalidate();

        let root_size = self.root_size();
        if self.viewport.has_layout() {
            self.viewport.fit(root_size, self.config.fit_padding);
            self.viewport.center(root_size);
        }
        self.resolve();
        log::debug!("loaded snapshot with {} views", self.tree.len());
    }

    /// The resolved box of a view, in preview space.
    pub fn node_box(&self, node_id: ViewNodeId) -> Option<PreviewBox> {
        self.tree.preview_box(node_id)
    }

    /// The resolved box of a view, in screen space.
    pub fn screen_box(&self, node_id: ViewNodeId) -> Option<PreviewBox> {
        self.node_box(node_id)
            .map(|bounds| bounds.translate(self.viewport.shift().0))
    }

    pub fn set_forced_state(&mut self, node_id: ViewNodeId, state: ForcedState) -> Result<()> {
        self.tree.set_forced_state(node_id, state)?;
        Ok(())
    }

    // === Picking ===

    fn to_preview(&self, point: ScreenPoint) -> PreviewPoint {
        self.viewport.screen_to_preview(point)
    }

    /// Every view under a screen point, smallest first.
    pub fn candidates_at(&self, point: ScreenPoint) -> Vec<ViewNodeId> {
        pick_at(&self.tree, self.to_preview(point), self.config.no_draw_policy)
    }

    /// The candidate the current cycle position points at.
    fn node_at(&mut self, point: ScreenPoint) -> Option<ViewNodeId> {
        let candidates = self.candidates_at(point);
        self.interaction.choose(&candidates)
    }

    fn update_hover(&mut self, node: Option<ViewNodeId>) {
        if self.interaction.set_hovered(node) {
            self.subscribers.emit(DisplayEvent::HoverChanged(node));
        }
    }

    fn update_selection(&mut self, node: ViewNodeId) {
        if self.interaction.set_selected(node) {
            log::debug!("selected view {}", node);
            self.subscribers.emit(DisplayEvent::SelectionChanged(node));
        }
    }

    /// Hovers a view directly, e.g. when the host tree panel is hovered.
    pub fn set_hovered(&mut self, node: Option<ViewNodeId>) -> Result<()> {
        if let Some(node_id) = node.filter(|&id| !self.tree.contains(id)) {
            return Err(DisplayError::UnknownNode(node_id));
        }
        self.update_hover(node);
        Ok(())
    }

    /// Selects a view directly, e.g. from the host tree panel.
    pub fn set_selected(&mut self, node: ViewNodeId) -> Result<()> {
        if !self.tree.contains(node) {
            return Err(DisplayError::UnknownNode(node));
        }
        self.update_selection(node);
        Ok(())
    }

    // === Pointer input ===

    pub fn pointer_entered(&mut self, point: ScreenPoint) {
        self.interaction.reset_cycle();
        let node = self.node_at(point);
        self.update_hover(node);
    }

    /// Staying inside the hovered view keeps the cycle position; leaving it
    /// starts over from the smallest candidate.
    pub fn pointer_moved(&mut self, point: ScreenPoint) {
        let preview_point = self.to_preview(point);
        let still_inside = self
            .interaction
            .hovered()
            .and_then(|hovered| self.tree.preview_box(hovered))
            .is_some_and(|bounds| bounds.contains(preview_point));
        if !still_inside {
            self.interaction.reset_cycle();
        }
        let node = self.node_at(point);
        self.update_hover(node);
    }

    /// Clears the hover. The selection is left alone.
    pub fn pointer_exited(&mut self) {
        self.update_hover(None);
    }

    /// Selects the hovered candidate. Clicking where nothing can be picked
    /// keeps the current selection.
    pub fn clicked(&mut self, point: ScreenPoint) -> Option<ViewNodeId> {
        let node = self.node_at(point)?;
        self.update_selection(node);
        Some(node)
    }

    pub fn double_clicked(&mut self, point: ScreenPoint) -> Option<ViewNodeId> {
        let node = self.node_at(point)?;
        self.subscribers.emit(DisplayEvent::NodeDoubleClicked(node));
        Some(node)
    }

    /// Steps through the candidates under a fixed point. Only has an
    /// effect while something is hovered.
    pub fn cycle(&mut self, point: ScreenPoint, direction: CycleDirection) {
        if self.interaction.hovered().is_none() {
            return;
        }
        let candidates = self.candidates_at(point);
        self.interaction.cycle(direction, candidates.len());
        let node = self.interaction.choose(&candidates);
        self.update_hover(node);
    }

    /// Wheel input: positive rotation cycles inward, otherwise outward.
    pub fn wheel(&mut self, point: ScreenPoint, rotation: i32) {
        self.cycle(point, CycleDirection::from_wheel(rotation));
    }

    // === Grid and overlay ===

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    pub fn is_grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Whether grid lines are drawn right now: the grid must be enabled,
    /// a preview loaded and the zoom high enough for pixels to stand out.
    pub fn is_grid_shown(&self) -> bool {
        self.grid_visible
            && self.preview.is_some()
            && self.viewport.zoom() >= self.config.grid_zoom_threshold
    }

    /// Loads an overlay, resetting its alpha to the configured default.
    pub fn set_overlay(&mut self, image: RgbaImage, name: Option<String>) {
        self.overlay = Some(Overlay {
            image,
            name,
            alpha: self.config.default_overlay_alpha,
        });
    }

    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Clamped to `[0, 1]`; ignored when no overlay is loaded.
    pub fn set_overlay_alpha(&mut self, alpha: f32) {
        if let Some(overlay) = &mut self.overlay {
            overlay.alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        }
    }

    // === Painting ===

    /// Draw commands for the current state.
    pub fn paint_plan(&self) -> PaintPlan {
        let preview_size = self
            .preview
            .as_ref()
            .map(|image| IVec2::new(image.width() as i32, image.height() as i32));

        plan_frame(
            &self.tree,
            FrameParams {
                shift: self.viewport.shift(),
                zoom: self.viewport.zoom(),
                preview_size,
                grid_span: self
                    .is_grid_shown()
                    .then_some(self.config.grid_line_span),
                overlay_alpha: self.overlay.as_ref().map(|overlay| overlay.alpha),
                hovered: self.interaction.hovered(),
                selected: self.interaction.selected(),
            },
        )
    }
}
