use glam::{IVec2, Vec2};
use view_node::{DrawShift, PreviewPoint, ScreenPoint};

/// Zoom and placement of the preview inside the display surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Zoom level (1.0 = one device pixel per surface pixel)
    zoom: f32,
    /// Offset that centers the zoomed preview in the surface
    shift: DrawShift,
    /// Surface size seen by the last layout; zero until the first one
    surface: IVec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            shift: DrawShift::ZERO,
            surface: IVec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn shift(&self) -> DrawShift {
        self.shift
    }

    pub fn surface(&self) -> IVec2 {
        self.surface
    }

    /// Whether a layout with a real surface size has happened yet.
    pub fn has_layout(&self) -> bool {
        self.surface != IVec2::ZERO
    }

    /// Sets the zoom without validation; callers check it first.
    pub(crate) fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    pub(crate) fn set_surface(&mut self, surface: IVec2) {
        self.surface = surface;
    }

    /// The largest zoom that shows the whole root inside the surface,
    /// leaving `padding` pixels of margin.
    ///
    /// `None` when the surface or root is too small to produce a usable
    /// positive zoom.
    pub fn fit_zoom(surface: IVec2, root_size: Vec2, padding: f32) -> Option<f32> {
        let available = surface.as_vec2() - Vec2::splat(padding);
        let zoom = (available / root_size).min_element();
        (zoom.is_finite() && zoom > 0.0).then_some(zoom)
    }

    /// Zooms to fit the current surface, keeping the old zoom if fitting
    /// is impossible.
    pub(crate) fn fit(&mut self, root_size: Vec2, padding: f32) {
        if let Some(zoom) = Self::fit_zoom(self.surface, root_size, padding) {
            log::debug!("fit zoom {:.3} for surface {}", zoom, self.surface);
            self.zoom = zoom;
        }
    }

    /// Recomputes the draw shift so the zoomed root sits in the middle of
    /// the surface.
    pub(crate) fn center(&mut self, root_size: Vec2) {
        let slack = self.surface.as_vec2() - root_size * self.zoom;
        // Truncate the slack first, then halve with integer division.
        self.shift = DrawShift::new(slack.x as i32 / 2, slack.y as i32 / 2);
    }

    /// Size the surface should ask for so the zoomed root fits without
    /// margins. Hosts use it to size their scroll area after a zoom change.
    pub fn preferred_size(&self, root_size: Vec2) -> IVec2 {
        let size = root_size * self.zoom;
        IVec2::new(size.x as i32, size.y as i32)
    }

    /// Convert a point from screen coordinates to preview coordinates.
    pub fn screen_to_preview(&self, point: ScreenPoint) -> PreviewPoint {
        point.to_preview(self.shift)
    }

    /// Convert a point from preview coordinates to screen coordinates.
    pub fn preview_to_screen(&self, point: PreviewPoint) -> ScreenPoint {
        point.to_screen(self.shift)
    }
}
