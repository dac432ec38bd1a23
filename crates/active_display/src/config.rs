use serde::{Deserialize, Serialize};

/// How views flagged `will_not_draw` take part in picking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDrawPolicy {
    /// Never a candidate, but transparent: descendants stay reachable.
    #[default]
    PassThrough,
    /// Like `PassThrough`, except that a no-draw view under the point is
    /// offered as a candidate when no visible view inside it matches.
    /// Only the outermost such view on a path is considered.
    Fallback,
}

/// Tunables for the active display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Margin, in surface pixels, left around the preview when fitting it
    pub fit_padding: f32,
    /// Zoom at and above which the pixel grid can be shown
    pub grid_zoom_threshold: f32,
    /// Distance between grid lines, in preview image pixels
    pub grid_line_span: u32,
    /// Alpha an overlay starts with whenever one is loaded
    pub default_overlay_alpha: f32,
    pub no_draw_policy: NoDrawPolicy,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fit_padding: 20.0,
            grid_zoom_threshold: 3.0,
            grid_line_span: 10,
            default_overlay_alpha: 0.5,
            no_draw_policy: NoDrawPolicy::PassThrough,
        }
    }
}
