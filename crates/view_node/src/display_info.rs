use serde::{Deserialize, Serialize};

/// Local geometry and draw flags of a captured view.
///
/// Positions are relative to the parent's local frame. Scale is applied
/// about the view's own center; translation is applied on top of the
/// layout position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayInfo {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Whether descendants are clipped to this view's box
    pub clip_children: bool,
    /// Present for layout and hit testing but never rendered
    pub will_not_draw: bool,
    pub visible: bool,
}

impl Default for DisplayInfo {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            clip_children: false,
            will_not_draw: false,
            visible: true,
        }
    }
}

impl DisplayInfo {
    /// A plain box at `(left, top)` with no transform and default flags.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_translation(mut self, x: f32, y: f32) -> Self {
        self.translate_x = x;
        self.translate_y = y;
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self
    }

    pub fn clipping(mut self, clip_children: bool) -> Self {
        self.clip_children = clip_children;
        self
    }

    pub fn no_draw(mut self, will_not_draw: bool) -> Self {
        self.will_not_draw = will_not_draw;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// The same view moved to the origin with its transform removed.
    ///
    /// Used for the root, whose resolved box must start at `(0, 0)`.
    pub fn at_origin(&self) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let info: DisplayInfo =
            serde_json::from_str(r#"{ "left": 4.0, "width": 10.0, "height": 8.0 }"#).unwrap();

        assert_eq!(info.left, 4.0);
        assert_eq!(info.top, 0.0);
        assert_eq!(info.scale_x, 1.0);
        assert_eq!(info.scale_y, 1.0);
        assert!(info.visible);
        assert!(!info.clip_children);
        assert!(!info.will_not_draw);
    }

    #[test]
    fn test_at_origin_keeps_size_and_flags() {
        let info = DisplayInfo::new(12.0, 30.0, 100.0, 40.0)
            .with_translation(3.0, 4.0)
            .with_scale(0.5, 2.0)
            .clipping(true);

        let moved = info.at_origin();
        assert_eq!((moved.left, moved.top), (0.0, 0.0));
        assert_eq!((moved.translate_x, moved.translate_y), (0.0, 0.0));
        assert_eq!((moved.scale_x, moved.scale_y), (1.0, 1.0));
        assert_eq!((moved.width, moved.height), (100.0, 40.0));
        assert!(moved.clip_children);
    }
}
