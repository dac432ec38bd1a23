//! Geometric contract for drawing the display.
//!
//! The display does not rasterize anything itself. Instead it produces a
//! [`PaintPlan`]: the ordered list of draw commands a host renderer must
//! execute so that what the user sees lines up with what the picker hits.

use glam::IVec2;
use view_node::{DrawShift, PreviewBox, ViewNodeId, ViewTree};

/// Filtering to use when scaling the preview image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFilter {
    /// Crisp pixels when zoomed in or at 1:1
    Nearest,
    /// Smooth downscaling when zoomed out
    Bilinear,
}

impl ImageFilter {
    pub fn for_zoom(zoom: f32) -> Self {
        if zoom < 1.0 {
            Self::Bilinear
        } else {
            Self::Nearest
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxStyle {
    Default,
    Hover,
    Selected,
}

impl BoxStyle {
    /// Outline width in surface pixels.
    pub fn stroke_width(self) -> u32 {
        match self {
            Self::Default => 1,
            Self::Hover | Self::Selected => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Move the origin to the preview's top-left corner; all later
    /// commands are in preview space.
    Translate(DrawShift),
    /// Draw the whole preview image scaled into `dest`.
    Preview { dest: PreviewBox, filter: ImageFilter },
    GridLine { from: IVec2, to: IVec2 },
    /// Draw the whole overlay image scaled into `dest`, blended with `alpha`.
    Overlay { dest: PreviewBox, alpha: f32 },
    /// Clip everything after this to `bounds`.
    ClipTo(PreviewBox),
    /// Outline a view's box.
    Outline {
        node: ViewNodeId,
        bounds: PreviewBox,
        style: BoxStyle,
    },
}

/// Ordered draw commands for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaintPlan {
    pub commands: Vec<DrawCommand>,
}

impl PaintPlan {
    /// Outlines in the order they are drawn.
    pub fn outlines(&self) -> impl Iterator<Item = (ViewNodeId, BoxStyle)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Outline { node, style, .. } => Some((*node, *style)),
            _ => None,
        })
    }

    pub fn grid_lines(&self) -> impl Iterator<Item = (IVec2, IVec2)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::GridLine { from, to } => Some((*from, *to)),
            _ => None,
        })
    }
}

/// Everything a frame depends on besides the tree.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrameParams {
    pub shift: DrawShift,
    pub zoom: f32,
    /// Pixel size of the preview image, if one is loaded
    pub preview_size: Option<IVec2>,
    /// Grid line span in image pixels, when the grid should be drawn
    pub grid_span: Option<u32>,
    pub overlay_alpha: Option<f32>,
    pub hovered: Option<ViewNodeId>,
    pub selected: Option<ViewNodeId>,
}

pub(crate) fn plan_frame(tree: &ViewTree, params: FrameParams) -> PaintPlan {
    let root = tree.root();
    let root_box = tree.resolved_box(root);
    let mut commands = vec![DrawCommand::Translate(params.shift)];

    if let Some(image_size) = params.preview_size {
        commands.push(DrawCommand::Preview {
            dest: root_box,
            filter: ImageFilter::for_zoom(params.zoom),
        });
        if let Some(span) = params.grid_span {
            push_grid(&mut commands, root_box, image_size, span);
        }
        if let Some(alpha) = params.overlay_alpha {
            commands.push(DrawCommand::Overlay {
                dest: root_box,
                alpha,
            });
        }
    }

    commands.push(DrawCommand::ClipTo(root_box));

    // Default outlines in paint order. Hidden subtrees are skipped, and the
    // hovered and selected views are held back so they end up on top.
    let mut stack = vec![root];
    while let Some(node_id) = stack.pop() {
        if Some(node_id) != params.hovered && Some(node_id) != params.selected {
            commands.push(DrawCommand::Outline {
                node: node_id,
                bounds: tree.resolved_box(node_id),
                style: BoxStyle::Default,
            });
        }
        stack.extend(
            tree.children(node_id)
                .iter()
                .rev()
                .copied()
                .filter(|&child| tree.node(child).is_some_and(|node| node.is_drawn())),
        );
    }

    if let Some(hovered) = params.hovered.filter(|&hovered| Some(hovered) != params.selected) {
        commands.push(DrawCommand::Outline {
            node: hovered,
            bounds: tree.resolved_box(hovered),
            style: BoxStyle::Hover,
        });
    }
    if let Some(selected) = params.selected {
        commands.push(DrawCommand::Outline {
            node: selected,
            bounds: tree.resolved_box(selected),
            style: BoxStyle::Selected,
        });
    }

    PaintPlan { commands }
}

/// One line every `span` image pixels, mapped onto the root box.
fn push_grid(commands: &mut Vec<DrawCommand>, root_box: PreviewBox, image_size: IVec2, span: u32) {
    let Ok(span) = i32::try_from(span) else {
        return;
    };
    if span <= 0 || image_size.x <= 0 || image_size.y <= 0 {
        return;
    }
    let zoom_x = f64::from(root_box.width) / f64::from(image_size.x);
    let zoom_y = f64::from(root_box.height) / f64::from(image_size.y);

    for dx in (span..image_size.x).step_by(span as usize) {
        let x = (f64::from(dx) * zoom_x) as i32;
        commands.push(DrawCommand::GridLine {
            from: IVec2::new(x, 0),
            to: IVec2::new(x, root_box.height),
        });
    }
    for dy in (span..image_size.y).step_by(span as usize) {
        let y = (f64::from(dy) * zoom_y) as i32;
        commands.push(DrawCommand::GridLine {
            from: IVec2::new(0, y),
            to: IVec2::new(root_box.width, y),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::BoundsResolver;
    use view_node::{DisplayInfo, ViewNode};

    fn view(info: DisplayInfo) -> ViewNode {
        ViewNode::new("android.view.View", "0", info)
    }

    fn params() -> FrameParams {
        FrameParams {
            shift: DrawShift::new(5, 7),
            zoom: 1.0,
            preview_size: None,
            grid_span: None,
            overlay_alpha: None,
            hovered: None,
            selected: None,
        }
    }

    #[test]
    fn test_filter_follows_zoom() {
        assert_eq!(ImageFilter::for_zoom(0.5), ImageFilter::Bilinear);
        assert_eq!(ImageFilter::for_zoom(1.0), ImageFilter::Nearest);
        assert_eq!(ImageFilter::for_zoom(4.0), ImageFilter::Nearest);
    }

    #[test]
    fn test_outline_order_puts_hover_and_selection_last() {
        let mut tree = ViewTree::new(view(DisplayInfo::new(0.0, 0.0, 100.0, 100.0)));
        let root = tree.root();
        let a = tree.add_child(root, view(DisplayInfo::new(0.0, 0.0, 50.0, 50.0))).unwrap();
        let b = tree.add_child(root, view(DisplayInfo::new(50.0, 0.0, 50.0, 50.0))).unwrap();
        let hidden = tree
            .add_child(root, view(DisplayInfo::new(0.0, 50.0, 50.0, 50.0).visible(false)))
            .unwrap();
        BoundsResolver::resolve(&mut tree, 1.0);

        let plan = plan_frame(
            &tree,
            FrameParams {
                hovered: Some(a),
                selected: Some(root),
                ..params()
            },
        );

        let outlines: Vec<_> = plan.outlines().collect();
        assert_eq!(
            outlines,
            vec![
                (b, BoxStyle::Default),
                (a, BoxStyle::Hover),
                (root, BoxStyle::Selected),
            ]
        );
        assert!(!outlines.iter().any(|(node, _)| *node == hidden));
        assert_eq!(plan.commands[0], DrawCommand::Translate(DrawShift::new(5, 7)));
    }

    #[test]
    fn test_hovering_the_selection_draws_it_once() {
        let mut tree = ViewTree::new(view(DisplayInfo::new(0.0, 0.0, 100.0, 100.0)));
        let root = tree.root();
        BoundsResolver::resolve(&mut tree, 1.0);

        let plan = plan_frame(
            &tree,
            FrameParams {
                hovered: Some(root),
                selected: Some(root),
                ..params()
            },
        );

        let outlines: Vec<_> = plan.outlines().collect();
        assert_eq!(outlines, vec![(root, BoxStyle::Selected)]);
    }

    #[test]
    fn test_highlighted_outlines_are_thicker() {
        assert_eq!(BoxStyle::Default.stroke_width(), 1);
        assert_eq!(BoxStyle::Hover.stroke_width(), 2);
        assert_eq!(BoxStyle::Selected.stroke_width(), 2);
    }

    #[test]
    fn test_preview_overlay_and_grid() {
        let mut tree = ViewTree::new(view(DisplayInfo::new(0.0, 0.0, 40.0, 20.0)));
        BoundsResolver::resolve(&mut tree, 4.0);

        let plan = plan_frame(
            &tree,
            FrameParams {
                zoom: 4.0,
                preview_size: Some(IVec2::new(40, 20)),
                grid_span: Some(10),
                overlay_alpha: Some(0.25),
                ..params()
            },
        );

        let dest = PreviewBox::new(0, 0, 160, 80);
        assert_eq!(
            plan.commands[1],
            DrawCommand::Preview {
                dest,
                filter: ImageFilter::Nearest
            }
        );

        let lines: Vec<_> = plan.grid_lines().collect();
        assert_eq!(
            lines,
            vec![
                (IVec2::new(40, 0), IVec2::new(40, 80)),
                (IVec2::new(80, 0), IVec2::new(80, 80)),
                (IVec2::new(120, 0), IVec2::new(120, 80)),
                (IVec2::new(0, 40), IVec2::new(160, 40)),
            ]
        );

        assert!(plan
            .commands
            .contains(&DrawCommand::Overlay { dest, alpha: 0.25 }));
        assert!(plan.commands.contains(&DrawCommand::ClipTo(dest)));
    }

    #[test]
    fn test_no_preview_means_no_image_commands() {
        let mut tree = ViewTree::new(view(DisplayInfo::new(0.0, 0.0, 40.0, 20.0)));
        BoundsResolver::resolve(&mut tree, 1.0);

        let plan = plan_frame(
            &tree,
            FrameParams {
                grid_span: Some(10),
                overlay_alpha: Some(0.5),
                ..params()
            },
        );

        assert!(!plan.commands.iter().any(|command| matches!(
            command,
            DrawCommand::Preview { .. } | DrawCommand::Overlay { .. } | DrawCommand::GridLine { .. }
        )));
    }
}
