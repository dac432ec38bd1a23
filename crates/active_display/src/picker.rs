//! # Picking
//!
//! Finds every view under a point in preview space.
//!
//! A plain "top-most box containing the point" search is not enough here:
//! views may be clipped by an ancestor, and views completely covered by
//! later siblings must stay reachable. So the picker collects all
//! candidates and orders them by area, smallest first, leaving the choice
//! among them to the interaction layer.
//!
//! The walk carries a clip rectangle, starting as the root box. A view is
//! tested against the clip inherited from its parent; if the point is
//! outside that clip, the view and its whole subtree are skipped. Views
//! that clip their children narrow the clip before recursing.

use crate::config::NoDrawPolicy;
use view_node::{ClipRect, PreviewPoint, ViewNodeId, ViewTree};

enum Step {
    Enter(ViewNodeId, ClipRect),
    /// Leaving a hit no-draw view tracked as a fallback. `hits_before` is
    /// the hit count when it was entered.
    Leave {
        node_id: ViewNodeId,
        area: i64,
        hits_before: usize,
    },
}

/// Candidates under a point, smallest area first.
///
/// Views with equal area keep paint order. Under
/// [`NoDrawPolicy::Fallback`], a hit no-draw view is offered when no
/// visible view inside it matches; nested no-draw views defer to the
/// outermost one.
pub fn pick_at(tree: &ViewTree, point: PreviewPoint, policy: NoDrawPolicy) -> Vec<ViewNodeId> {
    assert!(
        tree.is_resolved(),
        "picking requires a resolved view tree; run the bounds resolver first"
    );

    let root = tree.root();
    let root_box = tree.resolved_box(root);
    if !root_box.contains(point) {
        return Vec::new();
    }

    let mut hits: Vec<(ViewNodeId, i64)> = Vec::new();
    // No-draw views currently open on the walk, at most one per path.
    let mut open_fallbacks = 0usize;
    let mut stack = vec![Step::Enter(root, ClipRect::from_root(&root_box))];

    while let Some(step) = stack.pop() {
        let (node_id, clip) = match step {
            Step::Enter(node_id, clip) => (node_id, clip),
            Step::Leave {
                node_id,
                area,
                hits_before,
            } => {
                open_fallbacks -= 1;
                if hits.len() == hits_before {
                    hits.push((node_id, area));
                }
                continue;
            }
        };

        let Some(node) = tree.node(node_id) else {
            continue;
        };
        if !node.is_drawn() || !clip.contains(point) {
            continue;
        }

        let bounds = tree.resolved_box(node_id);
        if bounds.contains(point) {
            if !node.display_info.will_not_draw {
                hits.push((node_id, bounds.area()));
            } else if policy == NoDrawPolicy::Fallback && open_fallbacks == 0 {
                // Pushed before the children, so popped after them.
                open_fallbacks += 1;
                stack.push(Step::Leave {
                    node_id,
                    area: bounds.area(),
                    hits_before: hits.len(),
                });
            }
        }

        let child_clip = if node.display_info.clip_children {
            clip.intersect_box(&bounds)
        } else {
            clip
        };
        stack.extend(
            node.children()
                .iter()
                .rev()
                .map(|&child| Step::Enter(child, child_clip)),
        );
    }

    // Stable, so equal areas stay in paint order.
    hits.sort_by_key(|&(_, area)| area);
    let candidates: Vec<ViewNodeId> = hits.into_iter().map(|(id, _)| id).collect();

    log::trace!(
        "pick at ({}, {}): {} candidates",
        point.x(),
        point.y(),
        candidates.len()
    );
    candidates
}
