//! End-to-end picking scenarios through the public display API.

use active_display::{pick_at, ActiveDisplay, BoundsResolver, DisplayEvent, NoDrawPolicy};
use std::cell::RefCell;
use std::rc::Rc;
use view_node::{DisplayInfo, DrawShift, PreviewPoint, ScreenPoint, ViewNode, ViewNodeId, ViewTree};

fn view(name: &str, info: DisplayInfo) -> ViewNode {
    ViewNode::new(name, "0", info)
}

/// A display laid out so that zoom is 1 and preview point `(x, y)` maps to
/// screen point `(x + 10, y + 10)`.
fn laid_out(tree: ViewTree) -> ActiveDisplay {
    let root_size = tree.node(tree.root()).unwrap().display_info;
    let mut display = ActiveDisplay::new(tree, None);
    display.layout(root_size.width as i32 + 20, root_size.height as i32 + 20);
    assert_eq!(display.zoom(), 1.0);
    assert_eq!(display.draw_shift(), DrawShift::new(10, 10));
    display
}

fn at(x: i32, y: i32) -> ScreenPoint {
    PreviewPoint::new(x, y).to_screen(DrawShift::new(10, 10))
}

#[test]
fn lone_root_is_picked_at_its_center() {
    let mut tree = ViewTree::new(view("root", DisplayInfo::new(0.0, 0.0, 320.0, 180.0)));
    BoundsResolver::resolve(&mut tree, 1.0);

    let candidates = pick_at(&tree, PreviewPoint::new(160, 90), NoDrawPolicy::PassThrough);
    assert_eq!(candidates, vec![tree.root()]);
}

#[test]
fn smaller_sibling_comes_first() {
    let mut tree = ViewTree::new(
        view("root", DisplayInfo::new(0.0, 0.0, 300.0, 300.0).no_draw(true)),
    );
    let root = tree.root();
    let a = tree
        .add_child(root, view("a", DisplayInfo::new(0.0, 0.0, 100.0, 100.0)))
        .unwrap();
    let b = tree
        .add_child(root, view("b", DisplayInfo::new(40.0, 40.0, 10.0, 10.0)))
        .unwrap();
    let mut display = laid_out(tree);

    assert_eq!(display.candidates_at(at(45, 45)), vec![b, a]);

    display.pointer_entered(at(45, 45));
    assert_eq!(display.hovered(), Some(b));
}

#[test]
fn half_clipped_grandchild() {
    let mut tree = ViewTree::new(
        view("root", DisplayInfo::new(0.0, 0.0, 200.0, 200.0).no_draw(true)),
    );
    let root = tree.root();
    let a = tree
        .add_child(
            root,
            view("a", DisplayInfo::new(10.0, 10.0, 50.0, 50.0).clipping(true)),
        )
        .unwrap();
    let b = tree
        .add_child(a, view("b", DisplayInfo::new(30.0, 30.0, 30.0, 30.0)))
        .unwrap();
    let display = laid_out(tree);

    assert_eq!(display.candidates_at(at(45, 45)), vec![b, a]);
    assert!(display.candidates_at(at(65, 65)).is_empty());
}

#[test]
fn view_outside_clipping_parent_is_never_picked() {
    let mut tree = ViewTree::new(view("root", DisplayInfo::new(0.0, 0.0, 100.0, 100.0)));
    let root = tree.root();
    let frame = tree
        .add_child(
            root,
            view("frame", DisplayInfo::new(0.0, 0.0, 40.0, 40.0).clipping(true)),
        )
        .unwrap();
    let outside = tree
        .add_child(frame, view("outside", DisplayInfo::new(50.0, 50.0, 30.0, 30.0)))
        .unwrap();
    let display = laid_out(tree);

    for y in -5..105 {
        for x in -5..105 {
            assert!(!display.candidates_at(at(x, y)).contains(&outside));
        }
    }
}

#[test]
fn click_on_nothing_keeps_selection() {
    let mut tree = ViewTree::new(
        view("root", DisplayInfo::new(0.0, 0.0, 200.0, 200.0).no_draw(true)),
    );
    let root = tree.root();
    let button = tree
        .add_child(root, view("button", DisplayInfo::new(20.0, 20.0, 40.0, 20.0)))
        .unwrap();
    let mut display = laid_out(tree);

    assert_eq!(display.clicked(at(30, 30)), Some(button));
    assert_eq!(display.clicked(at(150, 150)), None);
    assert_eq!(display.selected(), Some(button));
}

#[test]
fn no_draw_container_is_transparent() {
    let mut tree = ViewTree::new(view("root", DisplayInfo::new(0.0, 0.0, 200.0, 200.0)));
    let root = tree.root();
    let container = tree
        .add_child(
            root,
            view("container", DisplayInfo::new(0.0, 0.0, 150.0, 150.0).no_draw(true)),
        )
        .unwrap();
    let label = tree
        .add_child(container, view("label", DisplayInfo::new(10.0, 10.0, 50.0, 20.0)))
        .unwrap();
    let mut display = laid_out(tree);

    let candidates = display.candidates_at(at(20, 20));
    assert_eq!(candidates, vec![label, root]);
    assert!(!candidates.contains(&container));

    assert_eq!(display.clicked(at(20, 20)), Some(label));
}

#[test]
fn cycling_stays_in_bounds_and_resets_on_new_view() {
    let mut tree = ViewTree::new(view("root", DisplayInfo::new(0.0, 0.0, 200.0, 200.0)));
    let root = tree.root();
    let card = tree
        .add_child(root, view("card", DisplayInfo::new(0.0, 0.0, 100.0, 100.0)))
        .unwrap();
    let icon = tree
        .add_child(card, view("icon", DisplayInfo::new(10.0, 10.0, 10.0, 10.0)))
        .unwrap();
    let other = tree
        .add_child(root, view("other", DisplayInfo::new(120.0, 120.0, 20.0, 20.0)))
        .unwrap();
    let mut display = laid_out(tree);

    let hovered: Rc<RefCell<Vec<Option<ViewNodeId>>>> = Rc::default();
    let sink = hovered.clone();
    display.subscribe(move |event| {
        if let DisplayEvent::HoverChanged(node) = event {
            sink.borrow_mut().push(*node);
        }
    });

    display.pointer_entered(at(15, 15));
    for _ in 0..5 {
        display.wheel(at(15, 15), -1);
        assert!(display.candidate_index() < 3);
    }
    assert_eq!(display.hovered(), Some(root));

    // Moving inside the hovered root keeps the position in the cycle.
    display.pointer_moved(at(16, 16));
    assert_eq!(display.hovered(), Some(root));

    display.wheel(at(16, 16), 1);
    assert_eq!(display.hovered(), Some(card));

    // Leaving the card starts over at the smallest view under the pointer.
    display.pointer_moved(at(130, 130));
    assert_eq!(display.candidate_index(), 0);
    assert_eq!(display.hovered(), Some(other));

    assert_eq!(
        *hovered.borrow(),
        vec![Some(icon), Some(card), Some(root), Some(card), Some(other)]
    );
}
