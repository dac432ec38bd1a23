//! # View Tree
//!
//! Arena storage for a captured view hierarchy. Nodes live in a
//! [`SlotMap`] keyed by [`ViewNodeId`]; children are kept as ordered id
//! lists and the parent link is a plain optional id, so the tree has no
//! ownership cycles and stays cheap to walk in either direction.
//!
//! The hierarchy is fixed once a snapshot is loaded. The only state that
//! changes afterwards is derived: resolved preview boxes (written by the
//! bounds resolver) and the drawn flags (recomputed when the user forces a
//! view visible or invisible).

use crate::bounds::PreviewBox;
use crate::error::{Result, TreeError};
use crate::node::{ForcedState, ViewNode, ViewNodeId};
use crate::snapshot::ViewNodeSnapshot;
use smallvec::SmallVec;
use slotmap::SlotMap;

/// Ids along a hit or selection path. Real hierarchies rarely nest deeper
/// than this, so most paths never touch the heap.
pub type NodePath = SmallVec<[ViewNodeId; 16]>;

/// A captured view hierarchy with a single root.
#[derive(Clone, Debug)]
pub struct ViewTree {
    root: ViewNodeId,
    nodes: SlotMap<ViewNodeId, ViewNode>,
    resolved: bool,
}

impl ViewTree {
    /// Creates a tree containing only `root`.
    pub fn new(root: ViewNode) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ViewNode {
            parent: None,
            children: Vec::new(),
            ..root
        });

        let mut tree = Self {
            root,
            nodes,
            resolved: false,
        };
        tree.update_drawn();
        tree
    }

    /// Builds a tree from the nested description handed over by the
    /// capture parser.
    pub fn from_snapshot(snapshot: ViewNodeSnapshot) -> Self {
        let (root, children) = snapshot.into_parts();
        let mut tree = Self::new(root);

        let mut pending: Vec<(ViewNodeId, ViewNodeSnapshot)> = children
            .into_iter()
            .rev()
            .map(|child| (tree.root, child))
            .collect();

        while let Some((parent_id, snapshot)) = pending.pop() {
            let (node, children) = snapshot.into_parts();
            let node_id = tree.attach(parent_id, node);
            pending.extend(children.into_iter().rev().map(|child| (node_id, child)));
        }

        log::debug!("built view tree with {} nodes", tree.len());
        tree
    }

    /// Returns the ID of the root node
    pub fn root(&self) -> ViewNodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node_id: ViewNodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn node(&self, node_id: ViewNodeId) -> Option<&ViewNode> {
        self.nodes.get(node_id)
    }

    /// Appends `node` as the last (top-most) child of `parent_id`.
    pub fn add_child(&mut self, parent_id: ViewNodeId, node: ViewNode) -> Result<ViewNodeId> {
        if !self.nodes.contains_key(parent_id) {
            return Err(TreeError::UnknownNode(parent_id));
        }
        Ok(self.attach(parent_id, node))
    }

    /// Inserts a leaf under an existing parent and folds it into the drawn
    /// state without walking the whole tree.
    fn attach(&mut self, parent_id: ViewNodeId, node: ViewNode) -> ViewNodeId {
        let inherited = self
            .nodes
            .get(parent_id)
            .map(|parent| parent.visibility_for_children())
            .unwrap_or(false);

        let node_id = self.nodes.insert(ViewNode {
            parent: Some(parent_id),
            children: Vec::new(),
            ..node
        });

        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.push(node_id);
        }

        // A leaf takes its own drawn flag, then may light up its ancestors.
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.apply_drawn(inherited);
        }
        let mut current = node_id;
        while let Some(node) = self.nodes.get(current) {
            let lights_parent = node.drawn && node.display_info.visible;
            let Some(parent_id) = node.parent else { break };
            match self.nodes.get_mut(parent_id) {
                Some(parent) if lights_parent && !parent.drawn => {
                    parent.drawn = true;
                    current = parent_id;
                }
                _ => break,
            }
        }

        // New geometry invalidates any earlier pass.
        self.resolved = false;
        node_id
    }

    /// Gets the children of a node, in paint order
    pub fn children(&self, node_id: ViewNodeId) -> &[ViewNodeId] {
        self.nodes
            .get(node_id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn parent(&self, node_id: ViewNodeId) -> Option<ViewNodeId> {
        self.nodes.get(node_id).and_then(|node| node.parent)
    }

    /// Ids from the root down to `node_id`, both included.
    ///
    /// Empty if the node is not in this tree.
    pub fn path_to_root(&self, node_id: ViewNodeId) -> NodePath {
        let mut path = NodePath::new();
        let mut current = self.nodes.contains_key(node_id).then_some(node_id);
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path.reverse();
        path
    }

    /// Determines if `node_id` is `descendant_id` or one of its ancestors.
    pub fn is_ancestor(&self, node_id: ViewNodeId, descendant_id: ViewNodeId) -> bool {
        let mut current = Some(descendant_id);
        while let Some(id) = current {
            if id == node_id {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Walks the tree in paint order: each node before its children,
    /// siblings bottom-most first.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root],
        }
    }

    pub fn set_forced_state(&mut self, node_id: ViewNodeId, state: ForcedState) -> Result<()> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or(TreeError::UnknownNode(node_id))?;
        if node.forced_state != state {
            node.forced_state = state;
            self.update_drawn();
        }
        Ok(())
    }

    /// Recomputes the drawn flags of every node from the root down.
    pub fn update_drawn(&mut self) {
        self.update_drawn_from(self.root, true);
    }

    fn update_drawn_from(&mut self, node_id: ViewNodeId, parent_visible: bool) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return;
        };
        let inherited = node.apply_drawn(parent_visible);
        let children = node.children.clone();

        let mut any_child_drawn = false;
        for child_id in children {
            self.update_drawn_from(child_id, inherited);
            if let Some(child) = self.nodes.get(child_id) {
                any_child_drawn |= child.drawn && child.display_info.visible;
            }
        }

        if let Some(node) = self.nodes.get_mut(node_id) {
            node.drawn |= any_child_drawn;
        }
    }

    /// Whether a resolve pass has run since the geometry last changed.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Stores the boxes computed by a resolve pass.
    ///
    /// The tree only counts as resolved once every node has a box, so a
    /// partial pass still fails loudly on the first read. Returns whether
    /// the tree is now resolved.
    pub fn store_resolved_boxes(
        &mut self,
        boxes: impl IntoIterator<Item = (ViewNodeId, PreviewBox)>,
    ) -> bool {
        for (node_id, preview_box) in boxes {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.set_preview_box(preview_box);
            }
        }
        self.resolved = self.nodes.values().all(|node| node.preview_box.is_some());
        self.resolved
    }

    pub fn preview_box(&self, node_id: ViewNodeId) -> Option<PreviewBox> {
        self.nodes.get(node_id).and_then(|node| node.preview_box)
    }

    /// The resolved box of a node that must have one.
    ///
    /// # Panics
    ///
    /// Panics if no resolve pass has run on this tree yet. Reading boxes
    /// before then is an integration bug, not a recoverable condition.
    pub fn resolved_box(&self, node_id: ViewNodeId) -> PreviewBox {
        assert!(
            self.resolved,
            "preview boxes read before the view tree was resolved"
        );
        self.preview_box(node_id)
            .unwrap_or_else(|| panic!("view node {node_id} has no resolved preview box"))
    }
}

impl From<ViewNodeSnapshot> for ViewTree {
    fn from(snapshot: ViewNodeSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}

impl ViewNode {
    /// Sets this node's own drawn flag (before any child propagation) and
    /// returns the visibility its children inherit.
    fn apply_drawn(&mut self, parent_visible: bool) -> bool {
        self.parent_visible = parent_visible;
        match self.forced_state {
            ForcedState::None => {
                let info = &self.display_info;
                self.drawn = !info.will_not_draw && parent_visible && info.visible;
                parent_visible && info.visible
            }
            forced => {
                self.drawn = forced == ForcedState::Visible && parent_visible;
                self.drawn
            }
        }
    }

    /// The visibility this node passes down, given its current state.
    fn visibility_for_children(&self) -> bool {
        match self.forced_state {
            ForcedState::None => self.parent_visible && self.display_info.visible,
            forced => forced == ForcedState::Visible && self.parent_visible,
        }
    }
}

/// Pre-order iterator over a [`ViewTree`].
pub struct Preorder<'a> {
    tree: &'a ViewTree,
    stack: Vec<ViewNodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (ViewNodeId, &'a ViewNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.tree.nodes.get(id) {
                self.stack.extend(node.children.iter().rev().copied());
                return Some((id, node));
            }
        }
        None
    }
}
