use crate::display_info::DisplayInfo;
use crate::node::ViewNode;
use serde::{Deserialize, Serialize};

/// Nested description of a captured hierarchy, as handed over by the
/// capture parser. Converted into a [`ViewTree`](crate::ViewTree) on load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewNodeSnapshot {
    pub name: String,
    pub hash: String,
    pub id: Option<String>,
    pub content_desc: Option<String>,
    pub display_info: DisplayInfo,
    pub children: Vec<ViewNodeSnapshot>,
}

impl ViewNodeSnapshot {
    pub fn new(name: impl Into<String>, display_info: DisplayInfo) -> Self {
        Self {
            name: name.into(),
            display_info,
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ViewNodeSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Splits into the node itself and its still-nested children.
    pub(crate) fn into_parts(self) -> (ViewNode, Vec<ViewNodeSnapshot>) {
        let node = ViewNode {
            id: self.id,
            content_desc: self.content_desc,
            ..ViewNode::new(self.name, self.hash, self.display_info)
        };
        (node, self.children)
    }
}
