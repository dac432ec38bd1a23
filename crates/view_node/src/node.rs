use crate::bounds::PreviewBox;
use crate::display_info::DisplayInfo;
use serde::{Deserialize, Serialize};
use slotmap::{Key, KeyData};
use std::fmt::{self, Display};

/// Placeholder the capture layer reports for views without a resource id.
pub const EMPTY_ID: &str = "NO_ID";

slotmap::new_key_type! {
    /// Identifies a view within its [`ViewTree`](crate::ViewTree).
    pub struct ViewNodeId;
}

impl ViewNodeId {
    /// Converts this id to a [u64], stable for the lifetime of the tree
    pub fn as_u64(self) -> u64 {
        self.data().as_ffi()
    }
}

impl From<u64> for ViewNodeId {
    fn from(value: u64) -> Self {
        Self::from(KeyData::from_ffi(value))
    }
}

impl Display for ViewNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

/// User override of a view's visibility in the preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForcedState {
    /// Follow the captured visibility
    #[default]
    None,
    Visible,
    Invisible,
}

/// One captured view.
///
/// Identity and local geometry come from the capture and never change.
/// The preview box is written by the bounds resolver and the drawn flags
/// are maintained by the owning tree.
#[derive(Clone, Debug)]
pub struct ViewNode {
    /// Fully qualified class name, e.g. `android.widget.FrameLayout`
    pub name: String,
    /// Identity hash reported by the capture
    pub hash: String,
    pub id: Option<String>,
    pub content_desc: Option<String>,
    pub display_info: DisplayInfo,

    pub(crate) parent: Option<ViewNodeId>,
    pub(crate) children: Vec<ViewNodeId>,
    pub(crate) preview_box: Option<PreviewBox>,
    pub(crate) forced_state: ForcedState,
    pub(crate) parent_visible: bool,
    pub(crate) drawn: bool,
}

impl ViewNode {
    pub fn new(name: impl Into<String>, hash: impl Into<String>, display_info: DisplayInfo) -> Self {
        Self {
            name: name.into(),
            hash: hash.into(),
            id: None,
            content_desc: None,
            display_info,
            parent: None,
            children: Vec::new(),
            preview_box: None,
            forced_state: ForcedState::None,
            parent_visible: false,
            drawn: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_content_desc(mut self, desc: impl Into<String>) -> Self {
        self.content_desc = Some(desc.into());
        self
    }

    pub fn parent(&self) -> Option<ViewNodeId> {
        self.parent
    }

    /// Children in paint order; index 0 is painted first (bottom-most).
    pub fn children(&self) -> &[ViewNodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The resolved box, or `None` before the first resolve pass.
    pub fn preview_box(&self) -> Option<PreviewBox> {
        self.preview_box
    }

    pub(crate) fn set_preview_box(&mut self, preview_box: PreviewBox) {
        self.preview_box = Some(preview_box);
    }

    pub fn forced_state(&self) -> ForcedState {
        self.forced_state
    }

    /// Whether this view, or something beneath it, ends up on screen.
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    pub fn is_parent_visible(&self) -> bool {
        self.parent_visible
    }

    /// Class name without its package, e.g. `FrameLayout`.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// The resource id, unless missing or the capture placeholder.
    pub fn display_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| *id != EMPTY_ID)
    }

    /// Human readable label used by tree and hover readouts.
    pub fn label(&self) -> String {
        let mut label = match self.display_id() {
            Some(id) => format!("{} ({})", id, self.simple_name()),
            None => self.simple_name().to_string(),
        };
        if let Some(desc) = &self.content_desc {
            label.push_str(&format!(" - \"{}\"", desc));
        }
        label
    }
}

impl Display for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.hash)
    }
}
