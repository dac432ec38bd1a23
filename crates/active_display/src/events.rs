use slotmap::SlotMap;
use std::fmt;
use view_node::ViewNodeId;

/// Events emitted by the active display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    /// The view under the pointer changed; `None` when nothing is hovered
    HoverChanged(Option<ViewNodeId>),
    SelectionChanged(ViewNodeId),
    NodeDoubleClicked(ViewNodeId),
}

slotmap::new_key_type! {
    /// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
    pub struct SubscriptionId;
}

type Listener = Box<dyn FnMut(&DisplayEvent)>;

/// Observer list for [`DisplayEvent`]s.
///
/// Listeners run synchronously on the thread that drives the display.
#[derive(Default)]
pub struct Subscribers {
    listeners: SlotMap<SubscriptionId, Listener>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DisplayEvent) + 'static) -> SubscriptionId {
        self.listeners.insert(Box::new(listener))
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, event: DisplayEvent) {
        log::debug!("emit {:?} to {} listeners", event, self.listeners.len());
        for listener in self.listeners.values_mut() {
            listener(&event);
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
