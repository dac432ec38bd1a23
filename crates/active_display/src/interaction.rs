use view_node::ViewNodeId;

/// Direction to step through the candidates under a fixed point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    /// Toward larger, enclosing views
    Outward,
    /// Back toward the smallest view under the point
    Inward,
}

impl CycleDirection {
    /// Maps a wheel rotation to a direction. Positive rotation (scrolling
    /// toward the user) steps inward; anything else steps outward.
    pub fn from_wheel(rotation: i32) -> Self {
        if rotation > 0 {
            Self::Inward
        } else {
            Self::Outward
        }
    }
}

/// Where the pointer interaction currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Hovering {
        node: ViewNodeId,
        candidate_index: usize,
    },
    /// Nothing hovered, but a selection is being shown
    Selected { node: ViewNodeId },
}

/// Hover, selection and candidate cycling state.
///
/// Selection is sticky: once set it only changes by selecting another
/// view, or when a new snapshot replaces the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<ViewNodeId>,
    selected: Option<ViewNodeId>,
    candidate_index: usize,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<ViewNodeId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<ViewNodeId> {
        self.selected
    }

    pub fn candidate_index(&self) -> usize {
        self.candidate_index
    }

    pub fn phase(&self) -> InteractionPhase {
        match (self.hovered, self.selected) {
            (Some(node), _) => InteractionPhase::Hovering {
                node,
                candidate_index: self.candidate_index,
            },
            (None, Some(node)) => InteractionPhase::Selected { node },
            (None, None) => InteractionPhase::Idle,
        }
    }

    /// Starts cycling over from the smallest candidate.
    pub fn reset_cycle(&mut self) {
        self.candidate_index = 0;
    }

    /// Steps the candidate index by one, clamped to `candidates`.
    pub fn cycle(&mut self, direction: CycleDirection, candidates: usize) {
        self.candidate_index = match direction {
            CycleDirection::Outward => self.candidate_index.saturating_add(1),
            CycleDirection::Inward => self.candidate_index.saturating_sub(1),
        };
        self.clamp(candidates);
    }

    fn clamp(&mut self, candidates: usize) {
        self.candidate_index = self.candidate_index.min(candidates.saturating_sub(1));
    }

    /// The candidate at the current index, pulling the index back into
    /// range first. `None` when there are no candidates.
    pub fn choose(&mut self, candidates: &[ViewNodeId]) -> Option<ViewNodeId> {
        self.clamp(candidates.len());
        candidates.get(self.candidate_index).copied()
    }

    /// Returns whether the hovered view changed.
    pub fn set_hovered(&mut self, node: Option<ViewNodeId>) -> bool {
        if self.hovered == node {
            return false;
        }
        self.hovered = node;
        true
    }

    /// Returns whether the selected view changed.
    pub fn set_selected(&mut self, node: ViewNodeId) -> bool {
        if self.selected == Some(node) {
            return false;
        }
        self.selected = Some(node);
        true
    }

    /// Drops hover, selection and cycling, as on loading a new snapshot.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(count: usize) -> Vec<ViewNodeId> {
        let mut map: SlotMap<ViewNodeId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_cycle_clamps_to_candidates() {
        let candidates = ids(3);
        let mut state = InteractionState::new();

        for _ in 0..10 {
            state.cycle(CycleDirection::Outward, candidates.len());
        }
        assert_eq!(state.candidate_index(), 2);
        assert_eq!(state.choose(&candidates), Some(candidates[2]));

        for _ in 0..10 {
            state.cycle(CycleDirection::Inward, candidates.len());
        }
        assert_eq!(state.candidate_index(), 0);
        assert_eq!(state.choose(&candidates), Some(candidates[0]));
    }

    #[test]
    fn test_choose_pulls_index_into_range() {
        let mut state = InteractionState::new();
        state.cycle(CycleDirection::Outward, 5);
        state.cycle(CycleDirection::Outward, 5);
        assert_eq!(state.candidate_index(), 2);

        let fewer = ids(2);
        assert_eq!(state.choose(&fewer), Some(fewer[1]));
        assert_eq!(state.choose(&[]), None);
        assert_eq!(state.candidate_index(), 0);
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(CycleDirection::from_wheel(1), CycleDirection::Inward);
        assert_eq!(CycleDirection::from_wheel(-1), CycleDirection::Outward);
        assert_eq!(CycleDirection::from_wheel(0), CycleDirection::Outward);
    }

    #[test]
    fn test_phases() {
        let nodes = ids(2);
        let mut state = InteractionState::new();
        assert_eq!(state.phase(), InteractionPhase::Idle);

        assert!(state.set_hovered(Some(nodes[0])));
        assert!(!state.set_hovered(Some(nodes[0])));
        assert_eq!(
            state.phase(),
            InteractionPhase::Hovering {
                node: nodes[0],
                candidate_index: 0
            }
        );

        assert!(state.set_selected(nodes[1]));
        assert!(!state.set_selected(nodes[1]));
        assert!(state.set_hovered(None));
        assert_eq!(state.phase(), InteractionPhase::Selected { node: nodes[1] });

        state.reset();
        assert_eq!(state, InteractionState::new());
    }
}
