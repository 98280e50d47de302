use crate::config::SLIDER_STEP;
use crate::simulation::{Parameter, ParameterStore};

/// Tuning panel state: visibility and which slider has focus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    pub open: bool,
    selected: usize,
}

impl PanelState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn selected(&self) -> Parameter {
        Parameter::ALL[self.selected]
    }

    /// Give focus to `parameter`
    pub fn select(&mut self, parameter: Parameter) {
        if let Some(index) = Parameter::ALL.iter().position(|&p| p == parameter) {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Parameter::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + Parameter::ALL.len() - 1) % Parameter::ALL.len();
    }

    /// Move the focused slider by `steps` increments.
    /// Returns true if the store changed.
    pub fn nudge(&self, store: &mut ParameterStore, steps: i32) -> bool {
        let parameter = self.selected();
        let value = store.get(parameter) + steps as f32 * SLIDER_STEP;
        // Snap to the slider grid so repeated steps don't drift
        let snapped = (value / SLIDER_STEP).round() * SLIDER_STEP;
        store.set(parameter, snapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::{BuddhistField, QuantumField};

    #[test]
    fn test_starts_closed_on_first_parameter() {
        let panel = PanelState::default();
        assert!(!panel.open);
        assert_eq!(panel.selected(), Parameter::Quantum(QuantumField::Superposition));
    }

    #[test]
    fn test_selection_wraps() {
        let mut panel = PanelState::default();
        panel.select_prev();
        assert_eq!(panel.selected(), Parameter::Buddhist(BuddhistField::Mindfulness));
        panel.select_next();
        assert_eq!(panel.selected(), Parameter::ALL[0]);
    }

    #[test]
    fn test_select_by_parameter() {
        let mut panel = PanelState::default();
        let karma = Parameter::Buddhist(BuddhistField::Karma);
        panel.select(karma);
        assert_eq!(panel.selected(), karma);

        panel.select_next();
        assert_eq!(panel.selected(), Parameter::Buddhist(BuddhistField::Compassion));
    }

    #[test]
    fn test_nudge_changes_only_selected() {
        let mut store = ParameterStore::default();
        let mut panel = PanelState::default();
        panel.select_next();

        assert!(panel.nudge(&mut store, 5));
        assert!((store.quantum().entanglement - 0.55).abs() < 1e-6);
        assert_eq!(store.quantum().superposition, 0.5);
        assert_eq!(store.buddhist(), ParameterStore::default().buddhist());
    }

    #[test]
    fn test_nudge_clamps_at_range_ends() {
        let mut store = ParameterStore::default();
        let panel = PanelState::default();

        for _ in 0..80 {
            panel.nudge(&mut store, 1);
        }
        assert_eq!(store.quantum().superposition, 1.0);
        assert!(!panel.nudge(&mut store, 1));

        for _ in 0..120 {
            panel.nudge(&mut store, -1);
        }
        assert_eq!(store.quantum().superposition, 0.0);
    }

    #[test]
    fn test_toggle() {
        let mut panel = PanelState::default();
        panel.toggle();
        assert!(panel.open);
        panel.toggle();
        assert!(!panel.open);
    }
}
