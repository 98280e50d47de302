/// Quantum parameter record, every field in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantumParameters {
    /// Amplitude and frequency of the oscillation term
    pub superposition: f32,
    /// Coupling strength toward the preceding particle
    pub entanglement: f32,
    /// Opacity / definiteness
    pub observer_effect: f32,
    /// Per-tick positional jitter
    pub uncertainty: f32,
}

/// Contemplative parameter record, every field in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuddhistParameters {
    /// Particle size scaling
    pub emptiness: f32,
    /// Density of drawn links
    pub interdependence: f32,
    /// Slow rotational drift
    pub karma: f32,
    /// Slow rotational drift
    pub compassion: f32,
    /// Breathing pulsation and baseline opacity
    pub mindfulness: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantumField {
    Superposition,
    Entanglement,
    ObserverEffect,
    Uncertainty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuddhistField {
    Emptiness,
    Interdependence,
    Karma,
    Compassion,
    Mindfulness,
}

impl Default for QuantumParameters {
    fn default() -> Self {
        Self {
            superposition: 0.5,
            entanglement: 0.5,
            observer_effect: 0.5,
            uncertainty: 0.5,
        }
    }
}

impl Default for BuddhistParameters {
    fn default() -> Self {
        Self {
            emptiness: 0.5,
            interdependence: 0.5,
            karma: 0.5,
            compassion: 0.5,
            mindfulness: 0.5,
        }
    }
}

impl QuantumField {
    pub const ALL: [QuantumField; 4] = [
        QuantumField::Superposition,
        QuantumField::Entanglement,
        QuantumField::ObserverEffect,
        QuantumField::Uncertainty,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuantumField::Superposition => "superposition",
            QuantumField::Entanglement => "entanglement",
            QuantumField::ObserverEffect => "observer effect",
            QuantumField::Uncertainty => "uncertainty",
        }
    }
}

impl BuddhistField {
    pub const ALL: [BuddhistField; 5] = [
        BuddhistField::Emptiness,
        BuddhistField::Interdependence,
        BuddhistField::Karma,
        BuddhistField::Compassion,
        BuddhistField::Mindfulness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BuddhistField::Emptiness => "emptiness (sunyata)",
            BuddhistField::Interdependence => "interdependence (pratityasamutpada)",
            BuddhistField::Karma => "karma",
            BuddhistField::Compassion => "compassion (karuna)",
            BuddhistField::Mindfulness => "mindfulness (smrti)",
        }
    }
}

impl QuantumParameters {
    pub fn get(&self, field: QuantumField) -> f32 {
        match field {
            QuantumField::Superposition => self.superposition,
            QuantumField::Entanglement => self.entanglement,
            QuantumField::ObserverEffect => self.observer_effect,
            QuantumField::Uncertainty => self.uncertainty,
        }
    }

    /// New record with `field` replaced by `value` clamped to [0, 1]
    pub fn with(self, field: QuantumField, value: f32) -> Self {
        let value = clamp_unit(value);
        let mut next = self;
        match field {
            QuantumField::Superposition => next.superposition = value,
            QuantumField::Entanglement => next.entanglement = value,
            QuantumField::ObserverEffect => next.observer_effect = value,
            QuantumField::Uncertainty => next.uncertainty = value,
        }
        next
    }
}

impl BuddhistParameters {
    pub fn get(&self, field: BuddhistField) -> f32 {
        match field {
            BuddhistField::Emptiness => self.emptiness,
            BuddhistField::Interdependence => self.interdependence,
            BuddhistField::Karma => self.karma,
            BuddhistField::Compassion => self.compassion,
            BuddhistField::Mindfulness => self.mindfulness,
        }
    }

    /// New record with `field` replaced by `value` clamped to [0, 1]
    pub fn with(self, field: BuddhistField, value: f32) -> Self {
        let value = clamp_unit(value);
        let mut next = self;
        match field {
            BuddhistField::Emptiness => next.emptiness = value,
            BuddhistField::Interdependence => next.interdependence = value,
            BuddhistField::Karma => next.karma = value,
            BuddhistField::Compassion => next.compassion = value,
            BuddhistField::Mindfulness => next.mindfulness = value,
        }
        next
    }
}

/// Any one of the nine tunable scalars
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parameter {
    Quantum(QuantumField),
    Buddhist(BuddhistField),
}

impl Parameter {
    /// Panel order: quantum set first, then the contemplative set
    pub const ALL: [Parameter; 9] = [
        Parameter::Quantum(QuantumField::Superposition),
        Parameter::Quantum(QuantumField::Entanglement),
        Parameter::Quantum(QuantumField::ObserverEffect),
        Parameter::Quantum(QuantumField::Uncertainty),
        Parameter::Buddhist(BuddhistField::Emptiness),
        Parameter::Buddhist(BuddhistField::Interdependence),
        Parameter::Buddhist(BuddhistField::Karma),
        Parameter::Buddhist(BuddhistField::Compassion),
        Parameter::Buddhist(BuddhistField::Mindfulness),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Parameter::Quantum(field) => field.label(),
            Parameter::Buddhist(field) => field.label(),
        }
    }
}

/// Current pair of parameter records.
///
/// Records are never mutated in place: every update builds a new record from
/// the previous one and swaps it in whole, so a tick always sees a consistent
/// snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParameterStore {
    quantum: QuantumParameters,
    buddhist: BuddhistParameters,
}

impl ParameterStore {
    pub fn quantum(&self) -> &QuantumParameters {
        &self.quantum
    }

    pub fn buddhist(&self) -> &BuddhistParameters {
        &self.buddhist
    }

    pub fn get(&self, parameter: Parameter) -> f32 {
        match parameter {
            Parameter::Quantum(field) => self.quantum.get(field),
            Parameter::Buddhist(field) => self.buddhist.get(field),
        }
    }

    /// Set one field, leaving every other field untouched.
    /// Returns true if the stored value changed.
    pub fn set(&mut self, parameter: Parameter, value: f32) -> bool {
        let before = self.get(parameter);
        match parameter {
            Parameter::Quantum(field) => self.replace_quantum(self.quantum.with(field, value)),
            Parameter::Buddhist(field) => self.replace_buddhist(self.buddhist.with(field, value)),
        }
        self.get(parameter) != before
    }

    pub fn replace_quantum(&mut self, quantum: QuantumParameters) {
        self.quantum = quantum;
    }

    pub fn replace_buddhist(&mut self, buddhist: BuddhistParameters) {
        self.buddhist = buddhist;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_half() {
        let store = ParameterStore::default();
        for parameter in Parameter::ALL {
            assert_eq!(store.get(parameter), 0.5);
        }
    }

    #[test]
    fn test_partial_update_leaves_other_fields() {
        let before = QuantumParameters::default();
        let after = before.with(QuantumField::Entanglement, 0.9);

        assert_eq!(after.entanglement, 0.9);
        assert_eq!(after.superposition, before.superposition);
        assert_eq!(after.observer_effect, before.observer_effect);
        assert_eq!(after.uncertainty, before.uncertainty);
        // The source record is untouched
        assert_eq!(before.entanglement, 0.5);
    }

    #[test]
    fn test_values_clamped_to_unit_range() {
        let mut store = ParameterStore::default();
        store.set(Parameter::Buddhist(BuddhistField::Karma), 1.7);
        store.set(Parameter::Quantum(QuantumField::Uncertainty), -0.3);
        store.set(Parameter::Buddhist(BuddhistField::Emptiness), f32::NAN);

        assert_eq!(store.buddhist().karma, 1.0);
        assert_eq!(store.quantum().uncertainty, 0.0);
        assert_eq!(store.buddhist().emptiness, 0.0);
    }

    #[test]
    fn test_set_reports_change() {
        let mut store = ParameterStore::default();
        let parameter = Parameter::Quantum(QuantumField::Superposition);

        assert!(store.set(parameter, 0.75));
        assert!(!store.set(parameter, 0.75));
        // Already at the top of the range
        store.set(parameter, 1.0);
        assert!(!store.set(parameter, 1.2));
    }

    #[test]
    fn test_every_parameter_is_addressable() {
        let mut store = ParameterStore::default();
        for (i, parameter) in Parameter::ALL.into_iter().enumerate() {
            let value = i as f32 / 10.0;
            store.set(parameter, value);
            assert_eq!(store.get(parameter), value, "{}", parameter.label());
        }
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = ParameterStore::default();
        store.set(Parameter::Buddhist(BuddhistField::Mindfulness), 0.1);
        store.reset();
        assert_eq!(store, ParameterStore::default());
    }
}
