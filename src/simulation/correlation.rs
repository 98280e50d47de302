use crate::simulation::params::{
    BuddhistField, BuddhistParameters, QuantumField, QuantumParameters,
};

/// Fixed pairing of one contemplative and one quantum field
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelationSpec {
    pub buddhist: BuddhistField,
    pub quantum: QuantumField,
    /// Strength when both paired values agree, in [0, 1]
    pub base_strength: f32,
}

/// Static correlation table
pub const CORRELATIONS: [CorrelationSpec; 4] = [
    CorrelationSpec {
        buddhist: BuddhistField::Emptiness,
        quantum: QuantumField::Superposition,
        base_strength: 0.95,
    },
    CorrelationSpec {
        buddhist: BuddhistField::Interdependence,
        quantum: QuantumField::Entanglement,
        base_strength: 0.92,
    },
    CorrelationSpec {
        buddhist: BuddhistField::Mindfulness,
        quantum: QuantumField::ObserverEffect,
        base_strength: 0.88,
    },
    CorrelationSpec {
        buddhist: BuddhistField::Karma,
        quantum: QuantumField::Uncertainty,
        base_strength: 0.85,
    },
];

/// Live strength of one table entry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelationStrength {
    pub spec: CorrelationSpec,
    pub buddhist_value: f32,
    pub quantum_value: f32,
    /// 1 - |buddhist - quantum|
    pub sync: f32,
    /// base_strength * sync
    pub current: f32,
}

/// Everything the correlation display needs for one parameter state
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationReport {
    pub entries: Vec<CorrelationStrength>,
    /// Mean of the current strengths
    pub harmony: f32,
    /// Mean of the unweighted sync terms
    pub sync: f32,
}

/// Compute live correlation strengths and harmony.
///
/// Pure and total: inputs are pre-clamped, so every difference lies in
/// [-1, 1] and every strength in [0, base_strength]. An empty table yields
/// zero harmony.
pub fn correlate(
    quantum: &QuantumParameters,
    buddhist: &BuddhistParameters,
    table: &[CorrelationSpec],
) -> CorrelationReport {
    let entries: Vec<CorrelationStrength> = table
        .iter()
        .map(|spec| {
            let buddhist_value = buddhist.get(spec.buddhist);
            let quantum_value = quantum.get(spec.quantum);
            let sync = 1.0 - (buddhist_value - quantum_value).abs();
            CorrelationStrength {
                spec: *spec,
                buddhist_value,
                quantum_value,
                sync,
                current: spec.base_strength * sync,
            }
        })
        .collect();

    let (harmony, sync) = if entries.is_empty() {
        (0.0, 0.0)
    } else {
        let n = entries.len() as f32;
        (
            entries.iter().map(|e| e.current).sum::<f32>() / n,
            entries.iter().map(|e| e.sync).sum::<f32>() / n,
        )
    };

    CorrelationReport {
        entries,
        harmony,
        sync,
    }
}
