//! Mixture-wide settings and the single species entry.

use crate::domain::{ParamValue, ParameterMap};

pub const MIXTURE_DEFAULTS: [(&str, f64); 5] = [
    ("Temperature", 300.0),
    ("Fmin", 0.001),
    ("Fmax", 250000.0),
    ("OThreshold", 1e-4),
    ("SmallE", 2e-18),
];

pub const DEFAULT_SPECIES_NAME: &str = "Species";
pub const DEFAULT_JMAX: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    mixture: ParameterMap,
    species: ParameterMap,
}

impl SimulationConfig {
    pub fn new(mixture: Option<ParameterMap>, species: Option<ParameterMap>) -> Self {
        Self {
            mixture: ParameterMap::merged(mixture_defaults(), mixture),
            species: ParameterMap::merged(species_defaults(), species),
        }
    }

    pub fn mixture(&self) -> &ParameterMap {
        &self.mixture
    }

    pub fn species(&self) -> &ParameterMap {
        &self.species
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn mixture_defaults() -> ParameterMap {
    MIXTURE_DEFAULTS
        .iter()
        .map(|(key, value)| (*key, ParamValue::Real(*value)))
        .collect()
}

fn species_defaults() -> ParameterMap {
    ParameterMap::new()
        .with("Name", DEFAULT_SPECIES_NAME)
        .with("Jmax", DEFAULT_JMAX)
}
