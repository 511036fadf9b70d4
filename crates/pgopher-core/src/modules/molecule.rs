//! Molecule topology, Hamiltonian constants and transition moments.

use crate::domain::{Axis, MolType, ParamValue, ParameterMap, PgopherError, PgopherResult};
use tracing::debug;

pub const DEFAULT_MOLECULE_NAME: &str = "Molecule";
pub const HAMILTONIAN_DEFAULTS: [(&str, f64); 3] = [("A", 24023.0), ("B", 2102.0), ("C", 1962.0)];

/// Dipole strength along each principal axis. Only strictly positive
/// strengths produce a transition; zero, negative and NaN do not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionMoments {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl TransitionMoments {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Defaults overlaid with the `a`/`b`/`c` entries of `overrides`.
    ///
    /// Keys outside the three axes are dropped.
    pub fn from_overrides(overrides: &ParameterMap) -> PgopherResult<Self> {
        let mut moments = Self::default();
        for (key, value) in overrides.iter() {
            let Some(axis) = Axis::from_key(key) else {
                debug!(key, "dropping transition moment outside the a/b/c axes");
                continue;
            };
            let strength = value.as_f64().ok_or_else(|| {
                PgopherError::invalid_input(format!(
                    "transition moment '{key}' must be numeric, got '{value}'"
                ))
            })?;
            moments.set(axis, strength);
        }
        Ok(moments)
    }

    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::A => self.a,
            Axis::B => self.b,
            Axis::C => self.c,
        }
    }

    pub fn set(&mut self, axis: Axis, strength: f64) {
        match axis {
            Axis::A => self.a = strength,
            Axis::B => self.b = strength,
            Axis::C => self.c = strength,
        }
    }

    /// Axes in a, b, c order with their strengths.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.into_iter().map(|axis| (axis, self.get(axis)))
    }

    /// Axes that produce a transition moment.
    pub fn active_axes(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        self.iter().filter(|(_, strength)| *strength > 0.0)
    }
}

impl Default for TransitionMoments {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeConfig {
    mol_type: MolType,
    settings: ParameterMap,
    parameters: ParameterMap,
    trans_mom: TransitionMoments,
}

impl MoleculeConfig {
    /// Build from a raw topology name. Unknown names fail with
    /// [`PgopherError::InvalidTopology`].
    pub fn new(
        mol_type: &str,
        settings: Option<ParameterMap>,
        parameters: Option<ParameterMap>,
        trans_mom: Option<ParameterMap>,
    ) -> PgopherResult<Self> {
        let mol_type = mol_type.parse::<MolType>()?;
        let trans_mom = match trans_mom {
            Some(overrides) => TransitionMoments::from_overrides(&overrides)?,
            None => TransitionMoments::default(),
        };
        Ok(Self::with_type(mol_type, settings, parameters, trans_mom))
    }

    pub fn with_type(
        mol_type: MolType,
        settings: Option<ParameterMap>,
        parameters: Option<ParameterMap>,
        trans_mom: TransitionMoments,
    ) -> Self {
        Self {
            mol_type,
            settings: ParameterMap::merged(settings_defaults(), settings),
            parameters: ParameterMap::merged(hamiltonian_defaults(), parameters),
            trans_mom,
        }
    }

    pub fn mol_type(&self) -> MolType {
        self.mol_type
    }

    pub fn settings(&self) -> &ParameterMap {
        &self.settings
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn trans_mom(&self) -> &TransitionMoments {
        &self.trans_mom
    }
}

impl Default for MoleculeConfig {
    fn default() -> Self {
        Self::with_type(MolType::Asymmetric, None, None, TransitionMoments::default())
    }
}

fn settings_defaults() -> ParameterMap {
    ParameterMap::new().with("Name", DEFAULT_MOLECULE_NAME)
}

fn hamiltonian_defaults() -> ParameterMap {
    HAMILTONIAN_DEFAULTS
        .iter()
        .map(|(key, value)| (*key, ParamValue::Real(*value)))
        .collect()
}
