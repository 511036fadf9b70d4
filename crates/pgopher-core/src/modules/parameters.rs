//! Declarative YAML parameter files.
//!
//! ```yaml
//! mol_type: Asymmetric
//! mixture: { Temperature: 10.0 }
//! species: { Name: HC3N, Jmax: 50 }
//! parameters: { A: 24023.0, B: 2102.0, C: 1962.0 }
//! settings: { Name: Molecule }
//! trans_mom: { a: 1.0, b: 0.5 }
//! ```

use crate::domain::{ParameterMap, PgopherError, PgopherResult};
use crate::modules::molecule::MoleculeConfig;
use crate::modules::simulation::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MOL_TYPE: &str = "Asymmetric";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixture: Option<ParameterMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<ParameterMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mol_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParameterMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ParameterMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_mom: Option<ParameterMap>,
}

impl ParameterFile {
    pub fn from_yaml_str(source: &str) -> PgopherResult<Self> {
        // An empty document is a valid file with every key absent.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|source| {
            PgopherError::invalid_input(format!("failed to parse parameter file: {source}"))
        })
    }

    pub fn read(path: &Path) -> PgopherResult<Self> {
        let source = fs::read_to_string(path)
            .map_err(|source| PgopherError::io("read parameter file", path, source))?;
        Self::from_yaml_str(&source).map_err(|error| match error {
            PgopherError::InvalidInput(message) => {
                PgopherError::InvalidInput(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    pub fn to_yaml_string(&self) -> PgopherResult<String> {
        serde_yaml::to_string(self).map_err(|source| {
            PgopherError::invalid_input(format!("failed to render parameter file: {source}"))
        })
    }

    /// Fully merged snapshot of both configs; every key is present.
    pub fn from_configs(simulation: &SimulationConfig, molecule: &MoleculeConfig) -> Self {
        let trans_mom = molecule
            .trans_mom()
            .iter()
            .map(|(axis, strength)| (axis.as_str(), strength))
            .collect();
        Self {
            mixture: Some(simulation.mixture().clone()),
            species: Some(simulation.species().clone()),
            mol_type: Some(molecule.mol_type().as_str().to_string()),
            parameters: Some(molecule.parameters().clone()),
            settings: Some(molecule.settings().clone()),
            trans_mom: Some(trans_mom),
        }
    }

    pub fn into_configs(self) -> PgopherResult<(SimulationConfig, MoleculeConfig)> {
        let simulation = SimulationConfig::new(self.mixture, self.species);
        let mol_type = self.mol_type.as_deref().unwrap_or(DEFAULT_MOL_TYPE);
        let molecule =
            MoleculeConfig::new(mol_type, self.settings, self.parameters, self.trans_mom)?;
        Ok((simulation, molecule))
    }
}
