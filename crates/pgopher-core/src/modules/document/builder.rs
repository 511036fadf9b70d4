use super::model::{Element, NodeKind};
use super::writer::{is_attribute_name, write_document};
use crate::domain::{MolType, ParameterMap, PgopherError, PgopherResult};
use crate::modules::molecule::MoleculeConfig;
use crate::modules::serialization::{format_real, write_text_artifact};
use crate::modules::simulation::SimulationConfig;
use std::path::Path;
use tracing::debug;

pub const MIXTURE_DISPLAY_SETTINGS: [(&str, &str); 4] = [
    ("Units", "MHz"),
    ("PlotUnits", "MHz"),
    ("IntensityUnits", "nm2MHzperMolecule"),
    ("PrintLevel", "CSV"),
];

const GROUND_MANIFOLD: &str = "Ground";
const GROUND_STATE: &str = "v=0";
const STRENGTH_PARAMETER: &str = "Strength";

/// Assembles one simulation and one molecule into the fixed PGopher schema.
#[derive(Debug, Clone, Copy)]
pub struct DocumentBuilder<'a> {
    simulation: &'a SimulationConfig,
    molecule: &'a MoleculeConfig,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(simulation: &'a SimulationConfig, molecule: &'a MoleculeConfig) -> Self {
        Self {
            simulation,
            molecule,
        }
    }

    /// Fails with [`PgopherError::InvalidInput`] when a species or molecule
    /// setting key is not a valid XML attribute name.
    pub fn build(&self) -> PgopherResult<Element> {
        let mut mixture = self.mixture_element()?;
        mixture.push(self.molecule_element()?);
        Ok(mixture)
    }

    pub fn to_xml(&self) -> PgopherResult<String> {
        Ok(write_document(&self.build()?))
    }

    pub fn save(&self, path: &Path) -> PgopherResult<()> {
        let xml = self.to_xml()?;
        write_text_artifact(path, &xml)
            .map_err(|source| PgopherError::io("write document", path, source))?;
        debug!(path = %path.display(), bytes = xml.len(), "wrote PGopher document");
        Ok(())
    }

    fn mixture_element(&self) -> PgopherResult<Element> {
        let mut mixture = Element::new(NodeKind::Mixture);
        for (name, value) in MIXTURE_DISPLAY_SETTINGS {
            mixture.set_attribute(name, value);
        }
        for (name, value) in self.simulation.mixture().iter() {
            mixture.push(Element::parameter(name, value.to_string()));
        }

        let mut species = Element::new(NodeKind::Species);
        set_user_attributes(&mut species, self.simulation.species())?;
        mixture.push(species);
        Ok(mixture)
    }

    fn molecule_element(&self) -> PgopherResult<Element> {
        let mol_type = self.molecule.mol_type();
        let mut molecule = Element::new(NodeKind::Molecule(mol_type));
        set_user_attributes(&mut molecule, self.molecule.settings())?;

        let manifold = Element::new(NodeKind::Manifold(mol_type))
            .with_attribute("Name", GROUND_MANIFOLD)
            .with_attribute("Initial", "True")
            .with_child(self.hamiltonian_element(mol_type));

        molecule.push(manifold);
        molecule.push(self.transition_moments_element());
        Ok(molecule)
    }

    fn hamiltonian_element(&self, mol_type: MolType) -> Element {
        let mut hamiltonian =
            Element::new(NodeKind::Hamiltonian(mol_type)).with_attribute("Name", GROUND_STATE);
        if mol_type == MolType::Asymmetric {
            hamiltonian.set_attribute("Symmetry", "A");
        }
        for (name, value) in self.molecule.parameters().iter() {
            hamiltonian.push(Element::parameter(name, value.to_string()));
        }
        hamiltonian
    }

    fn transition_moments_element(&self) -> Element {
        let mut transitions = Element::new(NodeKind::TransitionMoments)
            .with_attribute("Bra", GROUND_MANIFOLD)
            .with_attribute("Ket", GROUND_MANIFOLD);

        for (axis, strength) in self.molecule.trans_mom().active_axes() {
            let moment = Element::new(NodeKind::CartesianTransitionMoment)
                .with_attribute("Bra", GROUND_STATE)
                .with_attribute("Ket", GROUND_STATE)
                .with_attribute("Axis", axis.as_str())
                .with_child(Element::parameter(STRENGTH_PARAMETER, format_real(strength)));
            transitions.push(moment);
        }
        transitions
    }
}

fn set_user_attributes(element: &mut Element, values: &ParameterMap) -> PgopherResult<()> {
    for (name, value) in values.iter() {
        if !is_attribute_name(name) {
            return Err(PgopherError::invalid_input(format!(
                "'{name}' cannot be used as a {} attribute name",
                element.tag()
            )));
        }
        element.set_attribute(name, value.to_string());
    }
    Ok(())
}
