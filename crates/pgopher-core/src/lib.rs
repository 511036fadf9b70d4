//! Drive the PGopher rotational spectrum simulator.
//!
//! A [`Simulation`] pairs mixture settings with a molecule description,
//! renders the XML document PGopher reads, runs the `pgo` executable for
//! the line list and the partition function, and parses both tables out
//! of the captured console output.

pub mod domain;
pub mod modules;

pub use domain::{MolType, ParamValue, ParameterMap, PgopherError, PgopherResult};
pub use modules::molecule::{MoleculeConfig, TransitionMoments};
pub use modules::output::Table;
pub use modules::runner::{ProcessRunner, RunnerConfig};
pub use modules::simulation::SimulationConfig;
pub use modules::workflow::{Simulation, SimulationOutput};
