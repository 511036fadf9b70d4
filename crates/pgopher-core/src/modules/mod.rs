pub mod document;
pub mod molecule;
pub mod output;
pub mod parameters;
pub mod random;
pub mod runner;
pub mod serialization;
pub mod simulation;
pub mod workflow;

mod traits;

pub use traits::{ExternalRunner, OutputParser};
