//! PGopher document tree, its builder and the XML writer.
//!
//! ```text
//! Mixture[Units,PlotUnits,IntensityUnits,PrintLevel]
//!   Parameter[Name,Value]*
//!   Species[..]
//!   {MolType}Molecule[..]
//!     {MolType}Manifold[Name=Ground,Initial=True]
//!       {MolType}Top|Linear[Name=v=0,(Symmetry=A)]
//!         Parameter[Name,Value]*
//!     TransitionMoments[Bra=Ground,Ket=Ground]
//!       CartesianTransitionMoment[Bra=v=0,Ket=v=0,Axis]*
//!         Parameter[Name=Strength,Value]
//! ```

mod builder;
mod model;
mod writer;

pub use builder::{DocumentBuilder, MIXTURE_DISPLAY_SETTINGS};
pub use model::{Element, NodeKind};
pub use writer::{XML_DECLARATION, write_document};
