//! Random asymmetric-top molecules for demos and test scenarios.

use crate::domain::{Axis, MolType, ParameterMap, PgopherError, PgopherResult};
use crate::modules::molecule::{MoleculeConfig, TransitionMoments};
use rand::Rng;
use tracing::debug;

pub const DISTORTION_UPPER_BOUNDS: [(&str, f64); 5] = [
    ("DJ", 1e-2),
    ("DJK", 1e-2),
    ("DK", 2.0),
    ("deltaJ", 1e-2),
    ("deltaK", 1e-2),
];

#[derive(Debug, Clone, PartialEq)]
pub struct RandomOptions {
    pub constant_min: f64,
    pub constant_max: f64,
    /// Also draw quartic centrifugal distortion terms.
    pub distortion: bool,
    pub mixture: Option<ParameterMap>,
    pub species: Option<ParameterMap>,
    pub settings: Option<ParameterMap>,
    /// Laid over the drawn rotational constants.
    pub parameters: Option<ParameterMap>,
    /// Laid over the drawn single-axis dipole.
    pub trans_mom: Option<ParameterMap>,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            constant_min: 1000.0,
            constant_max: 30000.0,
            distortion: false,
            mixture: None,
            species: None,
            settings: None,
            parameters: None,
            trans_mom: None,
        }
    }
}

/// Draw an asymmetric top with `A >= B >= C` and a unit dipole along one
/// randomly chosen axis.
pub fn random_molecule<R>(rng: &mut R, options: &RandomOptions) -> PgopherResult<MoleculeConfig>
where
    R: Rng,
{
    if !(options.constant_min.is_finite()
        && options.constant_max.is_finite()
        && options.constant_min < options.constant_max)
    {
        return Err(PgopherError::invalid_input(format!(
            "rotational constant range [{}, {}) is empty",
            options.constant_min, options.constant_max
        )));
    }

    let mut constants: [f64; 3] =
        std::array::from_fn(|_| rng.gen_range(options.constant_min..options.constant_max));
    constants.sort_by(f64::total_cmp);
    let mut parameters: ParameterMap = ["C", "B", "A"].into_iter().zip(constants).collect();

    let axis = Axis::ALL[rng.gen_range(0..Axis::ALL.len())];
    let mut trans_mom = TransitionMoments::new(0.0, 0.0, 0.0);
    trans_mom.set(axis, 1.0);

    if options.distortion {
        for (name, upper) in DISTORTION_UPPER_BOUNDS {
            parameters.insert(name, rng.gen_range(0.0..upper));
        }
    }

    if let Some(overrides) = &options.trans_mom {
        let mut merged = ParameterMap::new()
            .with("a", trans_mom.a)
            .with("b", trans_mom.b)
            .with("c", trans_mom.c);
        merged.extend(overrides.clone());
        trans_mom = TransitionMoments::from_overrides(&merged)?;
    }
    if let Some(overrides) = &options.parameters {
        parameters.extend(overrides.clone());
    }

    debug!(axis = axis.as_str(), distortion = options.distortion, "drew random asymmetric top");
    Ok(MoleculeConfig::with_type(
        MolType::Asymmetric,
        options.settings.clone(),
        Some(parameters),
        trans_mom,
    ))
}
