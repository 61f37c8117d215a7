//! Generative parameter models for Metropolis and nested-sampling engines.
//!
//! A [`ParameterModel`] couples a prior over a few parameters with a
//! deterministic noise-free curve, a Gaussian likelihood and a Metropolis
//! proposal. A [`JointPoint`] pairs one model with data simulated from it
//! and is the unit an external sampler moves around.
//!
//! ```
//! use transit_info::{JointPoint, ModelRng, SamplingUnit, TransitModel};
//!
//! let mut rng = ModelRng::seed_from_u64(42);
//! let mut point = JointPoint::<TransitModel>::default();
//! point.generate(&mut rng);
//! let log_h = point.perturb(&mut rng);
//! assert!(log_h.is_finite());
//! ```

pub(crate) mod error;
pub(crate) mod grid;
pub(crate) mod joint;
pub(crate) mod mass;
pub(crate) mod math;
pub(crate) mod model;
pub(crate) mod replicas;
pub(crate) mod rng;
pub(crate) mod sinewave;
pub(crate) mod text;
pub(crate) mod transit;

pub use error::{ModelError, Result};
pub use grid::SampleGrid;
pub use joint::{JointPoint, SamplingUnit};
pub use mass::{MassConfig, MassModel, MassParams};
pub use math::{gaussian_log_likelihood, lognormal_step, normal_log_kernel, wrap};
pub use model::ParameterModel;
pub use replicas::{generate_replicas, Replica};
pub use rng::{ModelRng, RandomSource};
pub use sinewave::{
    SinewaveConfig, SinewaveModel, SinewaveParams, WindowSchedule, DEFAULT_WINDOW_SEED,
};
pub use text::render_values;
pub use transit::{TransitConfig, TransitModel, TransitParams};
