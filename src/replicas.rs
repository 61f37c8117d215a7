use rayon::prelude::*;
use tracing::info_span;

use crate::joint::{JointPoint, SamplingUnit};
use crate::model::ParameterModel;
use crate::rng::ModelRng;

/// One independent sampling replica: a point and the stream that owns it.
#[derive(Debug, Clone)]
pub struct Replica<P: ParameterModel> {
    pub id: u64,
    pub point: JointPoint<P>,
    pub rng: ModelRng,
}

/// Generate `count` independent joint points in parallel.
///
/// Replica `i` draws from ChaCha stream `i` of `seed`, so the result is
/// the same for a given seed no matter how the work is scheduled.
pub fn generate_replicas<P>(template: &P, count: usize, seed: u64) -> Vec<Replica<P>>
where
    P: ParameterModel + Sync,
{
    let _span = info_span!("generate_replicas", count, seed).entered();
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let id = idx as u64;
            let mut rng = ModelRng::for_replica(seed, id);
            let mut point = JointPoint::new(template.clone());
            point.generate(&mut rng);
            Replica { id, point, rng }
        })
        .collect()
}
