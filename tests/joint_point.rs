use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use proptest::prelude::*;
use transit_info::{
    generate_replicas, JointPoint, MassConfig, MassModel, MassParams, ModelRng, ParameterModel,
    RandomSource, SampleGrid, SamplingUnit, SinewaveModel, TransitConfig, TransitModel,
    TransitParams,
};

/// Run a Metropolis chain, keeping the cache honest across accepts and rejects.
fn check_no_drift<P: ParameterModel + Default>(seed: u64, steps: usize) {
    let mut rng = ModelRng::seed_from_u64(seed);
    let mut point = JointPoint::<P>::default();
    point.generate(&mut rng);
    let data = point.data().expect("generated").to_vec();

    for _ in 0..steps {
        let backup = point.clone();
        let log_h = point.perturb(&mut rng);
        if !(rng.uniform().ln() < log_h) {
            point = backup;
        }
        let fresh = point.params().log_likelihood(&data);
        assert_eq!(point.log_likelihood(), fresh);
        assert_eq!(point.data(), Some(data.as_slice()));
    }
}

#[test]
fn transit_cache_never_drifts() {
    check_no_drift::<TransitModel>(42, 2000);
}

#[test]
fn sinewave_cache_never_drifts() {
    check_no_drift::<SinewaveModel>(43, 2000);
}

#[test]
fn mass_cache_never_drifts() {
    check_no_drift::<MassModel>(44, 500);
}

#[test]
fn simulated_noise_round_trip() {
    let params = TransitParams {
        center: 0.5,
        depth: 0.02,
        width: 0.1,
        noise_sd: 0.01,
    };
    let model = TransitModel::with_params(TransitConfig::default(), params);

    let data = model.simulate_data(&mut ModelRng::seed_from_u64(99));
    let mut replay = ModelRng::seed_from_u64(99);
    let noise: Vec<f64> = (0..data.len()).map(|_| replay.standard_normal()).collect();

    let n = data.len() as f64;
    let var = params.noise_sd * params.noise_sd;
    let expected =
        -0.5 * n * (2.0 * PI * var).ln() - 0.5 * noise.iter().map(|e| e * e).sum::<f64>();
    assert_relative_eq!(model.log_likelihood(&data), expected, max_relative = 1e-10);
}

#[test]
fn single_sample_likelihood() {
    let config = TransitConfig::new(SampleGrid::new(1, 0.0, 1.0).unwrap(), 0.1, 0.01, 1.0).unwrap();
    let params = TransitParams {
        center: 0.0,
        depth: 0.3,
        width: 0.2,
        noise_sd: 0.05,
    };
    let model = TransitModel::with_params(config, params);
    assert_eq!(model.curve(), &[-0.3]);
    let var = 0.05 * 0.05;
    assert_eq!(model.log_likelihood(&[-0.3]), -0.5 * (2.0 * PI * var).ln());
}

#[test]
fn mass_profile_scenario() {
    let model = MassModel::with_params(
        MassConfig::default(),
        MassParams {
            center: 0.5,
            amplitude: 10.0,
            width: 0.05,
        },
    );
    let grid = *model.config().grid();
    let tail = 10.0 * (-4.5f64).exp();
    for (x, &mu) in grid.coordinates().zip(model.curve()) {
        if (x - 0.5).abs() >= 0.15 {
            assert!(mu <= tail + 1e-9, "x = {x}, mu = {mu}");
        }
    }
    assert_relative_eq!(model.curve()[500], 10.0, max_relative = 1e-12);
}

#[test]
fn printed_line_layout() {
    let mut point = JointPoint::<SinewaveModel>::default();
    point.generate(&mut ModelRng::seed_from_u64(5));
    let mut out = Vec::new();
    point.print(&mut out).unwrap();
    let line = String::from_utf8(out).unwrap();

    let fields: Vec<f64> = line
        .split(' ')
        .map(|f| f.parse().expect("plain decimal"))
        .collect();
    assert_eq!(fields.len(), 3 + 21);
    assert_eq!(&fields[..3], point.params().parameters().as_slice());
    assert_eq!(&fields[3..], point.data().unwrap());
}

#[test]
fn replicas_match_sequential_generation() {
    let replicas = generate_replicas(&TransitModel::default(), 3, 7);
    for replica in &replicas {
        let mut point = JointPoint::<TransitModel>::default();
        point.generate(&mut ModelRng::for_replica(7, replica.id));
        assert_eq!(point.render(), replica.point.render());
        assert_abs_diff_eq!(point.log_likelihood(), replica.point.log_likelihood());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn distances_are_symmetric(seed_a in any::<u64>(), seed_b in any::<u64>()) {
        fn check<P: ParameterModel + Default>(seed_a: u64, seed_b: u64) -> Result<(), TestCaseError> {
            let mut a = JointPoint::<P>::default();
            let mut b = JointPoint::<P>::default();
            a.generate(&mut ModelRng::seed_from_u64(seed_a));
            b.generate(&mut ModelRng::seed_from_u64(seed_b));
            let ab = JointPoint::parameter_distance(&a, &b);
            prop_assert_eq!(ab, JointPoint::parameter_distance(&b, &a));
            prop_assert!(ab >= 0.0);
            prop_assert_eq!(JointPoint::parameter_distance(&a, &a), 0.0);
            Ok(())
        }
        check::<TransitModel>(seed_a, seed_b)?;
        check::<SinewaveModel>(seed_a, seed_b)?;
        check::<MassModel>(seed_a, seed_b)?;
    }
}
