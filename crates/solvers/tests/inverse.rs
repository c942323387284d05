use approx::assert_relative_eq;
use fxinv_solvers::{
    Config, Inverse, Outcome,
    batch::{DEFAULT_LANES, Workspace},
    newton::{Error, Status},
};
use proptest::prelude::*;

fn squares(xs: &[f32], out: &mut [f32]) {
    for (y, x) in out.iter_mut().zip(xs) {
        *y = x * x;
    }
}

#[test]
fn square_root_of_pi_is_within_step() {
    let h = 0.01_f32;
    let sqrt = Inverse::new(|x: f32| x * x, Config::with_step(h).unwrap());

    let solution = sqrt.solve(3.1415).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 1.772_240, epsilon = h);
}

#[test]
fn remainder_goes_through_scalar_path() {
    let h = 0.01_f32;
    let sqrt = Inverse::batched(squares, Config::with_step(h).unwrap());
    let inputs: Vec<f32> = (1..=70u8).map(f32::from).collect();
    let mut outputs = vec![0.0; inputs.len()];

    let report = sqrt.solve_into(&inputs, &mut outputs).unwrap();

    assert_eq!(report.groups(), 1);
    assert_eq!(report.lanes(), DEFAULT_LANES);
    assert_eq!(report.tail(), 6);
    assert!((0..64).all(|i| report.is_vectorized(i)));
    assert!((64..70).all(|i| !report.is_vectorized(i)));
    assert!(report.all_converged());

    for (&y, &x) in inputs.iter().zip(&outputs) {
        assert_relative_eq!(x, y.sqrt(), epsilon = h);
    }
}

#[test]
fn batch_matches_scalar_for_every_element() {
    let config = Config::with_step(1e-3_f32).unwrap();
    let sqrt = Inverse::batched(squares, config);
    let inputs: Vec<f32> = (0..1_000u16).map(|i| f32::from(i) * 0.37 + 0.5).collect();
    let mut outputs = vec![0.0; inputs.len()];

    sqrt.solve_into(&inputs, &mut outputs).unwrap();

    for (&y, &x) in inputs.iter().zip(&outputs) {
        assert_eq!(sqrt.solve(y).unwrap().x, x, "y = {y}");
    }
}

#[test]
fn smaller_step_trades_iterations_for_accuracy() {
    let y = 3.1415_f64;
    let exact = y.sqrt();
    let sqrt = Inverse::new(|x: f64| x * x, Config::with_step(0.01).unwrap());

    let coarse = sqrt.solve(y).unwrap();
    let fine = sqrt.solve_with(y, &Config::with_step(0.000_01).unwrap()).unwrap();

    assert!((fine.x - exact).abs() < (coarse.x - exact).abs());
    assert!(fine.iters > coarse.iters);
}

#[test]
fn zero_target_is_an_explicit_failure() {
    let sqrt = Inverse::new(|x: f64| x * x, Config::with_step(0.01).unwrap());

    assert!(matches!(sqrt.solve(0.0), Err(Error::NonFiniteStep { .. })));

    let inputs = vec![0.0; DEFAULT_LANES + 1];
    let mut outputs = vec![1.0; inputs.len()];
    let report = sqrt.solve_into(&inputs, &mut outputs).unwrap();

    assert_eq!(report.count(Outcome::NonFinite), inputs.len());
    assert!(outputs.iter().all(|x| x.is_nan()));
}

#[test]
fn iteration_cap_is_reported_per_element() {
    let config = Config::with_step(0.01).unwrap().with_max_iters(2);
    let sqrt = Inverse::new(|x: f64| x * x, config);
    let inputs = [1.0, 4.0e6, 1.0, 9.0e8, 1.0];
    let mut outputs = [0.0; 5];
    let mut workspace = Workspace::<f64, 2>::new();

    let report = sqrt
        .solve_into_with(&inputs, &mut outputs, &mut workspace)
        .unwrap();

    // Lanes that finish early keep their own outcome inside a capped group.
    assert_eq!(
        report.outcomes(),
        &[
            Outcome::Converged,
            Outcome::MaxIters,
            Outcome::Converged,
            Outcome::MaxIters,
            Outcome::Converged,
        ]
    );
    assert_eq!(report.failures().count(), 2);
    assert_eq!(outputs[0], 1.0);
    assert!(outputs[1] > 2_000.0);
}

proptest! {
    #[test]
    fn recovers_inputs_of_increasing_function(x in 0.1_f64..50.0) {
        let h = 1e-6;
        let cube = Inverse::new(|x: f64| x * x * x + x, Config::with_step(h).unwrap());

        let solution = cube.solve(x * x * x + x).unwrap();

        prop_assert_eq!(solution.status, Status::Converged);
        prop_assert!((solution.x - x).abs() <= h);
    }

    #[test]
    fn lane_width_does_not_change_results(
        inputs in prop::collection::vec(0.5_f64..1.0e4, 0..200),
    ) {
        let sqrt = Inverse::new(|x: f64| x * x, Config::with_step(1e-4).unwrap());
        let mut wide = vec![0.0; inputs.len()];
        let mut narrow = vec![0.0; inputs.len()];
        let mut workspace = Workspace::<f64, 3>::new();

        sqrt.solve_into(&inputs, &mut wide).unwrap();
        sqrt.solve_into_with(&inputs, &mut narrow, &mut workspace).unwrap();

        prop_assert_eq!(wide, narrow);
    }
}
