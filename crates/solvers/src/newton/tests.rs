use approx::assert_relative_eq;

use rootline_core::Options;

use crate::{
    Action, Details, Error, ErrorKind, Record, Status,
    limits::DIVERGENCE_LIMIT,
    test_utils::{CUBIC_ROOT, Formulas, cubic, cubic_prime},
};

use super::{Step, solve, solve_unobserved};

fn formulas() -> Formulas {
    Formulas::new()
        .with("x^2 - 2", |x| x * x - 2.0)
        .with("2*x", |x| 2.0 * x)
        .with_derivative("x^2 - 2", "2*x")
        .with("cubic", cubic)
        .with("cubic'", cubic_prime)
        .with_derivative("cubic", "cubic'")
        .with("atan", f64::atan)
        .with("atan'", |x| 1.0 / (1.0 + x * x))
        .with_derivative("atan", "atan'")
        .with("cbrt", f64::cbrt)
        .with("cbrt'", |x| 1.0 / (3.0 * x.cbrt().powi(2)))
        .with_derivative("cbrt", "cbrt'")
        .with("sqrt", f64::sqrt)
        .with("sqrt'", |x| 0.5 / x.sqrt())
        .with_derivative("sqrt", "sqrt'")
}

#[test]
fn converges_quadratically_to_sqrt_two() {
    let options = Options::new(1e-10, 20).expect("valid options");
    let solution = solve_unobserved(&formulas(), "x^2 - 2", 1.0, &options).expect("should solve");

    assert!(solution.converged());
    assert!(solution.iterations.len() < 10);
    assert_relative_eq!(solution.root(), 2.0_f64.sqrt(), epsilon = 1e-12);

    let first = solution.iterations[0];
    assert_relative_eq!(first.x, 1.0);
    assert_relative_eq!(first.fx, -1.0);
    assert_relative_eq!(first.dfx, 2.0);
    assert_relative_eq!(first.x_next, 1.5);
    assert_relative_eq!(first.error, 1.0);
    assert_relative_eq!(first.diff, 0.5);
}

#[test]
fn each_step_starts_where_the_last_one_ended() {
    let solution =
        solve_unobserved(&formulas(), "cubic", 2.0, &Options::default()).expect("should solve");

    assert_relative_eq!(solution.root(), CUBIC_ROOT, epsilon = 1e-9);
    for pair in solution.iterations.windows(2) {
        assert_relative_eq!(pair[1].x, pair[0].x_next);
        assert_eq!(pair[1].iter, pair[0].iter + 1);
    }
}

#[test]
fn summary_carries_the_derivative() {
    let solution =
        solve_unobserved(&formulas(), "x^2 - 2", 1.0, &Options::default()).expect("should solve");

    assert_eq!(
        solution.summary.details,
        Details::Newton {
            initial_guess: 1.0,
            derivative: "2*x".to_string(),
        }
    );
    assert_eq!(solution.summary.plot_range, [-4.0, 6.0]);
}

#[test]
fn zero_derivative_at_the_start() {
    let err = solve_unobserved(&formulas(), "x^2 - 2", 0.0, &Options::default())
        .expect_err("flat tangent");

    assert_eq!(err.kind(), ErrorKind::ZeroDerivative);
    assert!(matches!(err, Error::ZeroDerivative { derivative, .. } if derivative.abs() < 1e-12));
    assert!(err.iterations().is_empty());
}

#[test]
fn missing_derivative_is_an_error() {
    let formulas = Formulas::new().with("x^2 - 2", |x| x * x - 2.0);
    let result = solve_unobserved(&formulas, "x^2 - 2", 1.0, &Options::default());

    assert!(matches!(result, Err(Error::Derivative(_))));
}

#[test]
fn flattening_tangent_keeps_the_history() {
    // Newton on atan overshoots further each step from |x0| > 1.39, until
    // f'(x) = 1/(1 + x^2) drops below the zero threshold.
    let err = solve_unobserved(&formulas(), "atan", 1.5, &Options::default())
        .expect_err("tangent flattens out");

    assert_eq!(err.kind(), ErrorKind::ZeroDerivative);
    assert!(matches!(err, Error::ZeroDerivative { x, .. } if x.abs() > 1e6));

    let iterations = err.into_iterations();
    assert_eq!(iterations.len(), 6);
    assert_relative_eq!(iterations[0].x_next, -1.694_079_600_6, epsilon = 1e-9);
    assert!(iterations.last().is_some_and(|step| step.x_next.abs() < DIVERGENCE_LIMIT));
}

#[test]
fn divergence_keeps_the_history() {
    // For cbrt, x - f/f' = -2x: the iterate doubles in size every step.
    let err = solve_unobserved(&formulas(), "cbrt", 1.0, &Options::default())
        .expect_err("should diverge");

    assert!(matches!(err, Error::DivergenceDetected { x, .. } if x.abs() > DIVERGENCE_LIMIT));

    // 2^33 < 1e10 < 2^34
    let iterations = err.into_iterations();
    assert_eq!(iterations.len(), 34);
    for step in &iterations {
        assert_relative_eq!(step.x_next, -2.0 * step.x, max_relative = 1e-9);
    }
}

#[test]
fn leaving_the_domain_is_not_finite() {
    let solution =
        solve_unobserved(&formulas(), "sqrt", -1.0, &Options::default()).expect("no error");

    assert_eq!(solution.status(), Status::NonFinite);
    assert!(solution.iterations.is_empty());
    assert_relative_eq!(solution.root(), -1.0);
}

#[test]
fn stops_at_max_iter() {
    let options = Options::new(1e-15, 2).expect("valid options");
    let solution = solve_unobserved(&formulas(), "x^2 - 2", 1.0, &options).expect("should run");

    assert_eq!(solution.status(), Status::MaxIters);
    assert_eq!(solution.iterations.len(), 2);
    assert_relative_eq!(solution.root(), 17.0 / 12.0);
}

#[test]
fn observer_can_stop_early() {
    let mut seen = 0;
    let observer = |_: &Step| {
        seen += 1;
        Some(Action::StopEarly)
    };

    let solution =
        solve(&formulas(), "x^2 - 2", 1.0, &Options::default(), observer).expect("should run");

    assert_eq!(seen, 1);
    assert_eq!(solution.status(), Status::StoppedByObserver);
    assert_relative_eq!(solution.root(), 1.5);
}

#[test]
fn fields_follow_the_step_layout() {
    let solution =
        solve_unobserved(&formulas(), "x^2 - 2", 1.0, &Options::default()).expect("should solve");

    let fields = solution.iterations[0].fields();
    let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["iter", "x", "fx", "dfx", "xNext", "error", "diff"]);
    assert_relative_eq!(fields[4].1, 1.5);
}
