#![allow(non_snake_case)]

use lpsolvers::*;

fn basic_lp() -> LinearProgram {
    LinearProgram::new(&[1., 2., 3.]).with_inequalities(
        &[[1., 2., -1.], [2., 0., 1.], [1., 2., 1.], [-1., -1., -1.]],
        &[4., 1., 3., 2.],
    )
}

#[test]
fn test_bad_settings_rejected() {
    let problem = basic_lp();
    let settings = SolverSettings {
        max_iter: Some(0),
        ..SolverSettings::default()
    };

    for &solver in available_solvers() {
        let err = solve_lp(&problem, solver, &settings).unwrap_err();
        assert_eq!(
            err,
            SolverError::Settings(SettingsError::BadFieldValue("max_iter"))
        );
    }
}

#[test]
fn test_generic_settings_accepted() {
    let problem = basic_lp();
    let settings = SolverSettingsBuilder::default()
        .verbose(false)
        .time_limit(60.)
        .build()
        .unwrap();

    for &solver in available_solvers() {
        let x = solve_lp(&problem, solver, &settings).unwrap();
        assert!(x.is_some(), "{solver}");
    }
}

#[cfg(feature = "clarabel")]
#[test]
fn test_clarabel_max_iter() {
    let problem = basic_lp();
    let settings = SolverSettingsBuilder::default()
        .max_iter(1)
        .build()
        .unwrap();

    let solution = solve_problem(&problem, "clarabel", &settings).unwrap();
    assert_eq!(solution.status, SolveStatus::MaxIterations);
    assert_eq!(solution.x, None);
    assert_eq!(solve_lp(&problem, "clarabel", &settings).unwrap(), None);
}

#[cfg(feature = "clarabel")]
#[test]
fn test_clarabel_backend_options() {
    let problem = basic_lp();
    let settings = SolverSettingsBuilder::default()
        .backend_option("equilibrate_enable", false)
        .backend_option("tol_gap_abs", 1e-9)
        .backend_option("max_iter", 100)
        .backend_option("direct_solve_method", "qdldl")
        .build()
        .unwrap();

    let x = solve_lp(&problem, "clarabel", &settings).unwrap().unwrap();
    assert!(problem.max_inequality_residual(&x) <= 1e-7);

    // the backend option takes precedence over the generic setting
    let settings = SolverSettingsBuilder::default()
        .max_iter(100)
        .backend_option("max_iter", 1)
        .build()
        .unwrap();
    let solution = solve_problem(&problem, "clarabel", &settings).unwrap();
    assert_eq!(solution.status, SolveStatus::MaxIterations);
}

#[cfg(feature = "clarabel")]
#[test]
fn test_clarabel_unsupported_option() {
    let problem = basic_lp();

    let settings = SolverSettingsBuilder::default()
        .backend_option("not_an_option", 1)
        .build()
        .unwrap();
    let err = solve_lp(&problem, "clarabel", &settings).unwrap_err();
    assert_eq!(
        err,
        SolverError::UnsupportedOption {
            solver: "clarabel",
            option: "not_an_option".to_string()
        }
    );

    // known option with a value of the wrong kind
    let settings = SolverSettingsBuilder::default()
        .backend_option("equilibrate_enable", "yes")
        .build()
        .unwrap();
    let err = solve_lp(&problem, "clarabel", &settings).unwrap_err();
    assert!(matches!(err, SolverError::UnsupportedOption { .. }));
}

#[cfg(feature = "microlp")]
#[test]
fn test_microlp_rejects_backend_options() {
    let problem = basic_lp();
    let settings = SolverSettingsBuilder::default()
        .backend_option("presolve", true)
        .build()
        .unwrap();

    let err = solve_lp(&problem, "microlp", &settings).unwrap_err();
    assert_eq!(
        err,
        SolverError::UnsupportedOption {
            solver: "microlp",
            option: "presolve".to_string()
        }
    );
}

#[cfg(feature = "microlp")]
#[test]
fn test_microlp_time_limit() {
    let problem = basic_lp();
    let settings = SolverSettingsBuilder::default()
        .time_limit(0.)
        .build()
        .unwrap();

    let solution = solve_problem(&problem, "microlp", &settings).unwrap();
    assert_eq!(solution.status, SolveStatus::MaxTime);
    assert_eq!(solution.x, None);
    assert_eq!(solve_lp(&problem, "microlp", &settings).unwrap(), None);
}
