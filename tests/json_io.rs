#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use lpsolvers::*;
    use std::io::{Seek, SeekFrom};

    let problem = LinearProgram::new(&[1., 2., 3.])
        .with_inequalities(
            &[[1., 2., -1.], [2., 0., 1.], [1., 2., 1.], [-1., -1., -1.]],
            &[4., 1., 3., 2.],
        )
        .with_upper_bounds(&[f64::INFINITY; 3]);

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    problem.write_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let problem2 = LinearProgram::read_from_file(&mut file).unwrap();
    assert_eq!(problem, problem2);

    for &solver in available_solvers() {
        let settings = SolverSettings::default();
        let x = solve_lp(&problem, solver, &settings).unwrap();
        let x2 = solve_lp(&problem2, solver, &settings).unwrap();
        assert_eq!(x, x2);
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_json_settings() {
    use lpsolvers::*;

    let settings = SolverSettingsBuilder::default()
        .sym_proj(true)
        .max_iter(20)
        .backend_option("presolve_enable", false)
        .backend_option("direct_solve_method", "qdldl")
        .build()
        .unwrap();

    let json = serde_json::to_string(&settings).unwrap();
    let settings2: SolverSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(settings.backend_options, settings2.backend_options);
    assert_eq!(settings2.max_iter, Some(20));
    assert!(settings2.sym_proj);
    assert_eq!(settings2.time_limit, f64::INFINITY);

    // missing fields take their defaults
    let settings3: SolverSettings = serde_json::from_str(r#"{"verbose": true}"#).unwrap();
    assert!(settings3.verbose);
    assert_eq!(settings3.max_iter, None);
}
