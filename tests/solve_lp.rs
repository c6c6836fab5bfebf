#![allow(non_snake_case)]

use lpsolvers::{algebra::*, *};

// minimize x1 + 2 x2 + 3 x3  s.t.  G x <= h
fn basic_lp_data() -> (Vec<f64>, Vec<Vec<f64>>, Vec<f64>) {
    let c = vec![1., 2., 3.];
    let G = vec![
        vec![1., 2., -1.],
        vec![2., 0., 1.],
        vec![1., 2., 1.],
        vec![-1., -1., -1.],
    ];
    let h = vec![4., 1., 3., 2.];
    (c, G, h)
}

// accuracy expected of each backend at the returned point
fn solution_tol(solver: &str) -> f64 {
    match solver {
        "clarabel" => 1e-5,
        _ => 1e-7,
    }
}

fn feasibility_tol(solver: &str) -> f64 {
    match solver {
        "clarabel" => 1e-7,
        _ => 1e-9,
    }
}

#[test]
fn test_lp_all_solvers() {
    let (c, G, h) = basic_lp_data();
    let problem = LinearProgram::new(&c).with_inequalities(G, &h);

    let refsol = [2.2, -0.8, -3.4];
    let refobj = -9.6;

    for &solver in available_solvers() {
        let settings = SolverSettings::default();
        let x = solve_lp(&problem, solver, &settings)
            .unwrap()
            .unwrap_or_else(|| panic!("{solver} found no solution"));

        assert_eq!(x.len(), c.len());
        assert!(x.dist(&refsol) <= solution_tol(solver), "{solver}: {x:?}");
        assert!(problem.max_inequality_residual(&x) <= feasibility_tol(solver));
        assert!(f64::abs(problem.objective(&x) - refobj) <= solution_tol(solver));
    }
}

#[test]
fn test_lp_sym_proj() {
    let (c, G, h) = basic_lp_data();
    let problem = LinearProgram::new(&c).with_inequalities(G, &h);

    for &solver in available_solvers() {
        let plain = solve_lp(&problem, solver, &SolverSettings::default())
            .unwrap()
            .unwrap();

        let settings = SolverSettingsBuilder::default()
            .sym_proj(true)
            .build()
            .unwrap();
        let projected = solve_lp(&problem, solver, &settings).unwrap().unwrap();

        assert!(plain.dist(&projected) <= solution_tol(solver));
        assert!(problem.max_inequality_residual(&projected) <= feasibility_tol(solver));
    }
}

#[test]
fn test_lp_solution_report() {
    let (c, G, h) = basic_lp_data();
    let problem = LinearProgram::new(&c).with_inequalities(G, &h);

    for &solver in available_solvers() {
        let solution = solve_problem(&problem, solver, &SolverSettings::default()).unwrap();

        assert_eq!(solution.status, SolveStatus::Optimal);
        assert_eq!(solution.solver, solver);
        assert!(solution.solve_time >= 0.);

        let x = solution.x.as_ref().unwrap();
        let obj_val = solution.obj_val.unwrap();
        assert!(f64::abs(obj_val - problem.objective(x)) <= 1e-12);
    }
}

#[test]
fn test_lp_primal_infeasible() {
    // x1 <= -1 and x1 >= 1
    let problem =
        LinearProgram::new(&[1., 1.]).with_inequalities(&[[1., 0.], [-1., 0.]], &[-1., -1.]);

    for &solver in available_solvers() {
        let solution = solve_problem(&problem, solver, &SolverSettings::default()).unwrap();
        assert!(solution.x.is_none(), "{solver}");
        assert!(!solution.status.is_optimal());

        let x = solve_lp(&problem, solver, &SolverSettings::default()).unwrap();
        assert_eq!(x, None);
    }
}

#[test]
fn test_lp_unbounded() {
    let (c, _G, _h) = basic_lp_data();
    let problem = LinearProgram::new(&c);

    for &solver in available_solvers() {
        let x = solve_lp(&problem, solver, &SolverSettings::default()).unwrap();
        assert_eq!(x, None, "{solver}");
    }
}

#[test]
fn test_lp_default_solver() {
    let (c, G, h) = basic_lp_data();
    let problem = LinearProgram::new(&c).with_inequalities(G, &h);

    match available_solvers().first() {
        Some(&first) => {
            let x = solve_lp_default(&problem).unwrap().unwrap();
            let y = solve_lp(&problem, first, &SolverSettings::default())
                .unwrap()
                .unwrap();
            assert_eq!(x, y);
        }
        None => {
            assert_eq!(
                solve_lp_default(&problem).unwrap_err(),
                SolverError::NoSolverAvailable
            );
        }
    }
}
