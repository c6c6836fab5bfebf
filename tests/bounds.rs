#![allow(non_snake_case)]

use lpsolvers::{algebra::*, *};

#[test]
fn test_one_sided_bounds() {
    // minimize x1 + x2  s.t.  x >= (1, -2)
    let problem = LinearProgram::new(&[1., 1.]).with_lower_bounds(&[1., -2.]);

    for &solver in available_solvers() {
        let x = solve_lp(&problem, solver, &SolverSettings::default())
            .unwrap()
            .unwrap();
        assert!(x.dist(&[1., -2.]) <= 1e-5, "{solver}: {x:?}");
        assert!(problem.max_bound_violation(&x) <= 1e-7);
    }
}

#[test]
fn test_infinite_bounds() {
    // an infinite entry leaves that side of the variable free
    let problem = LinearProgram::new(&[-1., 1.])
        .with_bounds(&[f64::NEG_INFINITY, 0.5], &[2., f64::INFINITY]);

    for &solver in available_solvers() {
        let x = solve_lp(&problem, solver, &SolverSettings::default())
            .unwrap()
            .unwrap();
        assert!(x.dist(&[2., 0.5]) <= 1e-5, "{solver}: {x:?}");
    }

    // free in the direction of descent
    let problem = LinearProgram::new(&[1., 1.])
        .with_bounds(&[f64::NEG_INFINITY, 0.5], &[2., f64::INFINITY]);

    for &solver in available_solvers() {
        let x = solve_lp(&problem, solver, &SolverSettings::default()).unwrap();
        assert_eq!(x, None, "{solver}");
    }
}

#[test]
fn test_fixed_variable() {
    // lb == ub pins a variable
    let problem = LinearProgram::new(&[1., 2.])
        .with_inequalities(vec![-1., -1.], &[-3.])
        .with_bounds(&[0., 1.], &[10., 1.]);

    for &solver in available_solvers() {
        let x = solve_lp(&problem, solver, &SolverSettings::default())
            .unwrap()
            .unwrap();
        assert!(x.dist(&[2., 1.]) <= 1e-5, "{solver}: {x:?}");
    }
}

#[test]
fn test_crossed_bounds_infeasible() {
    let problem = LinearProgram::new(&[1., 1.]).with_bounds(&[1., 0.], &[0., 1.]);

    for &solver in available_solvers() {
        let x = solve_lp(&problem, solver, &SolverSettings::default()).unwrap();
        assert_eq!(x, None, "{solver}");
    }
}
