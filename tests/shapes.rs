#![allow(non_snake_case)]

use lpsolvers::{algebra::*, *};

// single inequality rows given as plain vectors must give the same
// answer as the equivalent 1 x n matrix

fn cost() -> Vec<f64> {
    vec![1., 2., 3.]
}

fn bounds() -> (Vec<f64>, Vec<f64>) {
    (vec![-1.; 3], vec![1.; 3])
}

#[test]
fn test_vector_promotion() {
    let g = vec![2., 0., 1.];
    let G = Matrix::from(&g);
    assert_eq!(G.size(), (1, 3));
    assert_eq!(G, Matrix::from(&[[2., 0., 1.]]));

    let c = cost();
    let (lb, ub) = bounds();
    let as_vector = LinearProgram::new(&c)
        .with_inequalities(g.clone(), &[1.])
        .with_bounds(&lb, &ub);
    let as_matrix = LinearProgram::new(&c)
        .with_inequalities(&[[2., 0., 1.]], &[1.])
        .with_bounds(&lb, &ub);
    assert_eq!(as_vector, as_matrix);

    for &solver in available_solvers() {
        let settings = SolverSettings::default();
        let x = solve_lp(&as_vector, solver, &settings).unwrap();
        let y = solve_lp(&as_matrix, solver, &settings).unwrap();
        assert_eq!(x.is_some(), y.is_some());
        if let (Some(x), Some(y)) = (x, y) {
            assert!(x.dist(&y) <= 1e-5, "{solver}");
        }
    }
}

#[test]
fn test_bounded_single_row() {
    // minimize -x1 + 2 x2 - 3 x3  s.t.  2 x1 + x3 <= 1,  -1 <= x <= 1
    let (lb, ub) = bounds();
    let problem = LinearProgram::new(&[-1., 2., -3.])
        .with_inequalities(vec![2., 0., 1.], &[1.])
        .with_bounds(&lb, &ub);

    let refsol = [0., -1., 1.];
    for &solver in available_solvers() {
        let x = solve_lp(&problem, solver, &SolverSettings::default())
            .unwrap()
            .unwrap();
        assert!(x.dist(&refsol) <= 1e-5, "{solver}: {x:?}");
        assert!(problem.is_feasible(&x, 1e-7));
    }
}

// every backend must agree with the first backend in the registry,
// including on which problems have no solution
#[test]
fn test_cross_solver_agreement() {
    let c = cost();
    let (lb, ub) = bounds();
    let G = [[1., 2., -1.], [2., 0., 1.], [1., 2., 1.], [-1., -1., -1.]];
    let h = [4., 1., 3., 2.];

    let mut problems = vec![
        LinearProgram::new(&c),
        LinearProgram::new(&c).with_bounds(&lb, &ub),
        LinearProgram::new(&c).with_inequalities(&G, &h),
        LinearProgram::new(&c)
            .with_inequalities(&G, &h)
            .with_bounds(&lb, &ub),
    ];
    for (row, &hi) in G.iter().zip(&h) {
        problems.push(LinearProgram::new(&c).with_inequalities(row, &[hi]));
        problems.push(
            LinearProgram::new(&c)
                .with_inequalities(row, &[hi])
                .with_bounds(&lb, &ub),
        );
    }

    let Some((&reference, others)) = available_solvers().split_first() else {
        return;
    };

    for problem in &problems {
        let settings = SolverSettings::default();
        let expected = solve_lp(problem, reference, &settings).unwrap();

        for &solver in others {
            let x = solve_lp(problem, solver, &settings).unwrap();
            match (&expected, &x) {
                (Some(expected), Some(x)) => {
                    assert!(x.dist(expected) <= 2e-4, "{solver}: {x:?} vs {expected:?}")
                }
                (None, None) => {}
                _ => panic!("{solver} disagrees with {reference} on {problem:?}"),
            }
        }
    }
}

#[test]
fn test_box_only() {
    let c = cost();
    let (lb, ub) = bounds();
    let problem = LinearProgram::new(&c).with_bounds(&lb, &ub);

    for &solver in available_solvers() {
        let x = solve_lp(&problem, solver, &SolverSettings::default())
            .unwrap()
            .unwrap();
        assert!(x.dist(&[-1., -1., -1.]) <= 1e-5, "{solver}: {x:?}");
    }
}
