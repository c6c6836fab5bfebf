use crate::solver::LinearProgram;
use std::io::Write;
use std::{fs::File, io, io::Read};

impl LinearProgram {
    /// Write the problem to `file` as JSON.
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let mut json_data = self.clone();

        // sanitize bounds to remove values that
        // can't be serialized, i.e. infs
        sanitize_bounds(&mut json_data);

        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Read a problem previously written with [`write_to_file`](Self::write_to_file).
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let mut problem: LinearProgram = serde_json::from_str(&buffer)?;

        // restore sanitized bounds to their (likely) original values
        desanitize_bounds(&mut problem);

        problem
            .check_dimensions()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(problem)
    }
}

fn sanitize_bounds(problem: &mut LinearProgram) {
    for v in problem.lb.iter_mut().chain(problem.ub.iter_mut()).flatten() {
        if *v == f64::INFINITY {
            *v = f64::MAX;
        } else if *v == f64::NEG_INFINITY {
            *v = f64::MIN;
        }
    }
}

fn desanitize_bounds(problem: &mut LinearProgram) {
    for v in problem.lb.iter_mut().chain(problem.ub.iter_mut()).flatten() {
        if *v == f64::MAX {
            *v = f64::INFINITY;
        } else if *v == f64::MIN {
            *v = f64::NEG_INFINITY;
        }
    }
}

#[test]
fn test_json_io() {
    use std::io::{Seek, SeekFrom};

    let problem = LinearProgram::new(&[1., 2., 3.])
        .with_inequalities(&[[1., 2., -1.], [2., 0., 1.]], &[4., 1.])
        .with_equalities(&[1., 1., 1.], &[-1.])
        .with_bounds(&[-1., f64::NEG_INFINITY, 0.], &[f64::INFINITY, 1., 2.]);

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    problem.write_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let problem2 = LinearProgram::read_from_file(&mut file).unwrap();
    assert_eq!(problem, problem2);
    assert_eq!(problem2.upper_bounds()[0], f64::INFINITY);
    assert_eq!(problem2.lower_bounds()[1], f64::NEG_INFINITY);
}

#[test]
fn test_json_rejects_bad_dimensions() {
    use std::io::{Seek, SeekFrom};

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(br#"{"c":[1.0,2.0],"G":null,"h":null,"A":null,"b":null,"lb":[0.0],"ub":null}"#)
        .unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let err = LinearProgram::read_from_file(&mut file).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_json_rejects_malformed_matrix() {
    use std::io::{Seek, SeekFrom};

    // G claims 1 x 3 but carries two entries
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(
        br#"{"c":[1.0,2.0,3.0],"G":{"m":1,"n":3,"data":[1.0,2.0]},"h":[1.0],"A":null,"b":null,"lb":null,"ub":null}"#,
    )
    .unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let err = LinearProgram::read_from_file(&mut file).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
