use std::io::Write;
use std::path::PathBuf;

use nalgebra::Point3;
use rocket_visualizer::trajectory::{load, LoadError};

fn write_trajectory(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_sample_file() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample_trajectory.txt");
    let records = load(&path).unwrap();

    assert_eq!(records.count(), 6);
    assert_eq!(records[0], Point3::new(600000.0, 0.0, 0.0));
    assert_eq!(records[5], Point3::new(723400.75, 29700.0, -8750.25));
    // Nothing in the sample is malformed
    assert!(records.iter().skip(1).all(|pt| *pt != Point3::origin()));
}

#[test]
fn test_three_records_in_order() {
    let file = write_trajectory("3\nV(1.0, 2.0, 3.0)\nV(-4.5, 0.0, 6.25)\nV(7.0, -8.0, 9.0)\n");
    let records = load(file.path()).unwrap();

    assert_eq!(
        records.records(),
        &[
            Point3::<f32>::new(1.0, 2.0, 3.0),
            Point3::new(-4.5, 0.0, 6.25),
            Point3::new(7.0, -8.0, 9.0),
        ]
    );
}

#[test]
fn test_declared_count_is_authoritative() {
    let file = write_trajectory("5\nV(1.0, 1.0, 1.0)\nV(2.0, 2.0, 2.0)\n");
    let records = load(file.path()).unwrap();

    assert_eq!(records.count(), 5);
    assert_eq!(records[0], Point3::new(1.0, 1.0, 1.0));
    assert_eq!(records[1], Point3::new(2.0, 2.0, 2.0));
    assert_eq!(&records.records()[2..], &[Point3::<f32>::origin(); 3]);

    let file = write_trajectory("2\nV(1.0, 1.0, 1.0)\nV(2.0, 2.0, 2.0)\nV(3.0, 3.0, 3.0)\n");
    assert_eq!(load(file.path()).unwrap().count(), 2);
}

#[test]
fn test_malformed_lines_degrade() {
    let file = write_trajectory("4\nV(1.0, 1.0, 1.0)\n(2.0, 2.0, 2.0)\n\nV(4.0, 4.0, 4.0)\n");
    let records = load(file.path()).unwrap();

    assert_eq!(records.count(), 4);
    assert_eq!(records[1], Point3::origin());
    assert_eq!(records[2], Point3::origin());
    assert_eq!(records[3], Point3::new(4.0, 4.0, 4.0));

    let file = write_trajectory("not a count\nV(1.0, 1.0, 1.0)\n");
    assert!(load(file.path()).unwrap().is_empty());
}

#[test]
fn test_annotated_file() {
    let file = write_trajectory(
        "2 records\nV(1.0, 2.0, 3.0) # liftoff\nV(4.0, 5.0, 6.0) # apogee\n",
    );
    let records = load(file.path()).unwrap();

    assert_eq!(
        records.records(),
        &[Point3::<f32>::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)]
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.txt");

    let err = load(&path).unwrap_err();
    assert!(matches!(err, LoadError::Open { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}
