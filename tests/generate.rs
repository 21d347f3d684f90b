// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use benchgraph::*;

use std::fs::File;
use std::path::{Path, PathBuf};

const SIZE: (u32, u32) = (320, 240);

fn generator() -> ChartGenerator {
    let mut generator = ChartGenerator::new();
    generator.size(SIZE);
    generator
}

fn titles() -> Titles {
    Titles {
        runtime: "OMP 4-man Checkmate Identification Runtime".to_string(),
        speedup: "OMP 4-man Checkmate Identification Speedup".to_string(),
    }
}

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// returns (width, height, rgb bytes)
fn decode(path: &Path) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(File::open(path).unwrap());
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info.width, info.height, buf)
}

#[test]
fn writes_both_charts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "checkmate_omp", "Workers,Time\n1,100\n2,50\n4,25\n");
    let outputs = Outputs::for_benchmark(dir.path(), "checkmate_omp");

    generator().generate(&input, &titles(), &outputs).unwrap();

    let (w, h, runtime) = decode(&outputs.runtime);
    assert_eq!((w, h), SIZE);
    let (w, h, speedup) = decode(&outputs.speedup);
    assert_eq!((w, h), SIZE);

    // different series and labels, so the images differ
    assert_ne!(runtime, speedup);
    assert!(runtime.iter().any(|b| *b != 255));
    assert!(speedup.iter().any(|b| *b != 255));
}

#[test]
fn chart_labels() {
    let dataset =
        Dataset::from_reader("bench.csv", &b"Workers,Time\n1,100\n2,50\n4,25\n"[..]).unwrap();
    assert_eq!(dataset.speedups().unwrap(), vec![1.0, 2.0, 4.0]);

    let plan = generator().plan(&dataset, &titles());
    assert_eq!(plan.runtime.get_y_desc(), "Time");
    assert_eq!(plan.speedup.get_y_desc(), "Speedup");
    assert_eq!(plan.speedup.get_x_desc(), "Workers");
    assert_eq!(plan.runtime.get_x_desc(), "Workers");
    assert_eq!(plan.runtime.get_caption(), titles().runtime);
    assert_eq!(plan.speedup.get_caption(), titles().speedup);
}

#[test]
fn header_only_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "empty.csv", "Workers,Time\n");
    let outputs = Outputs::for_benchmark(dir.path(), "empty");

    match generator().generate(&input, &titles(), &outputs) {
        Err(Error::EmptyDataset { path }) => assert_eq!(path, input),
        other => panic!("unexpected: {:?}", other),
    }
    assert!(!outputs.runtime.exists());
    assert!(!outputs.speedup.exists());
}

#[test]
fn zero_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "zero.csv", "Workers,Time\n1,100\n2,0\n");
    let outputs = Outputs::for_benchmark(dir.path(), "zero");

    assert!(matches!(
        generator().generate(&input, &titles(), &outputs),
        Err(Error::DivisionByZero { row: 1 })
    ));
    assert!(!outputs.runtime.exists());
    assert!(!outputs.speedup.exists());
}

#[test]
fn speedup_overflow_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "tiny.csv", "Workers,Time\n1,100\n2,1e-320\n");
    let outputs = Outputs::for_benchmark(dir.path(), "tiny");

    assert!(matches!(
        generator().generate(&input, &titles(), &outputs),
        Err(Error::SpeedupOverflow { row: 1 })
    ));
    assert!(!outputs.runtime.exists());
    assert!(!outputs.speedup.exists());
}

#[test]
fn huge_values_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("Workers,Time\n0,100\n1.7e308,50\n", true),
        ("Workers,Time\n-1e308,100\n1e308,50\n", true),
        // only the runtime axis is out of range
        ("Workers,Time\n1,1e308\n2,-1e308\n", false),
    ];

    for (i, (content, speedup_first)) in cases.iter().enumerate() {
        let input = write_input(dir.path(), &format!("huge_{}.csv", i), content);
        let outputs = Outputs::for_benchmark(dir.path(), &format!("huge_{}", i));

        match generator().generate(&input, &titles(), &outputs) {
            Err(Error::Render {
                path,
                source: linegraph::GraphError::AxisRange { .. },
            }) => {
                let failed = if *speedup_first {
                    &outputs.speedup
                } else {
                    &outputs.runtime
                };
                assert_eq!(&path, failed);
            }
            other => panic!("{}: unexpected {:?}", content, other),
        }
        assert!(!outputs.runtime.exists());
        assert!(!outputs.speedup.exists());
    }
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does_not_exist.csv");
    let outputs = Outputs::for_benchmark(dir.path(), "missing");

    assert!(matches!(
        generator().generate(&input, &titles(), &outputs),
        Err(Error::FileNotFound { .. })
    ));
    assert!(!outputs.runtime.exists());
    assert!(!outputs.speedup.exists());
}

#[test]
fn malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "single.csv", "Workers\n1\n2\n");
    let outputs = Outputs::for_benchmark(dir.path(), "single");

    assert!(matches!(
        generator().generate(&input, &titles(), &outputs),
        Err(Error::Parse { .. })
    ));
    assert!(!outputs.speedup.exists());
}

#[test]
fn second_run_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_input(dir.path(), "first.csv", "Workers,Time\n1,100\n2,50\n4,25\n8,20\n");
    let second = write_input(dir.path(), "second.csv", "Procs,Seconds\n1,9\n2,6\n3,3\n");

    let reused = tempfile::tempdir().unwrap();
    let outputs = Outputs::for_benchmark(reused.path(), "bench");
    generator().generate(&first, &titles(), &outputs).unwrap();
    generator().generate(&second, &titles(), &outputs).unwrap();

    let fresh = tempfile::tempdir().unwrap();
    let expected = Outputs::for_benchmark(fresh.path(), "bench");
    generator().generate(&second, &titles(), &expected).unwrap();

    assert_eq!(
        std::fs::read(&outputs.runtime).unwrap(),
        std::fs::read(&expected.runtime).unwrap()
    );
    assert_eq!(
        std::fs::read(&outputs.speedup).unwrap(),
        std::fs::read(&expected.speedup).unwrap()
    );
}

#[test]
fn runtime_chart_has_no_speedup_residue() {
    // with a shared canvas, leftovers of the speedup chart would make the
    // runtime chart differ from one rendered on its own
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "bench.csv", "Workers,Time\n1,100\n2,50\n4,25\n");
    let outputs = Outputs::for_benchmark(dir.path(), "bench");
    generator().generate(&input, &titles(), &outputs).unwrap();

    let dataset = Dataset::load(&input).unwrap();
    let plan = generator().plan(&dataset, &titles());
    let mut canvas = canvas::Canvas::new(SIZE.0, SIZE.1);
    plan.runtime.plot_line(&mut canvas, dataset.points()).unwrap();

    let (_, _, runtime) = decode(&outputs.runtime);
    assert_eq!(runtime, canvas.as_bytes());
}

#[test]
fn unwritable_output_keeps_first_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "bench.csv", "Workers,Time\n1,100\n2,50\n");
    let outputs = Outputs {
        runtime: dir.path().join("missing").join("bench_runtime.png"),
        speedup: dir.path().join("bench_speedup.png"),
    };

    match generator().generate(&input, &titles(), &outputs) {
        Err(Error::Write { path, .. }) => assert_eq!(path, outputs.runtime),
        other => panic!("unexpected: {:?}", other),
    }
    assert!(outputs.speedup.exists());
    assert!(!outputs.runtime.exists());
}

#[test]
fn run_benchmark() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "checkmate_mpi", "Nodes,Runtime\n1,40\n2,21\n4,11\n");
    let mut benchmark = Benchmark::new(
        "checkmate_mpi",
        &input,
        "MPI 4-man Checkmate Identification Runtime",
        "MPI 4-man Checkmate Identification Speedup",
    );
    benchmark.set_speedup_output(Some(PathBuf::from("mpi_speedup.png")));

    generator().run(&benchmark, dir.path()).unwrap();

    assert!(dir.path().join("checkmate_mpi_runtime.png").exists());
    assert!(dir.path().join("mpi_speedup.png").exists());
    assert!(!dir.path().join("checkmate_mpi_speedup.png").exists());
}
