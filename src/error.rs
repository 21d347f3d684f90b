// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use linegraph::GraphError;
use thiserror::Error;

use std::path::PathBuf;

/// Failures while turning one benchmark result file into its two charts.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read input {}: {source}", .path.display())]
    FileNotFound {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed input {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("input {} has no data rows", .path.display())]
    EmptyDataset { path: PathBuf },
    #[error("runtime in data row {row} is zero")]
    DivisionByZero { row: usize },
    #[error("speedup of data row {row} is not a finite number")]
    SpeedupOverflow { row: usize },
    #[error("cannot write chart {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: canvas::EncodingError,
    },
    #[error("cannot render chart {}: {source}", .path.display())]
    Render { path: PathBuf, source: GraphError },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Args(#[from] clap::Error),
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no benchmarks configured")]
    NoBenchmarks,
    #[error("benchmark name must not be empty")]
    EmptyName,
    #[error("duplicate benchmark: {0}")]
    DuplicateBenchmark(String),
    #[error("unknown benchmark: {0}")]
    UnknownBenchmark(String),
    #[error("image size must be non-zero, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
}
