// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Renders runtime and speedup charts from benchmark result tables.
//!
//! A result table is a CSV file whose first column is the independent
//! variable (eg: number of workers) and whose second column is the measured
//! runtime. For each table two PNG charts are written: runtime against the
//! variable, and speedup relative to the first row against the variable.

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

mod config;
mod dataset;
mod error;
mod generator;
mod logger;

pub use crate::config::{Benchmark, Config, General, NAME, VERSION};
pub use crate::dataset::Dataset;
pub use crate::error::{ConfigError, Error};
pub use crate::generator::*;
pub use crate::logger::Logger;
