// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::generator::{Outputs, Titles, DEFAULT_SIZE};
use crate::ConfigError;

use clap::{App, Arg};
use log::LevelFilter;
use serde_derive::*;

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

fn default_logging_level() -> LevelFilter {
    LevelFilter::Info
}

fn default_width() -> u32 {
    DEFAULT_SIZE.0
}

fn default_height() -> u32 {
    DEFAULT_SIZE.1
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "default_logging_level")]
    logging: LevelFilter,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
}

impl Default for General {
    fn default() -> Self {
        Self {
            logging: default_logging_level(),
            width: default_width(),
            height: default_height(),
            output_dir: default_output_dir(),
        }
    }
}

/// One result file and the titles and paths of the two charts drawn from it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Benchmark {
    name: String,
    input: PathBuf,
    runtime_title: String,
    speedup_title: String,
    runtime_output: Option<PathBuf>,
    speedup_output: Option<PathBuf>,
}

impl Benchmark {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<PathBuf>,
        runtime_title: impl Into<String>,
        speedup_title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            runtime_title: runtime_title.into(),
            speedup_title: speedup_title.into(),
            runtime_output: None,
            speedup_output: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn titles(&self) -> Titles {
        Titles {
            runtime: self.runtime_title.clone(),
            speedup: self.speedup_title.clone(),
        }
    }

    /// Output paths within `dir`. Explicit output paths are joined onto
    /// `dir` as well, so absolute ones are used unchanged.
    pub fn outputs<P: AsRef<Path>>(&self, dir: P) -> Outputs {
        let dir = dir.as_ref();
        let mut outputs = Outputs::for_benchmark(dir, &self.name);
        if let Some(ref runtime) = self.runtime_output {
            outputs.runtime = dir.join(runtime);
        }
        if let Some(ref speedup) = self.speedup_output {
            outputs.speedup = dir.join(speedup);
        }
        outputs
    }

    pub fn set_runtime_output(&mut self, path: Option<PathBuf>) {
        self.runtime_output = path;
    }

    pub fn set_speedup_output(&mut self, path: Option<PathBuf>) {
        self.speedup_output = path;
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    benchmark: Vec<Benchmark>,
}

impl Default for Config {
    fn default() -> Config {
        let omp = Benchmark::new(
            "checkmate_omp",
            "checkmate-identification/results/checkmate_omp",
            "OMP 4-man Checkmate Identification Runtime",
            "OMP 4-man Checkmate Identification Speedup",
        );
        let mpi = Benchmark::new(
            "checkmate_mpi",
            "checkmate-identification/results/checkmate_mpi",
            "MPI 4-man Checkmate Identification Runtime",
            "MPI 4-man Checkmate Identification Speedup",
        );
        Config {
            general: Default::default(),
            benchmark: vec![omp, mpi],
        }
    }
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Config {
        match Self::from_args(std::env::args_os()) {
            Ok(config) => config,
            Err(ConfigError::Args(e)) => e.exit(),
            Err(e) => {
                println!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    }

    fn app<'a, 'b>() -> App<'a, 'b> {
        App::new(NAME)
            .version(VERSION)
            .author("Brian Martin <bmartin@twitter.com>")
            .about("Runtime and speedup charts for benchmark results")
            .arg(
                Arg::with_name("config")
                    .long("config")
                    .value_name("FILE")
                    .help("TOML config file")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("benchmark")
                    .long("benchmark")
                    .value_name("NAME")
                    .help("Only chart the named benchmark. Can be used more than once")
                    .multiple(true)
                    .number_of_values(1)
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("output-dir")
                    .long("output-dir")
                    .value_name("DIR")
                    .help("Directory the charts are written to")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .long("verbose")
                    .help("Increase verbosity by one level. Can be used more than once")
                    .multiple(true),
            )
    }

    /// Build the config from command line arguments. The first item is the
    /// program name.
    pub fn from_args<I, T>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::app().get_matches_from_safe(args)?;

        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(file)?
        } else {
            println!("NOTE: using builtin base configuration");
            Default::default()
        };

        if let Some(dir) = matches.value_of("output-dir") {
            config.general.output_dir = PathBuf::from(dir);
        }

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => config.general.logging = LevelFilter::Debug,
            _ => config.general.logging = LevelFilter::Trace,
        }

        if let Some(names) = matches.values_of("benchmark") {
            let names: Vec<&str> = names.collect();
            config.select(&names)?;
        }

        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.general.width == 0 || self.general.height == 0 {
            return Err(ConfigError::ZeroSize {
                width: self.general.width,
                height: self.general.height,
            });
        }
        if self.benchmark.is_empty() {
            return Err(ConfigError::NoBenchmarks);
        }
        let mut names = HashSet::new();
        for benchmark in &self.benchmark {
            if benchmark.name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !names.insert(benchmark.name.as_str()) {
                return Err(ConfigError::DuplicateBenchmark(benchmark.name.clone()));
            }
        }
        Ok(())
    }

    /// Keep only the named benchmarks, in config order.
    pub fn select(&mut self, names: &[&str]) -> Result<(), ConfigError> {
        for name in names {
            if !self.benchmark.iter().any(|b| b.name == *name) {
                return Err(ConfigError::UnknownBenchmark(name.to_string()));
            }
        }
        self.benchmark.retain(|b| names.contains(&b.name.as_str()));
        Ok(())
    }

    pub fn logging(&self) -> LevelFilter {
        self.general.logging
    }

    pub fn size(&self) -> (u32, u32) {
        (self.general.width, self.general.height)
    }

    pub fn output_dir(&self) -> &Path {
        &self.general.output_dir
    }

    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmark
    }

    pub fn print(&self) {
        info!("-----");
        info!("Config:");
        info!("Config: Logging: {}", self.logging());
        info!(
            "Config: Size: {}x{} px",
            self.general.width, self.general.height
        );
        info!("Config: Output Dir: {}", self.output_dir().display());
        for benchmark in &self.benchmark {
            info!(
                "Config: Benchmark: {} Input: {}",
                benchmark.name(),
                benchmark.input().display()
            );
        }
    }
}
