// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use benchgraph::*;
use log::*;

fn main() {
    let config = Config::new();

    Logger::new()
        .label(NAME)
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    info!("{} {} initializing...", NAME, VERSION);

    config.print();

    let mut generator = ChartGenerator::new();
    generator.size(config.size());

    for benchmark in config.benchmarks() {
        if let Err(e) = generator.run(benchmark, config.output_dir()) {
            fatal!("benchmark {} failed: {}", benchmark.name(), e);
        }
    }

    info!("-----");
    info!("Done.");
}
