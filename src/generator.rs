// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::Benchmark;
use crate::{Dataset, Error};

use canvas::Canvas;
use linegraph::PlotConfig;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use std::path::{Path, PathBuf};

/// y-axis description of every speedup chart
pub const SPEEDUP_LABEL: &str = "Speedup";

/// Default chart size in pixels.
pub const DEFAULT_SIZE: (u32, u32) = (640, 480);

/// The charts produced for a dataset, in the order they are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ChartKind {
    Speedup,
    Runtime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Titles {
    pub runtime: String,
    pub speedup: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outputs {
    pub runtime: PathBuf,
    pub speedup: PathBuf,
}

impl Outputs {
    /// `<name>_runtime.png` and `<name>_speedup.png` within `dir`
    pub fn for_benchmark<P: AsRef<Path>>(dir: P, name: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            runtime: dir.join(format!("{}_{}.png", name, ChartKind::Runtime)),
            speedup: dir.join(format!("{}_{}.png", name, ChartKind::Speedup)),
        }
    }

    pub fn path(&self, kind: ChartKind) -> &Path {
        match kind {
            ChartKind::Runtime => &self.runtime,
            ChartKind::Speedup => &self.speedup,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartPlan {
    pub speedup: PlotConfig,
    pub runtime: PlotConfig,
}

impl ChartPlan {
    pub fn chart(&self, kind: ChartKind) -> &PlotConfig {
        match kind {
            ChartKind::Runtime => &self.runtime,
            ChartKind::Speedup => &self.speedup,
        }
    }
}

/// Renders the runtime and speedup charts for benchmark result files.
pub struct ChartGenerator {
    size: (u32, u32),
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGenerator {
    pub fn new() -> Self {
        Self { size: DEFAULT_SIZE }
    }

    pub fn size(&mut self, size: (u32, u32)) -> &mut Self {
        self.size = size;
        self
    }

    pub fn get_size(&self) -> (u32, u32) {
        self.size
    }

    /// Chart descriptions for `dataset`. The runtime chart reuses the x-axis
    /// description of the speedup chart rather than setting its own.
    pub fn plan(&self, dataset: &Dataset, titles: &Titles) -> ChartPlan {
        let mut speedup = PlotConfig::new();
        speedup
            .caption(&titles.speedup)
            .x_desc(dataset.x_label())
            .y_desc(SPEEDUP_LABEL)
            .size(self.size);

        let mut runtime = PlotConfig::new();
        runtime
            .caption(&titles.runtime)
            .x_desc(speedup.get_x_desc())
            .y_desc(dataset.y_label())
            .size(self.size);

        ChartPlan { speedup, runtime }
    }

    /// Load `input`, derive the speedup series and write both charts. Any
    /// error stops the run; a chart already written is left in place.
    pub fn generate<P: AsRef<Path>>(
        &self,
        input: P,
        titles: &Titles,
        outputs: &Outputs,
    ) -> Result<(), Error> {
        let input = input.as_ref();

        debug!("loading: {}", input.display());
        let dataset = Dataset::load(input)?;

        debug!("deriving speedup for {} rows", dataset.len());
        let speedups = dataset.speedup_points()?;

        let series = |kind: ChartKind| match kind {
            ChartKind::Speedup => &speedups[..],
            ChartKind::Runtime => dataset.points(),
        };

        // no chart is written unless every chart can be drawn
        for kind in ChartKind::iter() {
            linegraph::axis_ranges(series(kind)).map_err(|source| Error::Render {
                path: outputs.path(kind).to_path_buf(),
                source,
            })?;
        }

        let plan = self.plan(&dataset, titles);
        let mut canvas = Canvas::new(self.size.0, self.size.1);

        for kind in ChartKind::iter() {
            // each chart starts from a blank surface
            canvas.clear();
            debug!("rendering {} chart", kind);
            self.render(&mut canvas, plan.chart(kind), series(kind), outputs.path(kind))?;
        }

        Ok(())
    }

    /// Generate the charts for a configured benchmark, placing outputs
    /// without an explicit path in `output_dir`.
    pub fn run<P: AsRef<Path>>(&self, benchmark: &Benchmark, output_dir: P) -> Result<(), Error> {
        info!("benchmark: {}", benchmark.name());
        self.generate(
            benchmark.input(),
            &benchmark.titles(),
            &benchmark.outputs(output_dir),
        )
    }

    fn render(
        &self,
        canvas: &mut Canvas,
        chart: &PlotConfig,
        points: &[(f64, f64)],
        path: &Path,
    ) -> Result<(), Error> {
        chart
            .plot_line(canvas, points)
            .map_err(|source| Error::Render {
                path: path.to_path_buf(),
                source,
            })?;

        canvas.write_png(path).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!("wrote: {}", path.display());
        Ok(())
    }
}
