use canvas::Canvas;

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use thiserror::Error;

use once_cell::sync::Lazy;

use std::ops::Range;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            (($colour & 0x0000FF) >> 0) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0x0000FF),
    hexcolour!(0xAA0000),
    hexcolour!(0x888888),
    hexcolour!(0x117733),
];

// family name plotters resolves for text styles built from plain strings
const FONT: &str = "sans-serif";

// fraction of the data span left empty on each side of an axis
const MARGIN: f64 = 0.05;

// largest axis bound plotters can place tick marks on without overflowing
pub const AXIS_LIMIT: f64 = 1e300;

const MARKER_RADIUS: u32 = 4;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("no points to plot")]
    EmptySeries,
    #[error("canvas is {actual:?} but chart expects {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("axis range {start}..{end} cannot be drawn")]
    AxisRange { start: f64, end: f64 },
    #[error("bundled font could not be loaded")]
    Font,
    #[error("drawing failed: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for GraphError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        GraphError::Drawing(e.to_string())
    }
}

static FONT_REGISTERED: Lazy<bool> = Lazy::new(|| {
    let font_data = dejavu::sans_mono::regular() as &'static [u8];
    register_font(FONT, FontStyle::Normal, font_data).is_ok()
});

fn register_fonts() -> Result<(), GraphError> {
    if *FONT_REGISTERED {
        Ok(())
    } else {
        Err(GraphError::Font)
    }
}

/// Axis range covering all `values` with a margin on both sides. A single
/// distinct value is widened by one unit each way so the range is never empty.
///
/// Fails if there are no values, if any value is not finite, or if the padded
/// range reaches beyond `AXIS_LIMIT`.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Result<Range<f64>, GraphError> {
    let mut values = values.into_iter().peekable();
    if values.peek().is_none() {
        return Err(GraphError::EmptySeries);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_nan() {
            return Err(GraphError::AxisRange { start: v, end: v });
        }
        min = min.min(v);
        max = max.max(v);
    }

    let range = if !min.is_finite() || !max.is_finite() {
        min..max
    } else if min == max {
        (min - 1.0)..(max + 1.0)
    } else {
        // scaled before subtracting so the span itself cannot overflow
        let pad = max * MARGIN - min * MARGIN;
        (min - pad)..(max + pad)
    };

    if range.start.abs() <= AXIS_LIMIT && range.end.abs() <= AXIS_LIMIT {
        Ok(range)
    } else {
        Err(GraphError::AxisRange {
            start: range.start,
            end: range.end,
        })
    }
}

/// The x and y axis ranges `plot_line` would use for `points`.
pub fn axis_ranges(points: &[(f64, f64)]) -> Result<(Range<f64>, Range<f64>), GraphError> {
    let x = padded_range(points.iter().map(|p| p.0))?;
    let y = padded_range(points.iter().map(|p| p.1))?;
    Ok((x, y))
}

/// Describes a single line chart: caption, axis descriptions and pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotConfig {
    caption: String,
    x_desc: String,
    y_desc: String,
    size: (u32, u32),
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotConfig {
    pub fn new() -> Self {
        Self {
            caption: String::new(),
            x_desc: String::new(),
            y_desc: String::new(),
            size: (640, 480),
        }
    }

    pub fn caption(&mut self, caption: impl AsRef<str>) -> &mut Self {
        self.caption = caption.as_ref().to_owned();
        self
    }

    pub fn x_desc(&mut self, x_desc: impl AsRef<str>) -> &mut Self {
        self.x_desc = x_desc.as_ref().to_owned();
        self
    }

    pub fn y_desc(&mut self, y_desc: impl AsRef<str>) -> &mut Self {
        self.y_desc = y_desc.as_ref().to_owned();
        self
    }

    pub fn size(&mut self, size: (u32, u32)) -> &mut Self {
        self.size = size;
        self
    }

    pub fn get_caption(&self) -> &str {
        &self.caption
    }

    pub fn get_x_desc(&self) -> &str {
        &self.x_desc
    }

    pub fn get_y_desc(&self) -> &str {
        &self.y_desc
    }

    pub fn get_size(&self) -> (u32, u32) {
        self.size
    }

    /// Draw `points` in order as a connected line with a circular marker at
    /// each point. The chart is drawn over the current canvas contents, so a
    /// canvas reused between charts must be cleared first.
    pub fn plot_line(
        &self,
        canvas: &mut Canvas,
        points: &[(f64, f64)],
    ) -> Result<(), GraphError> {
        let (x_range, y_range) = axis_ranges(points)?;
        if canvas.size() != self.size {
            return Err(GraphError::SizeMismatch {
                expected: self.size,
                actual: canvas.size(),
            });
        }

        register_fonts()?;

        let root =
            BitMapBackend::with_buffer(canvas.as_mut_bytes(), self.size).into_drawing_area();

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.caption, (FONT, 24))
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .y_desc(&self.y_desc)
            .x_desc(&self.x_desc)
            .label_style((FONT, 14))
            .axis_desc_style((FONT, 16))
            .draw()?;

        let colour = COLOURS[0];

        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            colour.stroke_width(2),
        ))?;

        chart.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, MARKER_RADIUS, colour.filled())),
        )?;

        root.present()?;

        Ok(())
    }
}
