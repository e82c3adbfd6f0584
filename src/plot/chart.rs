use crate::error::{Result, TaskError};
use plotters::prelude::*;
use serde::Serialize;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_SIZE: (u32, u32) = (800, 600);

/// One named line on a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Build a series whose x values are the positions of `ys`
    pub fn from_values(label: impl Into<String>, ys: &[f64]) -> Self {
        let points = ys
            .iter()
            .enumerate()
            .map(|(i, y)| (i as f64, *y))
            .collect();
        Self::new(label, points)
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }
}

/// A line chart handle: everything needed to draw it again
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Chart {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub grid: bool,
    pub legend: bool,
    pub series: Vec<Series>,
    /// Text shown instead of numeric x ticks, indexed by rounded x value
    pub x_tick_labels: Option<Vec<String>>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_x_tick_labels(mut self, labels: Vec<String>) -> Self {
        self.x_tick_labels = Some(labels);
        self
    }

    pub fn add_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Look up a series by its legend label
    pub fn series(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }

    pub fn series_labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    /// Render the chart as an SVG document
    pub fn render_svg(&self) -> Result<String> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, DEFAULT_SIZE).into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(render_error)?;
        }
        debug!(
            series = self.series.len(),
            bytes = buffer.len(),
            "Rendered chart to SVG"
        );
        Ok(buffer)
    }

    /// Render the chart and write it to `path`
    pub fn save_svg(&self, path: &Path) -> Result<()> {
        let svg = self.render_svg()?;
        std::fs::write(path, svg).map_err(|e| TaskError::from(e).with_path(path))?;
        info!("Wrote chart to {}", path.display());
        Ok(())
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, plotters::coord::Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(render_error)?;

        let (x_range, y_range) = self.bounds();
        let mut builder = ChartBuilder::on(root);
        builder
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50);
        if let Some(title) = &self.title {
            builder.caption(title, ("sans-serif", 24));
        }
        let mut chart = builder
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_error)?;

        let tick_formatter = |x: &f64| match &self.x_tick_labels {
            Some(labels) => labels
                .get(x.round().max(0.0) as usize)
                .cloned()
                .unwrap_or_default(),
            None => format!("{}", x),
        };

        let mut mesh = chart.configure_mesh();
        if !self.grid {
            mesh.disable_mesh();
        }
        mesh.x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .x_label_formatter(&tick_formatter)
            .draw()
            .map_err(render_error)?;

        for (idx, series) in self.series.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            chart
                .draw_series(LineSeries::new(series.points.iter().copied(), color))
                .map_err(render_error)?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        if self.legend && !self.series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_error)?;
        }

        Ok(())
    }

    /// Axis ranges covering every point, widened when degenerate
    fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for (x, y) in points {
            x_min = x_min.min(*x);
            x_max = x_max.max(*x);
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }
        (widen(x_min, x_max), widen(y_min, y_max))
    }
}

fn widen(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }
    min..max
}

fn render_error(err: impl std::fmt::Display) -> TaskError {
    TaskError::render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chart() -> Chart {
        Chart::new()
            .with_title("Sample")
            .with_axis_labels("x", "y")
            .with_legend(true)
            .add_series(Series::from_values("first", &[1.0, 2.0, 3.0]))
            .add_series(Series::from_values("second", &[3.0, 2.0, 1.0]))
    }

    #[test]
    fn test_series_lookup() {
        let chart = sample_chart();
        assert_eq!(chart.series_labels(), vec!["first", "second"]);
        assert_eq!(chart.series("second").unwrap().ys(), vec![3.0, 2.0, 1.0]);
        assert!(chart.series("third").is_none());
    }

    #[test]
    fn test_render_svg_contains_labels() {
        let svg = sample_chart().render_svg().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Sample"));
        assert!(svg.contains("first"));
    }

    #[test]
    fn test_render_empty_chart() {
        let svg = Chart::new().with_axis_labels("a", "b").render_svg().unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_bounds_widen_flat_series() {
        let chart = Chart::new().add_series(Series::from_values("flat", &[2.0]));
        let (x, y) = chart.bounds();
        assert_eq!(x, -0.5..0.5);
        assert_eq!(y, 1.5..2.5);
    }

    #[test]
    fn test_save_svg_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");
        sample_chart().save_svg(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }
}
