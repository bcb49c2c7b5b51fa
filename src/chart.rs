//! SVG line chart of the relative error of several series approximations.
//!
//! One line is drawn per term count over x in [-1, 1], with the y axis scaled
//! to the largest error of any series.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::sample::{max_error, ErrorSeries};

/// Default term counts, one line each.
pub const DEFAULT_TERMS: [usize; 5] = [3, 5, 7, 9, 11];

/// Default line colours, matched to [`DEFAULT_TERMS`] by index.
pub const DEFAULT_COLORS: [&str; 5] = ["#2563eb", "#dc2626", "#16a34a", "#9333ea", "#ea580c"];

/// Default chart title.
pub const DEFAULT_TITLE: &str = "Relative Error of Taylor Series Arctangent Approximation";

/// Errors from loading chart configuration and drawing charts.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to read chart config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse chart config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid chart config: {0}")]
    InvalidConfig(String),

    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Space around the plotting area, in pixels. The bottom and left margins hold
/// the axis labels.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 40,
            right: 120,
            bottom: 60,
            left: 60,
        }
    }
}

/// Chart layout and content. Every field is optional in TOML.
///
/// ```toml
/// width = 1200
/// terms = [3, 7, 15]
/// colors = ["#2563eb", "#dc2626", "#16a34a"]
///
/// [margin]
/// right = 40
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    /// Total canvas width in pixels.
    pub width: u32,
    /// Total canvas height in pixels.
    pub height: u32,
    pub margin: Margin,
    /// One line is drawn per term count.
    pub terms: Vec<usize>,
    /// `#rrggbb` colours, at least one per term count.
    pub colors: Vec<String>,
    pub title: String,
    pub stroke_width: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 920,
            height: 500,
            margin: Margin::default(),
            terms: DEFAULT_TERMS.to_vec(),
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            title: DEFAULT_TITLE.to_string(),
            stroke_width: 2,
        }
    }
}

impl ChartConfig {
    /// Loads a configuration from a TOML file. Missing fields take their default values.
    pub fn from_file(path: &Path) -> Result<Self, ChartError> {
        let content = std::fs::read_to_string(path).map_err(|e| ChartError::ConfigRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ChartError::ConfigParse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Checks that the configuration describes a drawable chart.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.terms.is_empty() {
            return Err(ChartError::InvalidConfig("no term counts given".into()));
        }
        if let Some(t) = self.terms.iter().find(|&&t| t < 1) {
            return Err(ChartError::InvalidConfig(format!(
                "term count must be at least 1, got {t}"
            )));
        }
        if self.colors.len() < self.terms.len() {
            return Err(ChartError::InvalidConfig(format!(
                "{} term counts but only {} colors",
                self.terms.len(),
                self.colors.len()
            )));
        }
        if self.width <= self.margin.left + self.margin.right
            || self.height <= self.margin.top + self.margin.bottom
        {
            return Err(ChartError::InvalidConfig(format!(
                "{}x{} canvas leaves no room for the plot",
                self.width, self.height
            )));
        }
        self.palette().map(|_| ())
    }

    /// The parsed line colours.
    pub fn palette(&self) -> Result<Vec<RGBColor>, ChartError> {
        self.colors.iter().map(|c| parse_hex_color(c)).collect()
    }
}

/// Parses a `#rrggbb` colour.
pub fn parse_hex_color(s: &str) -> Result<RGBColor, ChartError> {
    let invalid = || ChartError::InvalidConfig(format!("invalid color '{s}', expected #rrggbb"));
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Renders the error chart to an SVG file and returns the plotted series.
///
/// # Arguments
/// * `config` - Chart layout and term counts.
/// * `path` - The SVG file to write.
pub fn render_svg(config: &ChartConfig, path: &Path) -> Result<Vec<ErrorSeries>, ChartError> {
    config.validate()?;
    let colors = config.palette()?;
    let series = {
        let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
        draw_chart(config, &colors, &root)?
    };
    info!(path = %path.display(), series = series.len(), "wrote error chart");
    Ok(series)
}

/// Renders the error chart to an SVG document in memory.
pub fn render_svg_string(config: &ChartConfig) -> Result<String, ChartError> {
    config.validate()?;
    let colors = config.palette()?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        draw_chart(config, &colors, &root)?;
    }
    Ok(svg)
}

/// Expects a validated `config` and its parsed `colors`. The backend writes its
/// output on drop, even on error.
fn draw_chart<DB: DrawingBackend>(
    config: &ChartConfig,
    colors: &[RGBColor],
    root: &DrawingArea<DB, Shift>,
) -> Result<Vec<ErrorSeries>, ChartError> {
    let series: Vec<ErrorSeries> = config.terms.iter().map(|&t| ErrorSeries::new(t)).collect();
    for s in series.iter().filter(|s| s.has_non_finite()) {
        warn!(terms = s.terms(), "series has non-finite errors, skipping those samples");
    }

    let y_max = match max_error(&series) {
        Some(e) if e > 0.0 && e.is_finite() => e,
        _ => 1.0,
    };
    debug!(y_max, "scaled error axis");

    root.fill(&WHITE).map_err(draw_error)?;
    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 16))
        .margin_top(config.margin.top)
        .margin_right(config.margin.right)
        .x_label_area_size(config.margin.bottom)
        .y_label_area_size(config.margin.left)
        .build_cartesian_2d(-1.0f64..1.0f64, 0.0f64..y_max)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("x value")
        .y_desc("Relative Error (%)")
        .draw()
        .map_err(draw_error)?;

    for (s, &color) in series.iter().zip(colors.iter()) {
        chart
            .draw_series(LineSeries::new(
                s.samples()
                    .iter()
                    .filter(|p| p.error.is_finite())
                    .map(|p| (p.x, p.error)),
                color.stroke_width(config.stroke_width),
            ))
            .map_err(draw_error)?
            .label(format!("{} terms", s.terms()))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    Ok(series)
}
