//! Bode overlay plotting
//!
//! Renders measured Bode data against candidate transfer-function curves
//! as two stacked SVG panels: gain (linear ratio) over frequency and phase
//! (degrees) over frequency, both with a logarithmic frequency axis in Hz.
//! Measured points are drawn as black circle markers; model curves are
//! sampled on a widened angular-frequency sweep.

use anyhow::{bail, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::constants::{
    OMEGA_MARGIN_DECADES, OMEGA_SWEEP_POINTS, OMEGA_SWEEP_START, OMEGA_SWEEP_STOP,
};
use crate::data::BodeData;
use crate::frequency::{Frequency, FrequencyUnit, SweepType};
use crate::math::conversions::radian_2_degree;
use crate::tf::RationalTf;

/// Qualitative five-color palette for model curves (ColorBrewer Dark2)
pub const PALETTE: [RGBColor; 5] = [
    RGBColor(27, 158, 119),
    RGBColor(217, 95, 2),
    RGBColor(117, 112, 179),
    RGBColor(231, 41, 138),
    RGBColor(102, 166, 30),
];

/// Panel size in pixels; the two panels are stacked vertically
const PANEL_WIDTH: u32 = 600;
const PANEL_HEIGHT: u32 = 200;

/// Background of the drawing area
const BACKGROUND: RGBColor = RGBColor(250, 250, 250);

/// Fraction of the value span added as axis padding
const RANGE_PAD: f64 = 0.05;

/// Dash pattern for a curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineDash {
    #[default]
    Solid,
    /// Dash segments of `size` pixels separated by `gap` pixels
    Dashed { size: u32, gap: u32 },
}

/// Per-curve styling for the overlay plot
///
/// Every option is resolved independently: providing `colors` does not
/// change how `dashes` or `widths` default. A provided vector must carry
/// one entry per transfer function.
#[derive(Debug, Clone, Default)]
pub struct OverlayStyle {
    /// Curve colors; defaults to [`PALETTE`] cycled by index
    pub colors: Option<Vec<RGBColor>>,
    /// Dash patterns; defaults to solid lines
    pub dashes: Option<Vec<LineDash>>,
    /// Stroke widths in pixels; defaults to 1
    pub widths: Option<Vec<u32>>,
}

impl OverlayStyle {
    /// Resolve the options for `n` curves, applying defaults per option
    fn resolve(&self, n: usize) -> Result<(Vec<RGBColor>, Vec<LineDash>, Vec<u32>)> {
        let colors = match &self.colors {
            Some(c) => {
                if c.len() != n {
                    bail!("colors has {} entries for {} transfer functions", c.len(), n);
                }
                c.clone()
            }
            None => (0..n).map(|i| PALETTE[i % PALETTE.len()]).collect(),
        };
        let dashes = match &self.dashes {
            Some(d) => {
                if d.len() != n {
                    bail!("dashes has {} entries for {} transfer functions", d.len(), n);
                }
                d.clone()
            }
            None => vec![LineDash::Solid; n],
        };
        let widths = match &self.widths {
            Some(w) => {
                if w.len() != n {
                    bail!("widths has {} entries for {} transfer functions", w.len(), n);
                }
                w.clone()
            }
            None => vec![1; n],
        };
        Ok((colors, dashes, widths))
    }
}

/// One sampled model curve
struct Curve {
    freqs_hz: Vec<f64>,
    mag: Vec<f64>,
    phase_deg: Vec<f64>,
}

/// Sample a transfer function over the standard overlay sweep
fn sample_curve(tf: &RationalTf) -> Curve {
    let sweep = Frequency::new(
        OMEGA_SWEEP_START,
        OMEGA_SWEEP_STOP,
        OMEGA_SWEEP_POINTS,
        FrequencyUnit::RadPerSec,
        SweepType::Log,
    )
    .with_margin(OMEGA_MARGIN_DECADES);

    let (mag, phase_rad) = tf.bode(&sweep.w());
    Curve {
        freqs_hz: sweep.f().to_vec(),
        mag,
        phase_deg: phase_rad.iter().map(|&p| radian_2_degree(p)).collect(),
    }
}

/// Extend `(lo, hi)` with every finite value of `vals`
fn fold_range(range: (f64, f64), vals: impl Iterator<Item = f64>) -> (f64, f64) {
    vals.filter(|v| v.is_finite())
        .fold(range, |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Pad a value range by a fraction of its span on both sides
fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

/// Pair x/y samples, dropping non-finite points
fn finite_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect()
}

/// Render the overlay as an SVG document
///
/// # Arguments
/// * `data` - Measured Bode data, drawn as black circle markers
/// * `tfs` - Candidate transfer functions, drawn as styled curves
/// * `names` - Legend labels, one per transfer function
/// * `style` - Per-curve styling; `OverlayStyle::default()` for defaults
///
/// # Errors
/// Fails when `names` or a provided style vector does not match `tfs` in
/// length, or when a measured frequency is not positive (the frequency
/// axis is logarithmic).
pub fn render_svg(
    data: &BodeData,
    tfs: &[RationalTf],
    names: &[&str],
    style: &OverlayStyle,
) -> Result<String> {
    if tfs.len() != names.len() {
        bail!(
            "got {} transfer functions but {} names",
            tfs.len(),
            names.len()
        );
    }
    let (colors, dashes, widths) = style.resolve(tfs.len())?;

    if let Some(&f) = data.freqs_hz().iter().find(|&&f| f <= 0.0) {
        bail!("measured frequency {} is not positive on a log axis", f);
    }

    let curves: Vec<Curve> = tfs.iter().map(sample_curve).collect();

    // Shared frequency range over measured points and curves, padded
    // multiplicatively since the axis is logarithmic
    let mut f_range = (f64::INFINITY, f64::NEG_INFINITY);
    f_range = fold_range(f_range, data.freqs_hz().iter().copied());
    for curve in &curves {
        f_range = fold_range(f_range, curve.freqs_hz.iter().copied());
    }
    let (f_min, f_max) = (f_range.0 / (1.0 + RANGE_PAD), f_range.1 * (1.0 + RANGE_PAD));

    let mut gain_range = (f64::INFINITY, f64::NEG_INFINITY);
    gain_range = fold_range(gain_range, data.mag().iter().copied());
    for curve in &curves {
        gain_range = fold_range(gain_range, curve.mag.iter().copied());
    }
    let (g_min, g_max) = pad_range(gain_range.0, gain_range.1, RANGE_PAD);

    let mut phase_range = (f64::INFINITY, f64::NEG_INFINITY);
    phase_range = fold_range(phase_range, data.phase_deg().iter().copied());
    for curve in &curves {
        phase_range = fold_range(phase_range, curve.phase_deg.iter().copied());
    }
    let (p_min, p_max) = pad_range(phase_range.0, phase_range.1, RANGE_PAD);

    if !(f_min.is_finite() && f_max.is_finite() && g_min.is_finite() && g_max.is_finite()) {
        bail!("nothing finite to plot");
    }

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (PANEL_WIDTH, 2 * PANEL_HEIGHT)).into_drawing_area();
        root.fill(&BACKGROUND)?;
        let (gain_area, phase_area) = root.split_vertically(PANEL_HEIGHT);

        // Gain panel carries the legend
        let mut gain_chart = ChartBuilder::on(&gain_area)
            .margin(6)
            .x_label_area_size(28)
            .y_label_area_size(48)
            .build_cartesian_2d((f_min..f_max).log_scale(), g_min..g_max)?;
        gain_chart
            .configure_mesh()
            .x_desc("Frequency [Hz]")
            .y_desc("Gain [Ratio]")
            .x_labels(8)
            .y_labels(5)
            .label_style(("sans-serif", 11))
            .draw()?;

        for (i, curve) in curves.iter().enumerate() {
            let stroke = ShapeStyle::from(&colors[i]).stroke_width(widths[i]);
            let points = finite_points(&curve.freqs_hz, &curve.mag);
            let anno = match dashes[i] {
                LineDash::Solid => gain_chart.draw_series(LineSeries::new(points, stroke))?,
                LineDash::Dashed { size, gap } => gain_chart.draw_series(DashedLineSeries::new(
                    points,
                    size as i32,
                    gap as i32,
                    stroke,
                ))?,
            };
            anno.label(names[i])
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], stroke));
        }
        gain_chart.draw_series(
            data.freqs_hz()
                .iter()
                .zip(data.mag().iter())
                .map(|(&f, &m)| Circle::new((f, m), 3, BLACK.filled())),
        )?;
        gain_chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 11))
            .draw()?;

        // Phase panel
        let mut phase_chart = ChartBuilder::on(&phase_area)
            .margin(6)
            .x_label_area_size(28)
            .y_label_area_size(48)
            .build_cartesian_2d((f_min..f_max).log_scale(), p_min..p_max)?;
        phase_chart
            .configure_mesh()
            .x_desc("Frequency [Hz]")
            .y_desc("Phase [deg]")
            .x_labels(8)
            .y_labels(5)
            .label_style(("sans-serif", 11))
            .draw()?;

        for (i, curve) in curves.iter().enumerate() {
            let stroke = ShapeStyle::from(&colors[i]).stroke_width(widths[i]);
            let points = finite_points(&curve.freqs_hz, &curve.phase_deg);
            match dashes[i] {
                LineDash::Solid => {
                    phase_chart.draw_series(LineSeries::new(points, stroke))?;
                }
                LineDash::Dashed { size, gap } => {
                    phase_chart.draw_series(DashedLineSeries::new(
                        points,
                        size as i32,
                        gap as i32,
                        stroke,
                    ))?;
                }
            }
        }
        phase_chart.draw_series(
            data.freqs_hz()
                .iter()
                .zip(data.phase_deg().iter())
                .map(|(&f, &p)| Circle::new((f, p), 3, BLACK.filled())),
        )?;

        root.present()?;
    }
    Ok(svg)
}

/// Render the overlay and write the SVG document to a file
pub fn save_svg<P: AsRef<Path>>(
    path: P,
    data: &BodeData,
    tfs: &[RationalTf],
    names: &[&str],
    style: &OverlayStyle,
) -> Result<()> {
    let svg = render_svg(data, tfs, names, style)?;
    std::fs::write(path, svg)?;
    Ok(())
}
