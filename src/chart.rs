// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::Config;
use crate::error::Error;
use crate::results::{Record, Series, Variant, RESULTS};
use crate::terminal::TerminalBackend;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use strum::IntoEnumIterator;

use std::ops::Range;

const X_DESC: &str = "Input size";
const Y_DESC: &str = "Time elapsed";

// Cells reserved around the plotting area. The bottom holds the x axis, its
// tick labels and the x description on separate rows. The right keeps room
// for half of the widest x tick label.
const MARGIN_TOP: u32 = 1;
const MARGIN_BOTTOM: u32 = 4;
const MARGIN_LEFT: u32 = 11;
const MARGIN_RIGHT: u32 = 5;

/// Draw the benchmark chart for `records` onto `root` and present it.
///
/// plotters maps the data onto a log-10 x axis and a linear y axis and
/// draws the series. Axes, tick labels, descriptions and the legend are
/// laid out in whole cells around the mapped plotting area.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    records: &[Record],
) -> Result<(), Error> {
    let series = Series::all(records);
    let (x_range, y_range) = bounds(&series);
    debug!("x range: {:?} y range: {:?}", x_range, y_range);

    root.fill(&WHITE)?;

    let (width, height) = root.dim_in_pixel();
    let plot = root.margin(MARGIN_TOP, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT);
    let mut chart = ChartBuilder::on(&plot)
        .build_cartesian_2d(x_range.clone().log_scale().base(10.0), y_range.clone())?;

    let origin = chart.backend_coord(&(x_range.start, y_range.start));
    let corner = chart.backend_coord(&(x_range.end, y_range.end));
    let axis_x = origin.0 - 1;
    let axis_y = origin.1 + 1;

    let font = ("sans-serif", 1).into_font();
    let text = TextStyle::from(font).color(&BLACK);

    // axes
    root.draw(&PathElement::new(vec![(axis_x, axis_y), (corner.0, axis_y)], &BLACK))?;
    root.draw(&PathElement::new(vec![(axis_x, corner.1), (axis_x, axis_y)], &BLACK))?;

    for size in decades(&x_range) {
        let (x, _) = chart.backend_coord(&(size as f64, y_range.start));
        root.draw(&PathElement::new(vec![(x, axis_y), (x, axis_y)], &BLACK))?;
        root.draw_text(
            &size.to_string(),
            &text.pos(Pos::new(HPos::Center, VPos::Top)),
            (x, axis_y + 1),
        )?;
    }

    for value in ticks(&y_range) {
        let (_, y) = chart.backend_coord(&(x_range.start, value));
        root.draw(&PathElement::new(vec![(axis_x - 1, y), (axis_x, y)], &BLACK))?;
        root.draw_text(
            &value.to_string(),
            &text.pos(Pos::new(HPos::Right, VPos::Top)),
            (axis_x - 2, y),
        )?;
    }

    let desc_row = (axis_y + 2).min(height as i32 - 1);
    root.draw_text(
        X_DESC,
        &text.pos(Pos::new(HPos::Center, VPos::Top)),
        ((axis_x + corner.0) / 2, desc_row),
    )?;

    let plot_rows = axis_y - corner.1;
    let desc_top = corner.1 + (plot_rows - Y_DESC.len() as i32).max(0) / 2;
    for (offset, chr) in Y_DESC.chars().enumerate() {
        root.draw_text(&chr.to_string(), &text, (0, desc_top + offset as i32))?;
    }

    for series in &series {
        let style = series.variant().colour().stroke_width(1);
        debug!("plotting {} with {} points", series.label(), series.len());
        chart.draw_series(LineSeries::new(
            series.points().iter().map(|&(size, elapsed)| (size as f64, elapsed)),
            style,
        ))?;
    }

    legend(root, &series, (axis_x + 2, MARGIN_TOP as i32), &text)?;

    debug!("rendered {}x{} cells", width, height);
    root.present()?;

    Ok(())
}

/// Draw a boxed legend with its upper left corner at `at`: one row per
/// series holding a short run of the series glyph and its label.
fn legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[Series],
    at: (i32, i32),
    text: &TextStyle,
) -> Result<(), Error> {
    let label_width = series.iter().map(|s| s.label().len()).max().unwrap_or(0) as i32;
    let lower_right = (at.0 + label_width + 7, at.1 + series.len() as i32 + 1);

    root.draw(&Rectangle::new([at, lower_right], WHITE.filled()))?;
    root.draw(&Rectangle::new([at, lower_right], &BLACK))?;

    for (row, series) in series.iter().enumerate() {
        let y = at.1 + 1 + row as i32;
        let style = series.variant().colour().stroke_width(1);
        root.draw(&PathElement::new(vec![(at.0 + 2, y), (at.0 + 4, y)], style))?;
        root.draw_text(series.label(), text, (at.0 + 6, y))?;
    }

    Ok(())
}

/// The plotted extent: input sizes on x, and zero up to the slowest time
/// with some headroom on y.
fn bounds(series: &[Series]) -> (Range<f64>, Range<f64>) {
    let points = || series.iter().flat_map(|s| s.points().iter());

    let x_min = points().map(|p| p.0).min().unwrap_or(1) as f64;
    let x_max = points().map(|p| p.0).max().unwrap_or(10) as f64;
    let y_max = points().map(|p| p.1).fold(0.0, f64::max);

    let x_max = if x_max > x_min { x_max } else { x_min * 10.0 };
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    (x_min..x_max, 0.0..y_max)
}

/// powers of ten within `range`
fn decades(range: &Range<f64>) -> Vec<u64> {
    let mut decades = Vec::new();
    let mut decade = 1u64;
    while (decade as f64) < range.start {
        decade *= 10;
    }
    while decade as f64 <= range.end {
        decades.push(decade);
        decade *= 10;
    }
    decades
}

/// Evenly spaced y ticks from the start of `range`, using a step of 1, 2 or
/// 5 times a power of ten that gives at most five ticks.
fn ticks(range: &Range<f64>) -> Vec<f64> {
    let span = range.end - range.start;
    if span <= 0.0 {
        return vec![range.start];
    }
    let raw = span / 4.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude);
    (0..)
        .map(|i| range.start + i as f64 * step)
        .take_while(|value| *value <= range.end)
        .collect()
}

/// Render the chart to stdout on a terminal surface sized from `config`.
pub fn show(config: &Config) -> Result<(), Error> {
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    let backend = TerminalBackend::new(&mut stdout, (config.width(), config.height()))
        .glyphs(Variant::iter().map(|v| (v.colour(), v.glyph())));
    let root = backend.into_drawing_area();

    info!("rendering {} series", Variant::iter().count());
    draw(&root, RESULTS)
}
