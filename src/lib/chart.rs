use std::path::Path;

use chrono::NaiveDate;
use plotters::prelude::*;
use plotters::style::full_palette::ORANGE;

use crate::config::PipelineConfig;
use crate::error::{EtlError, Result};
use crate::store::SalesStore;

type Series = [(NaiveDate, f64)];

/// Read both aggregate series back from the store and render the daily line
/// chart and the monthly bar chart into `chart_dir`. Nothing downstream
/// consumes the result; rendering is a terminal side effect.
pub fn render_charts(store: &SalesStore, config: &PipelineConfig) -> Result<()> {
    let daily = store.read_daily(config)?;
    let monthly = store.read_monthly(config)?;

    render_daily(&daily, &Path::new(&config.chart_dir).join("daily_revenue.png"))?;
    render_monthly(
        &monthly,
        &Path::new(&config.chart_dir).join("monthly_revenue.png"),
    )?;
    Ok(())
}

fn render_daily(series: &Series, path: &Path) -> Result<()> {
    if series.is_empty() {
        return Ok(());
    }
    let root = BitMapBackend::new(path, (1000, 400)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Revenue Trend", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0..series.len(), y_range(series))
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|i| bucket_label(series, *i))
        .x_desc("Date")
        .y_desc("Daily Revenue ($)")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            series.iter().enumerate().map(|(i, (_, v))| (i, *v)),
            &BLUE,
        ))
        .map_err(chart_err)?;
    chart
        .draw_series(
            series
                .iter()
                .enumerate()
                .map(|(i, (_, v))| Circle::new((i, *v), 3, BLUE.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

fn render_monthly(series: &Series, path: &Path) -> Result<()> {
    if series.is_empty() {
        return Ok(());
    }
    let root = BitMapBackend::new(path, (800, 400)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Revenue Trend", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0..series.len(), y_range(series))
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|i| bucket_label(series, *i))
        .x_desc("Month")
        .y_desc("Monthly Revenue ($)")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            series
                .iter()
                .enumerate()
                .map(|(i, (_, v))| Rectangle::new([(i, 0.0), (i + 1, *v)], ORANGE.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

fn bucket_label(series: &Series, index: usize) -> String {
    series
        .get(index)
        .map(|(date, _)| date.to_string())
        .unwrap_or_default()
}

/// Axis range from zero up to a little above the largest value, so a flat
/// all-zero series still gets a drawable chart.
fn y_range(series: &Series) -> std::ops::Range<f64> {
    let max = series.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    0.0..(max.max(1.0) * 1.1)
}

fn chart_err<E: std::fmt::Display>(e: E) -> EtlError {
    EtlError::Chart(e.to_string())
}
