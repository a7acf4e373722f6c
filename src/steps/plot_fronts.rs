use crate::{geometry::MapRect, glacier::GlacierTimeSeries, Error};

use chrono::{Datelike, NaiveDate};
use geo::BoundingRect;
use log::{info, warn};
use plotters::prelude::*;

use std::path::Path;

const GRAPH_SIZE: (u32, u32) = (1000, 600);
const IMAGE_SIZE: (u32, u32) = (1000, 1000);

fn plot_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Error {
    Error::PlotError(e.to_string())
}

/// Relative front position against time
pub fn write_graph(path: &Path, series: &GlacierTimeSeries) -> crate::Result<()> {
    if series.is_empty() {
        warn!("{}: nothing to graph", series.glacier);
        return Ok(());
    }

    let points: Vec<(f64, f64)> = series
        .records
        .iter()
        .map(|r| (decimal_year(r.date), r.relative_position as f64))
        .collect();

    let (x_min, x_max) = padded_range(points.iter().map(|p| p.0), 1.);
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.1), 100.);

    let root = SVGBackend::new(path, GRAPH_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Approximate frontal positions relative to earliest record ({})",
                series.glacier
            ),
            ("sans-serif", 20).into_font(),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Frontal position change (metres)")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(plot_error)?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    info!("Saved graph to {}", path.display());
    Ok(())
}

/// Outlines of every measured piece of the box, one colour per front
pub fn write_result_image(path: &Path, series: &GlacierTimeSeries) -> crate::Result<()> {
    let Some(bounds) = series
        .records
        .iter()
        .filter_map(|r| r.piece.bounding_rect())
        .reduce(|a, b| a.merge(&b))
    else {
        warn!("{}: no pieces to draw", series.glacier);
        return Ok(());
    };

    let margin = bounds.width().max(bounds.height()) * 0.05 + 1.;

    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&series.glacier, ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (bounds.min().x - margin)..(bounds.max().x + margin),
            (bounds.min().y - margin)..(bounds.max().y + margin),
        )
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(plot_error)?;

    for (i, (piece, year)) in series.pieces().enumerate() {
        let color = Palette99::pick(i).mix(0.6);
        chart
            .draw_series(LineSeries::new(
                piece.exterior().0.iter().map(|c| (c.x, c.y)),
                &color,
            ))
            .map_err(plot_error)?
            .label(year.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    info!("Saved image to {}", path.display());
    Ok(())
}

fn decimal_year(date: NaiveDate) -> f64 {
    let days = if NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some() {
        366.
    } else {
        365.
    };
    date.year() as f64 + date.ordinal0() as f64 / days
}

/// Min and max with 5 % headroom, never an empty range
fn padded_range(values: impl Iterator<Item = f64>, min_span: f64) -> (f64, f64) {
    let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((max - min) * 0.05).max(min_span / 2.);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{glacier::BoxOrientation, steps::measure_fronts, test_fixtures::*};

    use std::fs;

    #[test]
    fn test_decimal_year() {
        assert_eq!(decimal_year(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap()), 2001.);
        let mid = decimal_year(NaiveDate::from_ymd_opt(2000, 7, 2).unwrap());
        assert!((mid - 2000.5).abs() < 0.01);
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([0., 100.].into_iter(), 1.), (-5., 105.));
        assert_eq!(padded_range([7.].into_iter(), 100.), (-43., 57.));
    }

    #[test]
    fn test_write_figures() {
        let lines = fronts(vec![
            front_at(2000, "20000815", 50.),
            front_at(2010, "20100901", 70.),
        ]);
        let series = measure_fronts(&square_box(), &lines, BoxOrientation::Left)
            .unwrap()
            .series;

        let dir = std::env::temp_dir().join(format!("glacier_fronts_plot_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let graph = dir.join("test_glacier_frontal_change.svg");
        let image = dir.join("Test Glacier.svg");
        write_graph(&graph, &series).unwrap();
        write_result_image(&image, &series).unwrap();

        assert!(fs::read_to_string(graph).unwrap().contains("<svg"));
        assert!(fs::read_to_string(image).unwrap().contains("<svg"));
    }
}
