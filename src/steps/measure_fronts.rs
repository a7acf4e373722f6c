use crate::{
    error::{ConfigurationError, MeasurementError},
    geometry::{front_line, MapPolygon},
    glacier::{
        Anchor, BoxOrientation, Diagnostic, FrontLine, FrontLines, FrontMeasurement,
        GlacierTimeSeries, MeasurementRecord, ReferenceBox, ReferenceYears,
    },
};

use geo::Polygon;
use log::{debug, error, info, warn};

struct Measured<'a> {
    index: usize,
    line: &'a FrontLine,
    measurement: i64,
    piece: Polygon,
}

/// Measures every front line of one glacier against its reference box
/// and expresses the measurements relative to the earliest valid year.
///
/// Lines that cannot be measured are dropped and reported as diagnostics,
/// only a crs mismatch or an empty collection aborts the glacier.
pub fn measure_fronts(
    reference_box: &ReferenceBox,
    front_lines: &FrontLines,
    orientation: BoxOrientation,
) -> Result<FrontMeasurement, ConfigurationError> {
    if reference_box.crs != front_lines.crs {
        return Err(ConfigurationError::CrsMismatch {
            box_crs: reference_box.crs.clone(),
            lines_crs: front_lines.crs.clone(),
        });
    }
    let glacier = front_lines
        .lines
        .first()
        .map(|l| l.glacier_name.clone())
        .ok_or(ConfigurationError::NoFrontLines)?;

    info!("Processing: {glacier}");
    debug!("Measuring the piece {orientation}");

    let mut reference_years = ReferenceYears::new(front_lines.years());
    let mut measured = Vec::with_capacity(front_lines.lines.len());
    let mut diagnostics = vec![];

    for (index, line) in front_lines.lines.iter().enumerate() {
        match measure_line(reference_box, line, orientation) {
            Ok((measurement, piece)) => {
                debug!("{} measured {measurement}", line.date);
                measured.push(Measured {
                    index,
                    line,
                    measurement,
                    piece,
                });
            }
            Err(e) => {
                warn!("{glacier}: {e} for {}, continuing...", line.date);
                if reference_years.discard(line.year) {
                    if let Some(year) = reference_years.earliest() {
                        info!("{glacier}: reference year moved to {year}");
                    }
                }
                diagnostics.push(Diagnostic::for_line(&glacier, line, e));
            }
        }
    }

    // every failed line has been discarded, so the earliest year is final here
    let anchor = reference_years.earliest().and_then(|year| {
        measured
            .iter()
            .filter(|m| m.line.year == year)
            .min_by_key(|m| (m.line.date, m.index))
            .map(|m| Anchor {
                year,
                zero_position: m.measurement,
            })
    });

    let Some(anchor) = anchor else {
        error!("{glacier}: no valid front line, relative positions cannot be computed");
        diagnostics.push(Diagnostic::for_glacier(
            &glacier,
            MeasurementError::MissingAnchor,
        ));
        return Ok(FrontMeasurement {
            series: GlacierTimeSeries {
                glacier,
                anchor: None,
                records: vec![],
            },
            diagnostics,
        });
    };

    let mut records: Vec<MeasurementRecord> = measured
        .into_iter()
        .map(|m| MeasurementRecord {
            glacier: glacier.clone(),
            date: m.line.date,
            year: m.line.year,
            measurement: m.measurement,
            relative_position: m.measurement - anchor.zero_position,
            piece: m.piece,
            properties: m.line.properties.clone(),
        })
        .collect();

    // stable, so records sharing a date keep the file order
    records.sort_by_key(|r| r.date);

    info!(
        "Finished processing {glacier}: {} of {} fronts measured",
        records.len(),
        front_lines.lines.len()
    );

    Ok(FrontMeasurement {
        series: GlacierTimeSeries {
            glacier,
            anchor: Some(anchor),
            records,
        },
        diagnostics,
    })
}

fn measure_line(
    reference_box: &ReferenceBox,
    line: &FrontLine,
    orientation: BoxOrientation,
) -> Result<(i64, Polygon), MeasurementError> {
    let geometry = front_line(line.geometry.as_ref())?;

    let split = reference_box.polygon.split_along(&geometry);
    let pieces = split.pieces();
    if !split.is_valid() {
        return Err(MeasurementError::InvalidSplit { pieces });
    }

    let piece = split
        .principal(orientation)
        .ok_or(MeasurementError::InvalidSplit { pieces })?;

    Ok((reference_box.length_of(piece), piece.clone()))
}
