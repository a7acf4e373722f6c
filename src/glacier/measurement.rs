use super::FrontLine;
use crate::error::MeasurementError;

use chrono::NaiveDate;
use geo::Polygon;
use geojson::JsonObject;

use std::fmt::Display;

/// Front position of a glacier at one date
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub glacier: String,
    pub date: NaiveDate,
    pub year: i32,
    /// glacier side area of the box divided by the box width
    pub measurement: i64,
    /// measurement minus the measurement at the anchor
    pub relative_position: i64,
    /// the glacier side piece of the box
    pub piece: Polygon,
    pub properties: JsonObject,
}

/// The zero point of the relative positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub year: i32,
    pub zero_position: i64,
}

/// All measurements of a glacier ordered by date.
/// Without an anchor the series is empty and must not be reported as zero change
#[derive(Debug, Clone, PartialEq)]
pub struct GlacierTimeSeries {
    pub glacier: String,
    pub anchor: Option<Anchor>,
    pub records: Vec<MeasurementRecord>,
}

impl GlacierTimeSeries {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (&Polygon, i32)> {
        self.records.iter().map(|r| (&r.piece, r.year))
    }
}

/// A line dropped from a series, or a series that could not be anchored
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub glacier: String,
    pub year: Option<i32>,
    pub date: Option<NaiveDate>,
    pub error: MeasurementError,
}

impl Diagnostic {
    pub fn for_line(glacier: &str, line: &FrontLine, error: MeasurementError) -> Diagnostic {
        Diagnostic {
            glacier: glacier.to_string(),
            year: Some(line.year),
            date: Some(line.date),
            error,
        }
    }

    pub fn for_glacier(glacier: &str, error: MeasurementError) -> Diagnostic {
        Diagnostic {
            glacier: glacier.to_string(),
            year: None,
            date: None,
            error,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.date {
            Some(date) => write!(f, "{} ({}): {}", self.glacier, date, self.error),
            None => write!(f, "{}: {}", self.glacier, self.error),
        }
    }
}

/// Everything the measurement of one glacier produced
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMeasurement {
    pub series: GlacierTimeSeries,
    pub diagnostics: Vec<Diagnostic>,
}

impl FrontMeasurement {
    pub fn skipped_years(&self) -> Vec<i32> {
        self.diagnostics.iter().filter_map(|d| d.year).collect()
    }

    pub fn is_anchored(&self) -> bool {
        self.series.anchor.is_some()
    }
}
