use crate::crs::Crs;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// crate specific Error enum
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    GeoJsonError(#[from] geojson::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    CsvError(#[from] csv::Error),
    #[error("Could not draw the figure: {0}")]
    PlotError(String),
    #[error(transparent)]
    ConfigurationError(#[from] ConfigurationError),
}

/// Problems with the inputs of a single glacier.
/// Processing of that glacier stops, the rest of the batch continues
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("CRS of input layers do not match, box is {box_crs} and lines are {lines_crs}")]
    CrsMismatch { box_crs: Crs, lines_crs: Crs },
    #[error("Expected a GeoJSON feature collection")]
    NotAFeatureCollection,
    #[error("Expected exactly one box feature, found {0}")]
    BoxFeatureCount(usize),
    #[error("The box geometry must be a single polygon")]
    InvalidBoxGeometry,
    #[error("The box width must be a positive number, got {0}")]
    InvalidBoxWidth(f64),
    #[error("Feature {feature} is missing the attribute `{attribute}`")]
    MissingAttribute {
        feature: usize,
        attribute: &'static str,
    },
    #[error("Feature {feature} has an invalid `{attribute}` value: {value}")]
    InvalidAttribute {
        feature: usize,
        attribute: &'static str,
        value: String,
    },
    #[error("The line collection contains no front lines")]
    NoFrontLines,
}

/// A front line that cannot be turned into a usable line geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("the feature has no geometry")]
    Missing,
    #[error("the geometry could not be read: {0}")]
    Unreadable(String),
    #[error("expected a line geometry, found {0}")]
    NotALine(&'static str),
    #[error("the line has non-finite coordinates")]
    NonFinite,
    #[error("the line has fewer than two distinct vertices")]
    TooFewVertices,
    #[error("the line intersects itself")]
    SelfIntersecting,
}

/// Why a front line, or a whole glacier, produced no measurement
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasurementError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("invalid split, the line cut the box into {pieces} piece(s)")]
    InvalidSplit { pieces: usize },
    #[error("no valid split to anchor the relative positions to")]
    MissingAnchor,
}
