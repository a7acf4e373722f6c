use crate::{
    crs::Crs,
    error::ConfigurationError,
    glacier::{FrontLine, FrontLines, ReferenceBox},
};

use chrono::NaiveDate;
use geo::{Geometry, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject, JsonValue};
use log::debug;

use std::{fs::File, io::BufReader, path::Path};

pub fn read_reference_box(path: impl AsRef<Path>) -> crate::Result<ReferenceBox> {
    let path = path.as_ref();
    let collection = read_feature_collection(path)?;
    let crs = Crs::from_foreign_members(collection.foreign_members.as_ref());

    if collection.features.len() != 1 {
        return Err(ConfigurationError::BoxFeatureCount(collection.features.len()).into());
    }
    let feature = &collection.features[0];

    let polygon = box_polygon(feature).ok_or(ConfigurationError::InvalidBoxGeometry)?;

    let width = match feature.property("width") {
        None | Some(JsonValue::Null) => {
            return Err(ConfigurationError::MissingAttribute {
                feature: 0,
                attribute: "width",
            }
            .into())
        }
        Some(value) => as_f64(value).ok_or_else(|| ConfigurationError::InvalidAttribute {
            feature: 0,
            attribute: "width",
            value: value.to_string(),
        })?,
    };

    debug!("Read box of width {width} in {crs} from {}", path.display());
    Ok(ReferenceBox::new(polygon, width, crs)?)
}

pub fn read_front_lines(path: impl AsRef<Path>) -> crate::Result<FrontLines> {
    let path = path.as_ref();
    let collection = read_feature_collection(path)?;
    let crs = Crs::from_foreign_members(collection.foreign_members.as_ref());

    let lines = collection
        .features
        .into_iter()
        .enumerate()
        .map(|(i, feature)| front_line_feature(i, feature))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Read {} front lines in {crs} from {}", lines.len(), path.display());
    Ok(FrontLines { crs, lines })
}

fn read_feature_collection(path: &Path) -> crate::Result<FeatureCollection> {
    let reader = BufReader::new(File::open(path)?);

    match GeoJson::from_reader(reader)? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(feature) => Ok(FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        }),
        GeoJson::Geometry(_) => Err(ConfigurationError::NotAFeatureCollection.into()),
    }
}

fn box_polygon(feature: &Feature) -> Option<Polygon> {
    let geometry = Geometry::<f64>::try_from(feature.geometry.clone()?).ok()?;

    match geometry {
        Geometry::Polygon(polygon) => Some(polygon),
        Geometry::MultiPolygon(mut polygons) if polygons.0.len() == 1 => {
            Some(polygons.0.remove(0))
        }
        Geometry::Rect(rect) => Some(rect.to_polygon()),
        _ => None,
    }
}

fn front_line_feature(index: usize, feature: Feature) -> Result<FrontLine, ConfigurationError> {
    let properties = feature.properties.unwrap_or_default();

    let glacier_name = match required(&properties, index, "gl_name")? {
        JsonValue::String(name) => name.clone(),
        other => other.to_string(),
    };

    let year_value = required(&properties, index, "year")?;
    let year = as_i64(year_value)
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| invalid(index, "year", year_value))?;

    let date_value = required(&properties, index, "date")?;
    let date = as_date(date_value).ok_or_else(|| invalid(index, "date", date_value))?;

    Ok(FrontLine {
        glacier_name,
        year,
        date,
        geometry: feature.geometry,
        properties,
    })
}

fn required<'a>(
    properties: &'a JsonObject,
    feature: usize,
    attribute: &'static str,
) -> Result<&'a JsonValue, ConfigurationError> {
    match properties.get(attribute) {
        None | Some(JsonValue::Null) => {
            Err(ConfigurationError::MissingAttribute { feature, attribute })
        }
        Some(value) => Ok(value),
    }
}

fn invalid(feature: usize, attribute: &'static str, value: &JsonValue) -> ConfigurationError {
    ConfigurationError::InvalidAttribute {
        feature,
        attribute,
        value: value.to_string(),
    }
}

// attribute tables often store numbers as text
fn as_f64(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_i64(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.).map(|f| f as i64)),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Dates are written as YYYYMMDD, either as text or as a number
fn as_date(value: &JsonValue) -> Option<NaiveDate> {
    let text = match value {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(_) => as_i64(value)?.to_string(),
        _ => return None,
    };
    NaiveDate::parse_from_str(&text, "%Y%m%d").ok()
}
