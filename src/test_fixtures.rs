use crate::{
    crs::Crs,
    glacier::{FrontLine, FrontLines, ReferenceBox},
};

use chrono::NaiveDate;
use geo::{line_string, polygon, LineString};
use geojson::{JsonObject, Value};
use serde_json::json;

pub const GLACIER: &str = "Test Glacier";

/// 100 x 100 box with width 100, so a left piece above height y measures 100 - y
pub fn square_box() -> ReferenceBox {
    let polygon = polygon![
        (x: 0., y: 0.),
        (x: 100., y: 0.),
        (x: 100., y: 100.),
        (x: 0., y: 100.)
    ];
    ReferenceBox::new(polygon, 100., Crs::Epsg(32627)).unwrap()
}

pub fn line_feature(year: i32, date: &str, geometry: Option<geojson::Geometry>) -> FrontLine {
    let mut properties = JsonObject::new();
    properties.insert("gl_name".to_string(), json!(GLACIER));
    properties.insert("year".to_string(), json!(year));
    properties.insert("date".to_string(), json!(date));

    FrontLine {
        glacier_name: GLACIER.to_string(),
        year,
        date: NaiveDate::parse_from_str(date, "%Y%m%d").unwrap(),
        geometry,
        properties,
    }
}

fn geometry(line: LineString) -> Option<geojson::Geometry> {
    Some(geojson::Geometry::new(Value::from(&line)))
}

/// A straight front across the box at height y, drawn towards +x
pub fn front_at(year: i32, date: &str, y: f64) -> FrontLine {
    line_feature(
        year,
        date,
        geometry(line_string![(x: -10., y: y), (x: 110., y: y)]),
    )
}

/// A front across the box at height y whose digitized end hooks back
/// under the right edge, so its prolongation clips the lower right corner
pub fn hooked_front_at(year: i32, date: &str, y: f64) -> FrontLine {
    line_feature(
        year,
        date,
        geometry(line_string![
            (x: -10., y: y),
            (x: 110., y: y),
            (x: 120., y: y - 10.),
            (x: 110., y: y - 20.)
        ]),
    )
}

/// A front that misses the box
pub fn stray_front(year: i32, date: &str) -> FrontLine {
    front_at(year, date, 150.)
}

/// A front that is not a line at all
pub fn point_front(year: i32, date: &str) -> FrontLine {
    line_feature(
        year,
        date,
        Some(geojson::Geometry::new(Value::Point(vec![50., 50.]))),
    )
}

pub fn fronts(lines: Vec<FrontLine>) -> FrontLines {
    FrontLines {
        crs: Crs::Epsg(32627),
        lines,
    }
}
