use crate::crs::Crs;

use chrono::NaiveDate;
use geojson::JsonObject;

/// One digitized front position of a glacier
#[derive(Debug, Clone, PartialEq)]
pub struct FrontLine {
    pub glacier_name: String,
    pub year: i32,
    pub date: NaiveDate,
    /// kept raw, an unreadable geometry only disqualifies this line
    pub geometry: Option<geojson::Geometry>,
    /// all attributes of the feature, carried over to the output
    pub properties: JsonObject,
}

/// All front lines of one glacier in file order
#[derive(Debug, Clone, PartialEq)]
pub struct FrontLines {
    pub crs: Crs,
    pub lines: Vec<FrontLine>,
}

impl FrontLines {
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.lines.iter().map(|l| l.year)
    }
}
