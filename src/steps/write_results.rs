use crate::{
    crs::Crs,
    glacier::{GlacierTimeSeries, MeasurementRecord},
};

use geojson::{Feature, FeatureCollection, JsonValue, Value};
use log::info;

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

pub const MEASUREMENT_FIELD: &str = "measurement";
pub const RELATIVE_POSITION_FIELD: &str = "rel_posn";

/// Writes the measured pieces with the attributes of their front lines.
///
/// The collection is written next to the target and moved into place when
/// complete, so a failed write never leaves a partial file behind
pub fn write_results(path: &Path, series: &GlacierTimeSeries, crs: &Crs) -> crate::Result<()> {
    let collection = FeatureCollection {
        bbox: None,
        features: series.records.iter().map(result_feature).collect(),
        foreign_members: Some(crs.to_foreign_members()),
    };

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".partial");
    let temp_path = Path::new(&temp_name);

    let written = write_collection(temp_path, &collection)
        .and_then(|_| fs::rename(temp_path, path).map_err(Into::into));

    if written.is_err() && temp_path.exists() {
        // the original error is the one worth reporting
        let _ = fs::remove_file(temp_path);
    }
    written?;

    info!(
        "Wrote {} measured fronts to {}",
        series.len(),
        path.display()
    );
    Ok(())
}

fn write_collection(path: &Path, collection: &FeatureCollection) -> crate::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, collection)?;
    writer.flush()?;
    Ok(())
}

fn result_feature(record: &MeasurementRecord) -> Feature {
    let mut properties = record.properties.clone();
    properties.insert(
        MEASUREMENT_FIELD.to_string(),
        JsonValue::from(record.measurement),
    );
    properties.insert(
        RELATIVE_POSITION_FIELD.to_string(),
        JsonValue::from(record.relative_position),
    );

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(Value::from(&record.piece))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
