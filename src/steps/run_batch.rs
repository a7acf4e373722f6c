use crate::{
    glacier::{Diagnostic, FrontMeasurement, GlacierTimeSeries},
    parameters::{FileParameters, MeasureParameters},
    steps, Error,
};

use log::{error, info, warn};

use std::{
    fs,
    path::{Path, PathBuf},
};

const VECTOR_EXTENSIONS: [&str; 2] = ["geojson", "json"];
pub const CSV_FILE_NAME: &str = "glacier_frontal_changes.csv";

/// A glacier that could not be processed
#[derive(Debug)]
pub struct GlacierFailure {
    pub box_file: PathBuf,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub series: Vec<GlacierTimeSeries>,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<GlacierFailure>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.series.len() + self.failures.len()
    }

    /// Series without an anchor are flagged, they hold no positions
    pub fn unanchored(&self) -> usize {
        self.series.iter().filter(|s| s.anchor.is_none()).count()
    }

    pub fn measured(&self) -> usize {
        self.series.len() - self.unanchored()
    }

    /// True if glaciers were attempted and not a single one was measured
    pub fn all_failed(&self) -> bool {
        self.attempted() > 0 && self.measured() == 0
    }
}

/// Processes every glacier with a box file, one after the other.
/// A glacier that fails is reported and skipped, only an unreadable
/// box directory or a failed csv export stops the batch
pub fn run_batch(
    file_params: &FileParameters,
    params: &MeasureParameters,
) -> crate::Result<BatchReport> {
    let box_files = find_box_files(&file_params.boxes_dir)?;
    info!(
        "Found {} box files in {}",
        box_files.len(),
        file_params.boxes_dir.display()
    );

    let mut report = BatchReport::default();

    for box_file in box_files {
        match process_glacier(&box_file, file_params, params) {
            Ok(measurement) => {
                report.diagnostics.extend(measurement.diagnostics);
                report.series.push(measurement.series);
            }
            Err(e) => {
                error!("Error processing {}: {e}", box_file.display());
                report.failures.push(GlacierFailure { box_file, error: e });
            }
        }
    }

    if params.write_csv {
        let csv_dir = file_params.csv_dir();
        fs::create_dir_all(&csv_dir)?;
        steps::export_csv(&csv_dir.join(CSV_FILE_NAME), &report.series)?;
    }

    Ok(report)
}

fn process_glacier(
    box_file: &Path,
    file_params: &FileParameters,
    params: &MeasureParameters,
) -> crate::Result<FrontMeasurement> {
    let lines_file = match box_file.file_name() {
        Some(name) => file_params.lines_dir.join(name),
        None => box_file.to_path_buf(),
    };

    let reference_box = steps::read_reference_box(box_file)?;
    let front_lines = steps::read_front_lines(&lines_file)?;

    if reference_box.crs.is_geographic() {
        warn!(
            "{} is in the geographic {} ({}), measurements will not be in metres",
            box_file.display(),
            reference_box.crs,
            reference_box.crs.description().unwrap_or("unnamed")
        );
    }

    let measurement = steps::measure_fronts(&reference_box, &front_lines, params.orientation)?;
    let series = &measurement.series;

    if series.is_empty() {
        warn!("{}: no measurements, skipping outputs", series.glacier);
        return Ok(measurement);
    }

    if params.write_results {
        fs::create_dir_all(&file_params.output_dir)?;
        let path = file_params.output_dir.join(result_file_name(&series.glacier));
        steps::write_results(&path, series, &reference_box.crs)?;
    }
    if params.write_result_images {
        let dir = file_params.images_dir();
        fs::create_dir_all(&dir)?;
        steps::write_result_image(&dir.join(image_file_name(&series.glacier)), series)?;
    }
    if params.write_graphs {
        let dir = file_params.graphs_dir();
        fs::create_dir_all(&dir)?;
        steps::write_graph(&dir.join(graph_file_name(&series.glacier)), series)?;
    }

    Ok(measurement)
}

/// Box files sorted by name, so batches run in a reproducible order
pub fn find_box_files(dir: &Path) -> crate::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_vector = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| VECTOR_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));

        if path.is_file() && is_vector {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// "Solheimajokull Glacier" becomes "solheimajokull_boxresults.geojson"
pub fn result_file_name(glacier: &str) -> String {
    let lower = glacier.to_lowercase();
    let stem = lower.split(" glaci").next().unwrap_or(&lower).trim();
    format!("{}_boxresults.geojson", stem.replace(' ', "_"))
}

pub fn graph_file_name(glacier: &str) -> String {
    format!(
        "{}_frontal_change.svg",
        glacier.to_lowercase().replace(' ', "_")
    )
}

pub fn image_file_name(glacier: &str) -> String {
    format!("{glacier}.svg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{ConfigurationError, MeasurementError},
        glacier::BoxOrientation,
    };

    fn box_json(epsg: u32) -> String {
        format!(
            r#"{{
                "type": "FeatureCollection",
                "crs": {{ "type": "name", "properties": {{ "name": "EPSG:{epsg}" }} }},
                "features": [{{
                    "type": "Feature",
                    "properties": {{ "width": 100 }},
                    "geometry": {{
                        "type": "Polygon",
                        "coordinates": [[[0, 0], [100, 0], [100, 100], [0, 100], [0, 0]]]
                    }}
                }}]
            }}"#
        )
    }

    fn lines_json(name: &str, fronts: &[(i32, &str, f64)]) -> String {
        let features: Vec<String> = fronts
            .iter()
            .map(|(year, date, y)| {
                format!(
                    r#"{{
                        "type": "Feature",
                        "properties": {{ "gl_name": "{name}", "year": {year}, "date": "{date}" }},
                        "geometry": {{ "type": "LineString", "coordinates": [[-10, {y}], [110, {y}]] }}
                    }}"#
                )
            })
            .collect();

        format!(
            r#"{{
                "type": "FeatureCollection",
                "crs": {{ "type": "name", "properties": {{ "name": "EPSG:32627" }} }},
                "features": [{}]
            }}"#,
            features.join(",")
        )
    }

    fn batch_dirs(test: &str) -> FileParameters {
        let root = std::env::temp_dir().join(format!(
            "glacier_fronts_batch_{test}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);

        let file_params = FileParameters {
            boxes_dir: root.join("boxes"),
            lines_dir: root.join("lines"),
            output_dir: root.join("out"),
        };
        fs::create_dir_all(&file_params.boxes_dir).unwrap();
        fs::create_dir_all(&file_params.lines_dir).unwrap();
        file_params
    }

    fn add_glacier(file_params: &FileParameters, file: &str, box_epsg: u32, lines: String) {
        fs::write(file_params.boxes_dir.join(file), box_json(box_epsg)).unwrap();
        fs::write(file_params.lines_dir.join(file), lines).unwrap();
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            result_file_name("Solheimajokull Glacier"),
            "solheimajokull_boxresults.geojson"
        );
        assert_eq!(
            result_file_name("Breidamerkurjokull glacier"),
            "breidamerkurjokull_boxresults.geojson"
        );
        assert_eq!(result_file_name("Kviarjokull"), "kviarjokull_boxresults.geojson");
        assert_eq!(
            graph_file_name("Falljokull Glacier"),
            "falljokull_glacier_frontal_change.svg"
        );
    }

    #[test]
    fn test_crs_mismatch_does_not_stop_batch() {
        let file_params = batch_dirs("mismatch");
        add_glacier(
            &file_params,
            "a_glacier.geojson",
            3057,
            lines_json("Mismatch Glacier", &[(2000, "20000815", 50.)]),
        );
        add_glacier(
            &file_params,
            "b_glacier.geojson",
            32627,
            lines_json(
                "Good Glacier",
                &[(2010, "20100901", 70.), (2000, "20000815", 50.)],
            ),
        );
        let params = MeasureParameters {
            write_results: true,
            write_csv: true,
            ..Default::default()
        };

        let report = run_batch(&file_params, &params).unwrap();

        assert_eq!(report.attempted(), 2);
        assert_eq!(report.measured(), 1);
        assert!(!report.all_failed());
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            Error::ConfigurationError(ConfigurationError::CrsMismatch { .. })
        ));

        assert_eq!(report.series.len(), 1);
        let positions: Vec<i64> = report.series[0]
            .records
            .iter()
            .map(|r| r.relative_position)
            .collect();
        assert_eq!(positions, vec![0, -20]);

        assert!(file_params
            .output_dir
            .join("good_boxresults.geojson")
            .exists());
        let csv = fs::read_to_string(file_params.csv_dir().join(CSV_FILE_NAME)).unwrap();
        assert_eq!(
            csv,
            "date,rel_posn,glacier\n2000-08-15,0,Good Glacier\n2010-09-01,-20,Good Glacier\n"
        );
    }

    #[test]
    fn test_missing_lines_file_is_glacier_failure() {
        let file_params = batch_dirs("missing_lines");
        fs::write(file_params.boxes_dir.join("lonely.geojson"), box_json(32627)).unwrap();
        fs::write(file_params.boxes_dir.join("notes.txt"), "not a box").unwrap();

        let report = run_batch(&file_params, &MeasureParameters::default()).unwrap();

        assert_eq!(report.attempted(), 1);
        assert!(report.all_failed());
        assert!(matches!(report.failures[0].error, Error::IoError(_)));
    }

    #[test]
    fn test_unanchored_glacier_is_reported() {
        let file_params = batch_dirs("unanchored");
        add_glacier(
            &file_params,
            "stray.geojson",
            32627,
            lines_json("Stray Glacier", &[(2000, "20000815", 150.)]),
        );
        let params = MeasureParameters {
            orientation: BoxOrientation::Right,
            write_results: true,
            ..Default::default()
        };

        let report = run_batch(&file_params, &params).unwrap();

        assert!(report.failures.is_empty());
        assert!(report.series[0].is_empty());
        assert_eq!(report.unanchored(), 1);
        assert_eq!(report.measured(), 0);
        assert!(report.all_failed());
        assert_eq!(
            report.diagnostics.last().map(|d| &d.error),
            Some(&MeasurementError::MissingAnchor)
        );
        assert!(!file_params
            .output_dir
            .join("stray_boxresults.geojson")
            .exists());
    }
}
