use crate::glacier::GlacierTimeSeries;

use log::info;
use serde::Serialize;

use std::{fs::File, io::Write, path::Path};

#[derive(Serialize)]
struct FrontChangeRow<'a> {
    date: String,
    rel_posn: i64,
    glacier: &'a str,
}

/// One row per measurement of every glacier, glaciers in processing order
pub fn write_front_changes<W: Write>(
    series: &[GlacierTimeSeries],
    writer: W,
) -> crate::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(["date", "rel_posn", "glacier"])?;

    for glacier in series {
        for record in &glacier.records {
            writer.serialize(FrontChangeRow {
                date: record.date.format("%Y-%m-%d").to_string(),
                rel_posn: record.relative_position,
                glacier: &glacier.glacier,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn export_csv(path: &Path, series: &[GlacierTimeSeries]) -> crate::Result<()> {
    info!("Writing csv to {}...", path.display());
    write_front_changes(series, File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{glacier::BoxOrientation, steps::measure_fronts, test_fixtures::*};

    #[test]
    fn test_csv_rows() {
        let lines = fronts(vec![
            front_at(2010, "20100901", 70.),
            front_at(2000, "20000815", 50.),
        ]);
        let series = measure_fronts(&square_box(), &lines, BoxOrientation::Left)
            .unwrap()
            .series;

        let mut buffer = Vec::new();
        write_front_changes(&[series], &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "date,rel_posn,glacier\n\
             2000-08-15,0,Test Glacier\n\
             2010-09-01,-20,Test Glacier\n"
        );
    }

    #[test]
    fn test_empty_series_has_only_header() {
        let series = GlacierTimeSeries {
            glacier: GLACIER.to_string(),
            anchor: None,
            records: vec![],
        };

        let mut buffer = Vec::new();
        write_front_changes(&[series], &mut buffer).unwrap();

        assert_eq!(buffer, b"date,rel_posn,glacier\n");
    }
}
