use std::path::PathBuf;

use clap::Parser;

use glacier_fronts::{
    glacier::BoxOrientation,
    parameters::{FileParameters, MeasureParameters},
};

/// Measure glacier front positions by splitting reference boxes along dated front lines
#[derive(Parser, Clone, Debug)]
pub struct Args {
    /// Folder of reference boxes, one GeoJSON file per glacier
    pub boxes_path: PathBuf,

    /// Folder of front lines, file names must match the box files
    pub lines_path: PathBuf,

    /// Output folder, created if it doesn't exist
    pub outpath: PathBuf,

    /// Write the measured pieces with their measurements to GeoJSON
    #[clap(short, long, action)]
    pub write: bool,

    /// Draw the measured pieces of every glacier to an SVG image
    #[clap(long, action)]
    pub write_result_images: bool,

    /// Graph the relative front positions of every glacier
    #[clap(long, action)]
    pub write_graphs: bool,

    /// Collect the relative front positions of all glaciers in one csv file
    #[clap(long, action)]
    pub write_csv: bool,

    /// Measure the piece right of the front lines instead of the left
    #[clap(short, long, action)]
    pub invert: bool,

    /// Log every skipped line and split
    #[clap(short, long, action)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_cli() -> Args {
        Args::parse()
    }

    pub fn parameters(&self) -> (FileParameters, MeasureParameters) {
        let files = FileParameters {
            boxes_dir: self.boxes_path.clone(),
            lines_dir: self.lines_path.clone(),
            output_dir: self.outpath.clone(),
        };

        let params = MeasureParameters {
            orientation: BoxOrientation::from_invert(self.invert),
            write_results: self.write,
            write_result_images: self.write_result_images,
            write_graphs: self.write_graphs,
            write_csv: self.write_csv,
        };

        (files, params)
    }
}
