use crate::glacier::BoxOrientation;

use std::path::PathBuf;

/// What to measure and which outputs to produce, every switch is independent
#[derive(Clone, Debug, Default)]
pub struct MeasureParameters {
    pub orientation: BoxOrientation,

    pub write_results: bool,
    pub write_result_images: bool,
    pub write_graphs: bool,
    pub write_csv: bool,
}

#[derive(Clone, Debug)]
pub struct FileParameters {
    pub boxes_dir: PathBuf,
    pub lines_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for FileParameters {
    fn default() -> Self {
        Self {
            boxes_dir: PathBuf::from("boxes"),
            lines_dir: PathBuf::from("lines"),
            output_dir: PathBuf::from("."),
        }
    }
}

impl FileParameters {
    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join("images")
    }

    pub fn graphs_dir(&self) -> PathBuf {
        self.output_dir.join("graphs")
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.output_dir.join("csv")
    }
}
