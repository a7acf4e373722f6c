pub mod export_csv;
pub mod measure_fronts;
pub mod plot_fronts;
pub mod read_vectors;
pub mod run_batch;
pub mod write_results;

pub use self::export_csv::{export_csv, write_front_changes};
pub use self::measure_fronts::measure_fronts;
pub use self::plot_fronts::{write_graph, write_result_image};
pub use self::read_vectors::{read_front_lines, read_reference_box};
pub use self::run_batch::{run_batch, BatchReport, GlacierFailure};
pub use self::write_results::write_results;
