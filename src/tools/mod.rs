mod file_manager;
mod path_validator;
mod report_writer;
mod trash_remover;
mod tree_scanner;

pub use file_manager::reveal_in_file_manager;
pub use path_validator::validate_directory_exists;
pub use report_writer::{ReportRow, write_csv_report};
pub use trash_remover::{TrashReport, move_to_trash};
pub use tree_scanner::{Entry, scan_tree};
