//! CSV loading into an in-memory table.

mod reader;
mod table;

pub use reader::{
    MAX_CSV_FILE_SIZE, STRICT_TEMPLATE_HEADERS, check_file_size_with_limit, read_csv_file,
    read_csv_reader, read_csv_str, require_headers,
};
pub use table::CsvTable;
