use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read the uploaded file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the uploaded table: {0}")]
    Parse(#[from] csv::Error),

    #[error("Missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid value in column '{column}' on row {row}: {message}")]
    InvalidField {
        row: usize,
        column: &'static str,
        message: String,
    },
}
