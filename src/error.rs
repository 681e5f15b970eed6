use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("input file contains no data rows: {0}")]
    EmptyInput(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("template layout error: {0}")]
    TemplateLayout(String),

    #[error("failed to read input workbook: {0}")]
    InputRead(#[from] calamine::XlsxError),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("failed to write output workbook: {0}")]
    OutputWrite(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
