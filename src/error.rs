use thiserror::Error;

use crate::data::schema::SheetCategory;

/// Structural failures of the screening pipeline. Data-sparsity conditions
/// (no classification matches, all thresholds at 100) are valid outcomes and
/// never reported through this type.
#[derive(Debug, Error)]
pub enum Error {
    /// The column count after normalization matches no known export layout.
    #[error("unrecognized {category} sheet layout: {count} columns matches no known export variant")]
    UnrecognizedSchema {
        category: SheetCategory,
        count: usize,
    },

    /// The resolved schema lacks the identifier key column.
    #[error("resolved schema is missing the identifier column '{column}'")]
    MissingIdentifierColumn { column: &'static str },

    /// The requested worksheet does not exist in the uploaded workbook.
    #[error("worksheet '{0}' not found in workbook")]
    SheetNotFound(String),

    /// The worksheet name maps to no known sheet category.
    #[error("worksheet '{0}' is neither a domestic nor an overseas export")]
    UnknownCategory(String),

    /// The workbook bytes could not be read as an xlsx file.
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),
}
