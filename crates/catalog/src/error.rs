use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("nothing to export: no records match the current filters")]
    EmptyExport,

    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("{dataset}: record {index} is missing required field `{field}`")]
    MissingField {
        dataset: String,
        index: usize,
        field: String,
    },

    #[error("Serialization error: {0}")]
    Ser(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
