use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid field name: {0}")]
    InvalidField(String),

    #[error("Invalid sort expression: {0}")]
    InvalidSort(String),

    #[error("Invalid page: {0}")]
    InvalidPage(String),
}
