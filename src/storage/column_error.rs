use thiserror::Error;

use super::data_type::DataType;

#[derive(Error, Debug, PartialEq)]
pub enum ColumnError {
    #[error("Can't have elements of different type on the same column. Expected {expected}, Got {found}")]
    TypeMismatch { expected: DataType, found: DataType },
    #[error("Can't parse the given type: {0}")]
    UnsupportedType(String),
}
