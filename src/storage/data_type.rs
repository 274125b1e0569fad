use std::fmt::Display;
use std::str::FromStr;

use crate::config::DataTypeConfig;

use serde::{Deserialize, Serialize};

use super::column_error::ColumnError;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum DataType {
    Int,
    Float,
    String,
    Boolean,
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Int => write!(f, "int"),
            DataType::Float => write!(f, "float"),
            DataType::String => write!(f, "string"),
            DataType::Boolean => write!(f, "bool"),
        }
    }
}

/// Parses the type names accepted by [`Column::parse_column`](super::column::Column::parse_column).
impl FromStr for DataType {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(DataType::Int),
            "float" => Ok(DataType::Float),
            "string" => Ok(DataType::String),
            "bool" => Ok(DataType::Boolean),
            _ => Err(ColumnError::UnsupportedType(s.to_string())),
        }
    }
}

impl From<DataTypeConfig> for DataType {
    fn from(value: DataTypeConfig) -> Self {
        match value {
            DataTypeConfig::Int => DataType::Int,
            DataTypeConfig::Float => DataType::Float,
            DataTypeConfig::String => DataType::String,
            DataTypeConfig::Boolean => DataType::Boolean,
        }
    }
}
