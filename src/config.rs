use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::storage::data_type::DataType;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON Error")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("IO Error")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub enum DataTypeConfig {
    Int,
    Float,
    String,
    Boolean,
}

/// Declares the kind each named column should be parsed into.
#[derive(Deserialize, Debug)]
pub struct SchemaConfig {
    pub columns: Vec<ColumnConfig>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ColumnConfig {
    pub name: String,
    pub data_type: DataTypeConfig,
}

impl SchemaConfig {
    pub fn data_type_of(&self, column_name: &str) -> Option<DataType> {
        self.columns
            .iter()
            .find(|column| column.name == column_name)
            .map(|column| column.data_type.to_owned().into())
    }
}

#[derive(Debug)]
pub struct Configurator {
    root_path: String,
}

impl Configurator {
    #[instrument]
    pub fn new(root_path: &str) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    #[instrument]
    pub fn load(&self) -> Result<SchemaConfig, ConfigError> {
        let schema_json_path = Path::new(&self.root_path).join("schema.json");
        let data = fs::read_to_string(schema_json_path)?;
        let schema: SchemaConfig = serde_json::from_str(&data)?;
        info!("Loaded configuration: {:?}", schema);
        Ok(schema)
    }
}
