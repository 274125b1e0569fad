//! NA-aware, single-kind columns: the storage unit of a data frame.

pub mod config;
pub mod storage;

pub use config::{ColumnConfig, ConfigError, Configurator, DataTypeConfig, SchemaConfig};
pub use storage::cell::Cell;
pub use storage::column::Column;
pub use storage::column_error::ColumnError;
pub use storage::data_type::DataType;
