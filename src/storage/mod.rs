pub mod cell;
pub mod column;
pub mod column_error;
pub mod data_type;
