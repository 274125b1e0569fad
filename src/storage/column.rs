use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::SchemaConfig;

use super::cell::Cell;
use super::column_error::ColumnError;
use super::data_type::DataType;

/// A named, single-kind sequence of cells.
///
/// Every mutation keeps three things in step with `cells`: the column kind,
/// the widest rendered value (`num_chars`, header included) and a cached NA
/// cell of the current kind.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Column {
    name: String,
    data_type: Option<DataType>,
    cells: Vec<Cell>,
    #[serde(skip)]
    num_chars: usize,
    #[serde(skip)]
    empty: Option<Cell>,
}

impl Column {
    /// Builds a column from `cells`, which must all be of the same kind.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Result<Self, ColumnError> {
        let mut column = Self {
            name: name.into(),
            data_type: None,
            cells: vec![],
            num_chars: 0,
            empty: None,
        };
        column.append(cells)?;
        Ok(column)
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// `None` until the column has received its first cell.
    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    pub fn cells(&self) -> &[Cell] {
        self.cells.as_ref()
    }

    pub fn get(&self, row: usize) -> Option<&Cell> {
        self.cells.get(row)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width of the widest rendered cell or of the name, in chars.
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    /// The NA cell of this column's kind.
    pub fn na_value(&self) -> Option<&Cell> {
        self.empty.as_ref()
    }

    /// Appends `cells` in order.
    ///
    /// The whole batch is checked against the column kind (or against the
    /// first cell of the batch when the column has no kind yet) before anything
    /// is stored, so a `TypeMismatch` leaves the column untouched.
    #[instrument(skip(self, cells), fields(column = %self.name))]
    pub fn append<I>(&mut self, cells: I) -> Result<(), ColumnError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells = cells.into_iter().collect::<Vec<_>>();
        let Some(first) = cells.first() else {
            self.recount_num_chars();
            return Ok(());
        };

        let expected = self.data_type.unwrap_or_else(|| first.data_type());
        if let Some(mismatch) = cells.iter().find(|cell| cell.data_type() != expected) {
            let found = mismatch.data_type();
            warn!("Rejecting {} cell on {} column", found, expected);
            return Err(ColumnError::TypeMismatch { expected, found });
        }

        self.data_type = Some(expected);
        self.empty = cells.last().map(Cell::na);
        debug!("Appending {} cells", cells.len());
        self.cells.extend(cells);
        self.recount_num_chars();

        Ok(())
    }

    /// Re-materializes every cell as `data_type`, keeping name and row count.
    /// Cells that can't be represented in the new kind become NA.
    #[instrument(skip(self), fields(column = %self.name))]
    pub fn reparse(&mut self, data_type: DataType) -> Result<(), ColumnError> {
        let cells = self
            .cells
            .iter()
            .map(|cell| cell.cast(data_type))
            .collect::<Vec<_>>();
        let parsed = Column::new(self.name.clone(), cells)?;
        debug!(from = ?self.data_type, "Parsed {} rows", parsed.len());
        *self = parsed;
        Ok(())
    }

    /// Same as [`Column::reparse`], with the kind given by name
    /// (`"string"`, `"int"`, `"float"` or `"bool"`).
    pub fn parse_column(&mut self, type_name: &str) -> Result<(), ColumnError> {
        let data_type = type_name.parse::<DataType>()?;
        self.reparse(data_type)
    }

    /// Reparses the column into the kind `schema` declares for its name.
    /// Returns whether the column was reparsed.
    pub fn conform(&mut self, schema: &SchemaConfig) -> Result<bool, ColumnError> {
        match schema.data_type_of(&self.name) {
            Some(data_type) if self.data_type != Some(data_type) => {
                self.reparse(data_type)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn has_na(&self) -> bool {
        self.cells.iter().any(Cell::is_na)
    }

    /// Per-row missing mask.
    pub fn na(&self) -> Vec<bool> {
        self.cells.iter().map(Cell::is_na).collect()
    }

    // The typed views zero-fill rows whose cell is NA or can't be coerced.
    // Use `na` to tell those rows apart.

    pub fn as_string(&self) -> Vec<String> {
        self.cells.iter().map(|cell| cell.to_string()).collect()
    }

    pub fn as_int(&self) -> Vec<i64> {
        self.cells
            .iter()
            .map(|cell| cell.to_int().unwrap_or_default())
            .collect()
    }

    pub fn as_float(&self) -> Vec<f64> {
        self.cells
            .iter()
            .map(|cell| cell.to_float().unwrap_or_default())
            .collect()
    }

    pub fn as_bool(&self) -> Vec<bool> {
        self.cells
            .iter()
            .map(|cell| cell.to_bool().unwrap_or_default())
            .collect()
    }

    fn recount_num_chars(&mut self) {
        self.num_chars = self
            .cells
            .iter()
            .map(|cell| cell.to_string().chars().count())
            .fold(self.name.chars().count(), usize::max);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Column;
    use crate::config::{ColumnConfig, DataTypeConfig, SchemaConfig};
    use crate::storage::{cell::Cell, column_error::ColumnError, data_type::DataType};

    pub fn initialize() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn age_column() -> Column {
        Column::new("age", vec!["5".into(), "7".into(), Cell::String(None)]).unwrap()
    }

    #[test]
    fn empty_column_has_no_kind() {
        initialize();
        let column = Column::new("points", vec![]).unwrap();

        assert_eq!(column.data_type(), None);
        assert!(column.is_empty());
        assert_eq!(column.num_chars(), "points".len());
        assert_eq!(column.na_value(), None);
        assert!(!column.has_na());
        assert!(column.na().is_empty());
    }

    #[test]
    fn reject_construction_from_mixed_cells() {
        initialize();
        let result = Column::new("mixed", vec![Cell::from(1i64), Cell::from("1")]);
        assert_eq!(
            result,
            Err(ColumnError::TypeMismatch {
                expected: DataType::Int,
                found: DataType::String
            })
        );
    }

    #[test]
    fn kind_is_taken_from_the_first_cell() {
        initialize();
        let mut column = Column::new("flags", vec![]).unwrap();
        column.append(vec![Cell::Boolean(None), Cell::from(true)]).unwrap();

        assert_eq!(column.data_type(), Some(DataType::Boolean));
        assert_eq!(column.na_value(), Some(&Cell::Boolean(None)));
    }

    #[test]
    fn rejected_append_leaves_column_untouched() {
        initialize();
        let mut column = Column::new("points", vec![Cell::from(1i64)]).unwrap();
        let before = column.clone();

        let result = column.append(vec![Cell::from(2i64), Cell::from(3.5), Cell::from(4i64)]);

        assert!(
            matches!(result, Err(ColumnError::TypeMismatch { .. })),
            "Was expecting TypeMismatch. Got {:?}",
            result
        );
        assert_eq!(column, before, "was expecting no appended cells, found: {:?}", column.cells());
    }

    #[test]
    fn empty_append_refreshes_width_only() {
        initialize();
        let mut column = Column::new("id", vec![Cell::from(12345i64)]).unwrap();
        column.append(Vec::<Cell>::new()).unwrap();

        assert_eq!(column.len(), 1);
        assert_eq!(column.num_chars(), 5);
    }

    #[test]
    fn num_chars_tracks_widest_value() {
        initialize();
        let mut column = Column::new("name", vec!["ab".into()]).unwrap();
        assert_eq!(column.num_chars(), 4);

        column.append(vec!["abcdefg".into()]).unwrap();
        assert_eq!(column.num_chars(), 7);

        column.append(vec!["çççççççç".into()]).unwrap();
        assert_eq!(column.num_chars(), 8, "Expected width to be counted in chars");
    }

    #[test]
    fn na_introspection() {
        initialize();
        let column = age_column();

        assert!(column.has_na());
        assert_eq!(column.na(), vec![false, false, true]);
        assert_eq!(column.as_string(), vec!["5", "7", "NA"]);
    }

    #[test]
    fn reparse_string_column_to_int() {
        initialize();
        let mut column = age_column();
        column.reparse(DataType::Int).unwrap();

        assert_eq!(column.name(), "age");
        assert_eq!(column.data_type(), Some(DataType::Int));
        assert_eq!(
            column.cells(),
            &[Cell::Int(Some(5)), Cell::Int(Some(7)), Cell::Int(None)]
        );
        assert_eq!(column.as_int(), vec![5, 7, 0]);
        assert_eq!(column.na_value(), Some(&Cell::Int(None)));
    }

    #[test]
    fn append_float_to_parsed_int_column_fails() {
        initialize();
        let mut column = age_column();
        column.parse_column("int").unwrap();

        let result = column.append(vec![Cell::from(1.5)]);

        assert!(result.is_err(), "Was expecting error on append. Got {:?}", result);
        assert_eq!(column.len(), 3);
        assert_eq!(column.data_type(), Some(DataType::Int));
    }

    #[test]
    fn reparse_turns_unrepresentable_values_into_na() {
        initialize();
        let mut column = Column::new("raw", vec!["1".into(), "x".into(), "0".into()]).unwrap();
        column.parse_column("bool").unwrap();

        assert_eq!(column.na(), vec![false, true, false]);
        assert_eq!(column.as_bool(), vec![true, false, false]);
    }

    #[test]
    fn reparse_to_float_and_back_to_string() {
        initialize();
        let mut column = Column::new("score", vec![Cell::from(2i64), Cell::Int(None)]).unwrap();
        column.reparse(DataType::Float).unwrap();
        assert_eq!(column.as_float(), vec![2.0, 0.0]);

        column.reparse(DataType::String).unwrap();
        assert_eq!(column.cells(), &[Cell::from("2"), Cell::String(None)]);
    }

    #[test]
    fn reject_unsupported_parse_type() {
        initialize();
        let mut column = age_column();
        let before = column.clone();

        let result = column.parse_column("date");

        assert_eq!(result, Err(ColumnError::UnsupportedType("date".into())));
        assert_eq!(column, before);
    }

    #[test]
    fn reject_parse_type_with_wrong_case() {
        initialize();
        let mut column = Column::new("age", vec!["5".into()]).unwrap();

        let result = column.parse_column("Int");

        assert_eq!(result, Err(ColumnError::UnsupportedType("Int".into())));
        assert_eq!(
            column.data_type(),
            Some(DataType::String),
            "was expecting column to keep its kind, found: {:?}",
            column.cells()
        );
    }

    #[test]
    fn copy_is_independent_of_source() {
        initialize();
        let source = age_column();
        let mut copy = source.clone();

        copy.reparse(DataType::Int).unwrap();
        copy.append(vec![Cell::from(9i64)]).unwrap();

        assert_eq!(source.data_type(), Some(DataType::String));
        assert_eq!(source.as_string(), vec!["5", "7", "NA"]);
        assert_eq!(source.na_value(), Some(&Cell::String(None)));
        assert_eq!(copy.len(), 4);
    }

    #[test]
    fn conform_reparses_columns_named_in_schema() {
        initialize();
        let schema = SchemaConfig {
            columns: vec![ColumnConfig {
                name: "age".into(),
                data_type: DataTypeConfig::Int,
            }],
        };

        let mut age = age_column();
        assert!(age.conform(&schema).unwrap());
        assert_eq!(age.data_type(), Some(DataType::Int));
        assert!(!age.conform(&schema).unwrap(), "Expected no reparse once kinds match");

        let mut other = Column::new("city", vec!["Berlin".into()]).unwrap();
        assert!(!other.conform(&schema).unwrap());
        assert_eq!(other.data_type(), Some(DataType::String));
    }

    #[test]
    fn serializes_to_json_view() {
        let column = Column::new("ok", vec![Cell::from(true), Cell::Boolean(None)]).unwrap();
        let value = serde_json::to_value(&column).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "ok",
                "data_type": "Boolean",
                "cells": [{ "Boolean": true }, { "Boolean": null }]
            })
        );
    }
}
