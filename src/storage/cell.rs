use std::fmt::Display;

use serde::Serialize;

use super::data_type::DataType;

const NA: &str = "NA";

/// A single NA-aware value. `None` inside a variant is the missing value of that kind.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum Cell {
    Int(Option<i64>),
    Float(Option<f64>),
    String(Option<String>),
    Boolean(Option<bool>),
}

impl Cell {
    pub fn from_json_value(json_value: &serde_json::Value) -> Option<Self> {
        match json_value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(bool) => Some(Cell::Boolean(Some(*bool))),
            serde_json::Value::Number(num) => match num.as_i64() {
                Some(int) => Some(Cell::Int(Some(int))),
                None => num.as_f64().map(|float| Cell::Float(Some(float))),
            },
            serde_json::Value::String(str) => Some(Cell::String(Some(str.into()))),
            serde_json::Value::Array(_) => None,
            serde_json::Value::Object(_) => None,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Cell::Int(_) => DataType::Int,
            Cell::Float(_) => DataType::Float,
            Cell::String(_) => DataType::String,
            Cell::Boolean(_) => DataType::Boolean,
        }
    }

    pub fn is_na(&self) -> bool {
        match self {
            Cell::Int(val) => val.is_none(),
            Cell::Float(val) => val.is_none(),
            Cell::String(val) => val.is_none(),
            Cell::Boolean(val) => val.is_none(),
        }
    }

    /// The missing value of this cell's kind.
    pub fn na(&self) -> Cell {
        Cell::na_of(self.data_type())
    }

    pub fn na_of(data_type: DataType) -> Cell {
        match data_type {
            DataType::Int => Cell::Int(None),
            DataType::Float => Cell::Float(None),
            DataType::String => Cell::String(None),
            DataType::Boolean => Cell::Boolean(None),
        }
    }

    pub fn to_int(&self) -> Option<i64> {
        match self {
            Cell::Int(val) => *val,
            Cell::Float(val) => val.and_then(|f| {
                if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Some(f.trunc() as i64)
                } else {
                    None
                }
            }),
            Cell::String(val) => val.as_deref().and_then(|s| s.parse::<i64>().ok()),
            Cell::Boolean(val) => val.map(i64::from),
        }
    }

    pub fn to_float(&self) -> Option<f64> {
        match self {
            Cell::Int(val) => val.map(|i| i as f64),
            Cell::Float(val) => *val,
            Cell::String(val) => val.as_deref().and_then(|s| s.parse::<f64>().ok()),
            Cell::Boolean(val) => val.map(|b| if b { 1.0 } else { 0.0 }),
        }
    }

    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Cell::Int(val) => match val {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Cell::Float(val) => match val {
                Some(f) if *f == 0.0 => Some(false),
                Some(f) if *f == 1.0 => Some(true),
                _ => None,
            },
            Cell::String(val) => val.as_deref().and_then(parse_bool),
            Cell::Boolean(val) => *val,
        }
    }

    /// Converts this cell into a cell of `data_type`. Values that can't be
    /// represented in the target kind become NA of that kind.
    pub fn cast(&self, data_type: DataType) -> Cell {
        match data_type {
            DataType::String if self.is_na() => Cell::String(None),
            DataType::String => Cell::String(Some(self.to_string())),
            DataType::Int => Cell::Int(self.to_int()),
            DataType::Float => Cell::Float(self.to_float()),
            DataType::Boolean => Cell::Boolean(self.to_bool()),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Int(Some(val)) => write!(f, "{}", val),
            Cell::Float(Some(val)) => write!(f, "{}", val),
            Cell::String(Some(val)) => write!(f, "{}", val),
            Cell::Boolean(Some(val)) => write!(f, "{}", val),
            _ => write!(f, "{}", NA),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(Some(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(Some(value))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Boolean(Some(value))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(Some(value.to_string()))
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::String(Some(value))
    }
}
