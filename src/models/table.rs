use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Speaker;

/// Row of the unique names list, handed out for manual name correction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub name: String,
    /// Always empty when produced; filled in by hand later
    pub correct_name: String,
}

impl NameRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            correct_name: String::new(),
        }
    }
}

/// A table cell, typed so the writer can tell text from numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Text, written quoted even when it looks like a number
    Text(String),
    /// Rendered number or boolean, written bare
    Number(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Number(s) => s,
        }
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Text(String::new()),
            Value::String(s) => Cell::Text(s.clone()),
            Value::Number(_) | Value::Bool(_) => Cell::Number(value.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// Uniform tabular view of a list of records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Conversion of a record list into a [`Table`]
pub trait ToTable {
    fn to_table(&self) -> Table;
}

impl ToTable for [NameRecord] {
    fn to_table(&self) -> Table {
        if self.is_empty() {
            return Table::default();
        }

        let mut table = Table::new(vec!["name".to_string(), "correct_name".to_string()]);
        for record in self {
            table.push_row(vec![
                Cell::text(record.name.as_str()),
                Cell::text(record.correct_name.as_str()),
            ]);
        }
        table
    }
}

impl ToTable for [Speaker] {
    /// Columns are `full_name`, `profile_url`, then every passthrough key in
    /// the order it first appears. Speakers lacking a key get an empty cell.
    fn to_table(&self) -> Table {
        if self.is_empty() {
            return Table::default();
        }

        let mut extra_columns: Vec<&str> = Vec::new();
        for speaker in self {
            for key in speaker.extra.keys() {
                if !extra_columns.contains(&key.as_str()) {
                    extra_columns.push(key);
                }
            }
        }

        let mut columns = vec!["full_name".to_string(), "profile_url".to_string()];
        columns.extend(extra_columns.iter().map(|k| k.to_string()));

        let mut table = Table::new(columns);
        for speaker in self {
            let mut row = Vec::with_capacity(2 + extra_columns.len());
            row.push(Cell::text(speaker.full_name.as_str()));
            row.push(Cell::text(speaker.profile_url.clone().unwrap_or_default()));
            for key in &extra_columns {
                let cell = speaker.extra.get(*key).map(Cell::from);
                row.push(cell.unwrap_or_else(|| Cell::text("")));
            }
            table.push_row(row);
        }
        table
    }
}
