//! `Table` - an ordered sequence of fixed-length records conforming to a
//! named ttype (§3 "Table").
//!
//! Per the design notes (§9 "Record storage"): records are stored as one
//! flat `Vec<Value>` of `|fields| x rows` cells rather than a vector of
//! row vectors, so scanning a table column-major or row-major stays
//! cache-friendly and doesn't chase an extra pointer per row.

use crate::value::Value;
use uxf_util::Symbol;

#[derive(Clone, Debug, PartialEq)]
pub struct UxfTable {
    pub ttype: Symbol,
    pub comment: Option<String>,
    ncols: usize,
    cells: Vec<Value>,
}

/// Raised when a record's length doesn't match the table's `ttype`
/// (Invariant I5; §7 "Structural ... table record-length mismatch").
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("record has {got} cells, expected {expected}")]
pub struct RecordLenMismatch {
    pub got: usize,
    pub expected: usize,
}

impl UxfTable {
    /// Create an empty table for a ttype with `ncols` fields (0 for a
    /// fieldless/enumeration ttype).
    pub fn new(ttype: Symbol, ncols: usize) -> Self {
        Self {
            ttype,
            comment: None,
            ncols,
            cells: Vec::new(),
        }
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn nrows(&self) -> usize {
        if self.ncols == 0 {
            0
        } else {
            self.cells.len() / self.ncols
        }
    }

    /// Append one record. Errors if `row.len() != ncols()` (Invariant I5).
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), RecordLenMismatch> {
        if row.len() != self.ncols {
            return Err(RecordLenMismatch {
                got: row.len(),
                expected: self.ncols,
            });
        }
        self.cells.extend(row);
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        if col >= self.ncols || row >= self.nrows() {
            return None;
        }
        self.cells.get(row * self.ncols + col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Value> {
        let ncols = self.ncols;
        if col >= ncols {
            return None;
        }
        self.cells.get_mut(row * ncols + col)
    }

    /// Iterate rows as `&[Value]` slices of length `ncols()`.
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.cells.chunks(self.ncols.max(1)).take(self.nrows())
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ttype() -> Symbol {
        Symbol::intern("PriceList")
    }

    #[test]
    fn push_row_tracks_rows_and_cols() {
        let mut table = UxfTable::new(ttype(), 2);
        table.push_row(vec![Value::Int(1), Value::Str("a".into())]).unwrap();
        table.push_row(vec![Value::Int(2), Value::Str("b".into())]).unwrap();
        assert_eq!(table.ncols(), 2);
        assert_eq!(table.nrows(), 2);
        assert_eq!(table.get(1, 1), Some(&Value::Str("b".into())));
    }

    #[test]
    fn push_row_rejects_wrong_length() {
        let mut table = UxfTable::new(ttype(), 2);
        let err = table.push_row(vec![Value::Int(1)]).unwrap_err();
        assert_eq!(err, RecordLenMismatch { got: 1, expected: 2 });
    }

    #[test]
    fn fieldless_table_has_zero_rows() {
        let table = UxfTable::new(Symbol::intern("Suit"), 0);
        assert_eq!(table.nrows(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn rows_iterator_yields_each_record() {
        let mut table = UxfTable::new(ttype(), 2);
        table.push_row(vec![Value::Int(1), Value::Int(2)]).unwrap();
        table.push_row(vec![Value::Int(3), Value::Int(4)]).unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], [Value::Int(1), Value::Int(2)]);
        assert_eq!(rows[1], [Value::Int(3), Value::Int(4)]);
    }
}
