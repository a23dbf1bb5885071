use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{ReportError, Result};
use crate::layout::{Cell, CellValue};

/// One sheet of a workbook, as raw cells at their absolute positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl SheetGrid {
    /// Text or number found at `(row, col)`, if any.
    pub fn get(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|cell| cell.row == row && cell.col == col)
            .map(|cell| &cell.value)
    }
}

/// Reads the name and contents of the first sheet in `path`. Every row is
/// treated as data; nothing is interpreted as a header.
pub fn read_first_sheet(path: &Path) -> Result<SheetGrid> {
    read_sheet_at(path, 0)
}

/// Reads the sheet at position `index` in `path`.
pub fn read_sheet_at(path: &Path, index: usize) -> Result<SheetGrid> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let name = workbook
        .sheet_names()
        .get(index)
        .cloned()
        .ok_or_else(|| {
            ReportError::InvalidWorkbook(format!("{} has no sheet {index}", path.display()))
        })?;

    let range = workbook
        .worksheet_range_at(index)
        .ok_or_else(|| ReportError::InvalidWorkbook(format!("missing sheet '{name}'")))?
        .map_err(ReportError::from)?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let out_of_bounds =
        || ReportError::InvalidWorkbook(format!("cell outside sheet bounds in '{name}'"));

    let mut cells = Vec::new();
    for (row, col, data) in range.cells() {
        let Some(value) = cell_value(data) else {
            continue;
        };
        let row = u32::try_from(row)
            .ok()
            .and_then(|row| row.checked_add(start_row))
            .ok_or_else(out_of_bounds)?;
        let col = u32::try_from(col)
            .ok()
            .and_then(|col| u16::try_from(col + start_col).ok())
            .ok_or_else(out_of_bounds)?;
        cells.push(Cell { row, col, value });
    }

    Ok(SheetGrid { name, cells })
}

fn cell_value(cell: &DataType) -> Option<CellValue> {
    match cell {
        DataType::Empty => None,
        DataType::String(value) => Some(CellValue::Text(value.clone())),
        DataType::Float(value) => Some(CellValue::Number(*value)),
        DataType::Int(value) => Some(CellValue::Number(*value as f64)),
        DataType::Bool(value) => Some(CellValue::Bool(*value)),
        other => Some(CellValue::Text(other.to_string())),
    }
}
