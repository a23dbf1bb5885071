use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::error::Result;
use crate::io::excel_read::SheetGrid;
use crate::layout::{Cell, CellValue, ReportSheet};

/// Writes an organization report to `path`, replacing any existing file.
pub fn write_report(path: &Path, report: &ReportSheet) -> Result<()> {
    ensure_parent(path)?;

    let mut workbook = Workbook::new();
    let title_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&report.sheet_name)?;

    for title in &report.titles {
        worksheet.merge_range(
            title.row,
            title.first_col,
            title.row,
            title.last_col,
            &title.text,
            &title_format,
        )?;
    }

    write_cells(worksheet, &report.cells)?;

    workbook.save(path)?;
    Ok(())
}

/// Writes each grid as its own sheet, in order, to a single workbook.
pub fn write_sheets(path: &Path, sheets: &[SheetGrid]) -> Result<()> {
    ensure_parent(path)?;

    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_cells(worksheet, &sheet.cells)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_cells(worksheet: &mut Worksheet, cells: &[Cell]) -> std::result::Result<(), XlsxError> {
    for cell in cells {
        match &cell.value {
            CellValue::Text(value) => {
                worksheet.write_string(cell.row, cell.col, value)?;
            }
            CellValue::Number(value) => {
                worksheet.write_number(cell.row, cell.col, *value)?;
            }
            CellValue::Bool(value) => {
                worksheet.write_boolean(cell.row, cell.col, *value)?;
            }
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
