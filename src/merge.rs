use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::io::{excel_read, excel_write};
use crate::layout::SheetNameRegistry;

pub const REPORT_EXTENSION: &str = "xlsx";

/// Outcome of combining the per-organization reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Sheet names written to the combined workbook, in order.
    pub sheets: Vec<String>,
    /// Path of the combined workbook, when one was written.
    pub output: Option<PathBuf>,
}

/// Finds every report workbook below `dir`, sorted by path. Excel lock files
/// are skipped. A missing directory yields no reports.
pub fn collect_reports(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    if dir.is_dir() {
        walk(dir, &mut found)?;
    }
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if is_report(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn is_report(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(REPORT_EXTENSION));
    let is_lock_file = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("~$"));
    has_extension && !is_lock_file
}

/// Copies the first sheet of every report under `dir` into `output`, one sheet
/// per report. Nothing is written when there are no reports.
#[instrument(
    level = "info",
    skip_all,
    fields(dir = %dir.display(), output = %output.display())
)]
pub fn merge_reports(dir: &Path, output: &Path) -> Result<MergeSummary> {
    let skip = fs::canonicalize(output).ok();
    let reports: Vec<PathBuf> = collect_reports(dir)?
        .into_iter()
        .filter(|path| skip.is_none() || fs::canonicalize(path).ok() != skip)
        .collect();

    if reports.is_empty() {
        warn!("no reports found; combined workbook not written");
        return Ok(MergeSummary {
            sheets: Vec::new(),
            output: None,
        });
    }

    let mut names = SheetNameRegistry::default();
    let mut grids = Vec::with_capacity(reports.len());
    for path in &reports {
        let mut grid = excel_read::read_first_sheet(path)?;
        grid.name = names.assign(&grid.name);
        debug!(path = %path.display(), sheet = %grid.name, cells = grid.cells.len(), "read report");
        grids.push(grid);
    }

    excel_write::write_sheets(output, &grids)?;
    info!(sheet_count = grids.len(), "combined report written");

    Ok(MergeSummary {
        sheets: grids.into_iter().map(|grid| grid.name).collect(),
        output: Some(output.to_path_buf()),
    })
}
