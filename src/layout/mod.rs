use std::collections::HashSet;

use crate::model::{AccessPointReport, BandReading, Device, SwitchReport};

/// Row holding the first section title. Row 0 is left blank.
pub const FIRST_TITLE_ROW: u32 = 1;
/// Distance from the last row of one section to the title of the next.
pub const SECTION_GAP: u32 = 3;
/// Title bars always span columns A through H.
pub const TITLE_LAST_COL: u16 = 7;

pub const SWITCHES_TITLE: &str = "Switches";
pub const CAMERAS_TITLE: &str = "Cameras";
pub const ACCESS_POINTS_TITLE: &str = "Access Points";

pub const SWITCH_HEADERS: [&str; 8] = [
    "Name",
    "Model",
    "MAC",
    "Serial",
    "LAN IP",
    "Status",
    "Enabled Ports",
    "Connected Ports",
];

pub const CAMERA_HEADERS: [&str; 6] = ["Name", "Model", "MAC", "Serial", "LAN IP", "Status"];

pub const ACCESS_POINT_HEADERS: [&str; 13] = [
    "Name",
    "Model",
    "MAC",
    "Serial",
    "LAN IP",
    "Status",
    "2.4 wifi",
    "2.4 nonWifi",
    "2.4 total",
    "5 wifi",
    "5 nonWifi",
    "5 total",
    "Clients",
];

const MAX_SHEET_NAME_LEN: usize = 31;

/// Value stored in a single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
}

/// A bold, centered title merged across columns A–H.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTitle {
    pub row: u32,
    pub first_col: u16,
    pub last_col: u16,
    pub text: String,
}

/// Where a section landed on the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub title: &'static str,
    pub title_row: u32,
    pub header_row: u32,
    pub data_rows: u32,
}

impl SectionSpan {
    /// Last occupied row: the final data row, or the header row when empty.
    pub fn last_row(&self) -> u32 {
        self.header_row + self.data_rows
    }
}

/// Everything needed to materialise one organization's report sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSheet {
    pub sheet_name: String,
    pub titles: Vec<MergedTitle>,
    pub cells: Vec<Cell>,
    pub sections: Vec<SectionSpan>,
}

/// Lays out the switches, cameras and access points of an organization as
/// three stacked sections.
pub fn build_report(
    org_name: &str,
    switches: &[SwitchReport],
    cameras: &[Device],
    access_points: &[AccessPointReport],
) -> ReportSheet {
    let mut builder = SheetBuilder::new(sanitize_sheet_name(org_name));

    builder.section(
        SWITCHES_TITLE,
        &SWITCH_HEADERS,
        switches.iter().map(switch_row),
    );
    builder.section(CAMERAS_TITLE, &CAMERA_HEADERS, cameras.iter().map(camera_row));
    builder.section(
        ACCESS_POINTS_TITLE,
        &ACCESS_POINT_HEADERS,
        access_points.iter().map(access_point_row),
    );

    builder.finish()
}

/// File name used for an organization's report, with path separators
/// replaced so the name cannot escape the reports directory.
pub fn report_file_name(org_name: &str) -> String {
    let stem: String = org_name
        .trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    let stem = match stem.as_str() {
        "" | "." | ".." => "unnamed".to_string(),
        _ => stem,
    };
    format!("{stem}.xlsx")
}

struct SheetBuilder {
    sheet_name: String,
    next_title_row: u32,
    titles: Vec<MergedTitle>,
    cells: Vec<Cell>,
    sections: Vec<SectionSpan>,
}

impl SheetBuilder {
    fn new(sheet_name: String) -> Self {
        Self {
            sheet_name,
            next_title_row: FIRST_TITLE_ROW,
            titles: Vec::new(),
            cells: Vec::new(),
            sections: Vec::new(),
        }
    }

    fn section<I>(&mut self, title: &'static str, headers: &[&str], rows: I)
    where
        I: Iterator<Item = Vec<Option<CellValue>>>,
    {
        let title_row = self.next_title_row;
        let header_row = title_row + 1;

        self.titles.push(MergedTitle {
            row: title_row,
            first_col: 0,
            last_col: TITLE_LAST_COL,
            text: title.to_string(),
        });

        for (col, header) in (0u16..).zip(headers) {
            self.push(header_row, col, CellValue::Text((*header).to_string()));
        }

        let mut data_rows = 0;
        for values in rows {
            data_rows += 1;
            let row = header_row + data_rows;
            for (col, value) in (0u16..).zip(values) {
                if let Some(value) = value {
                    self.push(row, col, value);
                }
            }
        }

        let span = SectionSpan {
            title,
            title_row,
            header_row,
            data_rows,
        };
        self.next_title_row = span.last_row() + SECTION_GAP;
        self.sections.push(span);
    }

    fn push(&mut self, row: u32, col: u16, value: CellValue) {
        self.cells.push(Cell { row, col, value });
    }

    fn finish(self) -> ReportSheet {
        ReportSheet {
            sheet_name: self.sheet_name,
            titles: self.titles,
            cells: self.cells,
            sections: self.sections,
        }
    }
}

fn identity(device: &Device) -> Vec<Option<CellValue>> {
    device
        .identity_cells()
        .into_iter()
        .map(|value| Some(CellValue::Text(value)))
        .collect()
}

fn switch_row(switch: &SwitchReport) -> Vec<Option<CellValue>> {
    let mut row = identity(&switch.device);
    row.push(Some(CellValue::Text(switch.enabled_ports.clone())));
    row.push(Some(CellValue::Text(switch.connected_ports.clone())));
    row
}

fn camera_row(camera: &Device) -> Vec<Option<CellValue>> {
    identity(camera)
}

fn access_point_row(ap: &AccessPointReport) -> Vec<Option<CellValue>> {
    let mut row = identity(&ap.device);
    row.extend(band_cells(ap.bands.band_24));
    row.extend(band_cells(ap.bands.band_5));
    row.push(Some(CellValue::Text(ap.clients.to_string())));
    row
}

fn band_cells(reading: BandReading) -> [Option<CellValue>; 3] {
    match reading {
        BandReading::NotReported => [None, None, None],
        BandReading::NoData => std::array::from_fn(|_| Some(CellValue::Text(String::new()))),
        BandReading::Measured {
            wifi,
            non_wifi,
            total,
        } => [
            Some(CellValue::Number(wifi)),
            Some(CellValue::Number(non_wifi)),
            Some(CellValue::Number(total)),
        ],
    }
}

/// Hands out unique, Excel-safe sheet names.
#[derive(Debug, Default)]
pub struct SheetNameRegistry {
    used: HashSet<String>,
}

impl SheetNameRegistry {
    pub fn assign(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        // Excel compares sheet names case-insensitively.
        if self.used.insert(base.to_lowercase()) {
            return base;
        }

        let mut counter = 1;
        loop {
            let suffix = format!("_{counter}");
            let prefix = truncate_chars(&base, MAX_SHEET_NAME_LEN - suffix.len());
            let candidate = format!("{prefix}{suffix}");
            if self.used.insert(candidate.to_lowercase()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Replaces characters Excel rejects in sheet names and enforces the 31
/// character limit.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']'];
    let sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    // Leading or trailing apostrophes are also rejected.
    let sanitized = sanitized.trim().trim_matches('\'').trim();
    if sanitized.is_empty() {
        return "Sheet".to_string();
    }

    truncate_chars(sanitized, MAX_SHEET_NAME_LEN)
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BandReadings, ProductType};

    fn device(serial: &str, product_type: ProductType) -> Device {
        Device {
            serial: serial.to_string(),
            name: Some(format!("{serial}-name")),
            model: Some("MX".to_string()),
            mac: Some("00:11:22:33:44:55".to_string()),
            lan_ip: Some("10.0.0.1".to_string()),
            status: Some("online".to_string()),
            product_type,
        }
    }

    fn switch(serial: &str) -> SwitchReport {
        SwitchReport {
            device: device(serial, ProductType::Switch),
            enabled_ports: "1,2".to_string(),
            connected_ports: "1".to_string(),
        }
    }

    fn access_point(serial: &str, bands: BandReadings) -> AccessPointReport {
        AccessPointReport {
            device: device(serial, ProductType::Wireless),
            bands,
            clients: 4,
        }
    }

    fn cell_at(sheet: &ReportSheet, row: u32, col: u16) -> Option<&CellValue> {
        sheet
            .cells
            .iter()
            .find(|cell| cell.row == row && cell.col == col)
            .map(|cell| &cell.value)
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn sections_follow_fixed_offsets() {
        let switches = vec![switch("S1"), switch("S2")];
        let cameras = vec![device("C1", ProductType::Camera)];
        let aps = vec![
            access_point("A1", BandReadings::default()),
            access_point("A2", BandReadings::default()),
            access_point("A3", BandReadings::default()),
        ];

        let sheet = build_report("Acme", &switches, &cameras, &aps);
        let spans: Vec<(u32, u32, u32)> = sheet
            .sections
            .iter()
            .map(|s| (s.title_row, s.header_row, s.data_rows))
            .collect();

        // Switch data on rows 3-4, camera title 3 rows below row 4, and so on.
        assert_eq!(spans, vec![(1, 2, 2), (7, 8, 1), (12, 13, 3)]);
        let title_rows: Vec<u32> = sheet.titles.iter().map(|t| t.row).collect();
        assert_eq!(title_rows, vec![1, 7, 12]);
        assert!(
            sheet
                .titles
                .iter()
                .all(|t| t.first_col == 0 && t.last_col == TITLE_LAST_COL)
        );
    }

    #[test]
    fn empty_sections_still_emit_title_and_header() {
        let sheet = build_report("Empty", &[], &[], &[]);

        let spans: Vec<(u32, u32, u32)> = sheet
            .sections
            .iter()
            .map(|s| (s.title_row, s.header_row, s.data_rows))
            .collect();
        assert_eq!(spans, vec![(1, 2, 0), (5, 6, 0), (9, 10, 0)]);

        let header_cells =
            SWITCH_HEADERS.len() + CAMERA_HEADERS.len() + ACCESS_POINT_HEADERS.len();
        assert_eq!(sheet.cells.len(), header_cells);
        assert_eq!(cell_at(&sheet, 2, 7), Some(&text("Connected Ports")));
        assert_eq!(cell_at(&sheet, 6, 5), Some(&text("Status")));
        assert_eq!(cell_at(&sheet, 10, 12), Some(&text("Clients")));
    }

    #[test]
    fn switch_row_carries_port_lists() {
        let sheet = build_report("Acme", &[switch("S1")], &[], &[]);

        assert_eq!(cell_at(&sheet, 3, 0), Some(&text("S1-name")));
        assert_eq!(cell_at(&sheet, 3, 3), Some(&text("S1")));
        assert_eq!(cell_at(&sheet, 3, 6), Some(&text("1,2")));
        assert_eq!(cell_at(&sheet, 3, 7), Some(&text("1")));
    }

    #[test]
    fn band_states_map_to_distinct_layout_cells() {
        let measured_24 = BandReadings {
            band_24: BandReading::Measured {
                wifi: 1.5,
                non_wifi: 0.5,
                total: 2.0,
            },
            band_5: BandReading::NotReported,
        };
        let no_data = BandReadings {
            band_24: BandReading::NoData,
            band_5: BandReading::NoData,
        };
        let sheet = build_report(
            "Acme",
            &[],
            &[],
            &[access_point("A1", measured_24), access_point("A2", no_data)],
        );
        let first = sheet.sections[2].header_row + 1;

        assert_eq!(cell_at(&sheet, first, 6), Some(&CellValue::Number(1.5)));
        assert_eq!(cell_at(&sheet, first, 8), Some(&CellValue::Number(2.0)));
        assert_eq!(cell_at(&sheet, first, 9), None);
        assert_eq!(cell_at(&sheet, first, 11), None);
        assert_eq!(cell_at(&sheet, first, 12), Some(&text("4")));

        for col in 6..12 {
            assert_eq!(cell_at(&sheet, first + 1, col), Some(&text("")));
        }
    }

    #[test]
    fn sheet_names_are_sanitised_and_unique() {
        assert_eq!(sanitize_sheet_name("Acme/West: HQ"), "Acme_West_ HQ");
        assert_eq!(sanitize_sheet_name("   "), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).chars().count(), 31);

        let mut registry = SheetNameRegistry::default();
        assert_eq!(registry.assign("Acme"), "Acme");
        assert_eq!(registry.assign("acme"), "acme_1");
        assert_eq!(registry.assign("Acme"), "Acme_2");
    }

    #[test]
    fn report_file_names_stay_in_directory() {
        assert_eq!(report_file_name("Acme"), "Acme.xlsx");
        assert_eq!(report_file_name("a/b\\c"), "a_b_c.xlsx");
        assert_eq!(report_file_name(".."), "unnamed.xlsx");
    }
}
