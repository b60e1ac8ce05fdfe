//! Line-level parsing of the sheet's CSV export, shared by the guest
//! directory and the dashboard. The export is trusted to keep the fixed
//! column order: name, allowance, status, reserved count, phone, message.

/// One data row of the export, after header removal and cell cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RosterRow {
    pub name: String,
    /// Column B. `None` when blank, non-numeric, or non-positive.
    pub allowed: Option<u32>,
    /// Column C, raw status text. Empty means no response yet.
    pub status: String,
    /// Column D.
    pub reserved: Option<u32>,
    /// Column F.
    pub message: String,
}

pub(crate) fn parse_roster(csv_text: &str) -> Vec<RosterRow> {
    csv_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .filter_map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Option<RosterRow> {
    let columns: Vec<&str> = line.split(',').collect();

    let name = clean_cell(columns.first().copied());
    if name.is_empty() {
        return None;
    }

    Some(RosterRow {
        name,
        allowed: parse_count(&clean_cell(columns.get(1).copied())),
        status: clean_cell(columns.get(2).copied()),
        reserved: parse_count(&clean_cell(columns.get(3).copied())),
        message: clean_cell(columns.get(5).copied()),
    })
}

fn clean_cell(raw: Option<&str>) -> String {
    let cell = raw.unwrap_or_default().trim().trim_matches('\r').trim();
    cell.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(cell)
        .to_string()
}

fn parse_count(cell: &str) -> Option<u32> {
    cell.parse::<u32>().ok().filter(|count| *count > 0)
}
