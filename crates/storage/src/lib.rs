use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use shared::protocol::UpdateAck;

pub mod sheets;

pub use sheets::{GoogleSheetStore, ServiceAccountKey};

/// The four response cells written back for a guest row, columns C through F.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCells {
    /// Column C: reservation status, "Yes" or "No".
    pub reserved: String,
    /// Column D: reserved guest count, empty when not attending.
    pub guest_count: String,
    /// Column E: phone number, verbatim.
    pub phone_number: String,
    /// Column F: free-text message, empty when none was given.
    pub message: String,
}

impl ResponseCells {
    fn into_row(self) -> Vec<String> {
        vec![
            self.reserved,
            self.guest_count,
            self.phone_number,
            self.message,
        ]
    }
}

/// The shared tabular store holding one row per invited guest. Reads and
/// writes are independent calls; there is no transaction between locating a
/// row and updating it, so concurrent writes to the same row race and the
/// last one wins.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Every value of the key column (column A), top to bottom, including the
    /// header row. An empty vector means the store returned no data at all.
    async fn read_key_column(&self) -> Result<Vec<String>>;

    /// Writes the response cells for the given 1-based sheet row in a single
    /// update call.
    async fn write_response_cells(&self, sheet_row: u32, cells: ResponseCells)
        -> Result<UpdateAck>;
}

/// In-memory stand-in for the spreadsheet, used by tests and local
/// development. Remembers every write so callers can assert on them.
pub struct MemorySheetStore {
    rows: Mutex<Vec<Vec<String>>>,
    writes: Mutex<Vec<(u32, ResponseCells)>>,
    sheet_name: String,
    fail_with: Option<String>,
}

impl MemorySheetStore {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
            writes: Mutex::new(Vec::new()),
            sheet_name: "Sheet1".to_string(),
            fail_with: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A store whose every access fails with the given message, for
    /// exercising the generic-internal-error path.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::empty()
        }
    }

    pub async fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().await.clone()
    }

    pub async fn writes(&self) -> Vec<(u32, ResponseCells)> {
        self.writes.lock().await.clone()
    }
}

impl Default for MemorySheetStore {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn read_key_column(&self) -> Result<Vec<String>> {
        if let Some(message) = &self.fail_with {
            bail!("{message}");
        }
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .map(|row| row.first().cloned().unwrap_or_default())
            .collect())
    }

    async fn write_response_cells(
        &self,
        sheet_row: u32,
        cells: ResponseCells,
    ) -> Result<UpdateAck> {
        if let Some(message) = &self.fail_with {
            bail!("{message}");
        }
        let mut rows = self.rows.lock().await;
        let index = sheet_row
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|i| *i < rows.len());
        let Some(index) = index else {
            bail!("row {sheet_row} is outside the sheet");
        };

        let row = &mut rows[index];
        if row.len() < 6 {
            row.resize(6, String::new());
        }
        let values = cells.clone().into_row();
        row[2..6].clone_from_slice(&values);
        drop(rows);

        self.writes.lock().await.push((sheet_row, cells));
        Ok(UpdateAck {
            spreadsheet_id: "memory".to_string(),
            updated_range: sheets::response_range(&self.sheet_name, sheet_row),
            updated_rows: 1,
            updated_columns: 4,
            updated_cells: 4,
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
