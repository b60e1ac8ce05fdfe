use reqwest::Client;
use shared::domain::GuestRecord;
use tracing::debug;

use crate::{roster, FetchError};

/// In-memory snapshot of the guest roster, loaded from the sheet's public
/// CSV export. Lookups are synchronous over the snapshot; nothing touches the
/// network per keystroke.
pub struct GuestDirectory {
    entries: Vec<GuestRecord>,
}

impl GuestDirectory {
    pub async fn load(http: &Client, export_url: &str) -> Result<Self, FetchError> {
        let csv_text = http
            .get(export_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let directory = Self::from_csv(&csv_text);
        debug!(entries = directory.entries.len(), "loaded guest directory");
        Ok(directory)
    }

    /// Guests who already responded (non-empty status column) are left out:
    /// once a guest has answered, they no longer need "who am I" suggestions.
    pub fn from_csv(csv_text: &str) -> Self {
        let entries = roster::parse_roster(csv_text)
            .into_iter()
            .filter(|row| row.status.is_empty())
            .map(|row| GuestRecord {
                name: row.name,
                max_guests: row.allowed,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[GuestRecord] {
        &self.entries
    }

    /// Case-insensitive substring match in source order. Queries of one
    /// character or less return nothing; the suggestion box stays closed
    /// until the guest has typed enough to narrow things down.
    pub fn suggest(&self, query: &str) -> Vec<&GuestRecord> {
        if query.chars().count() <= 1 {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .collect()
    }
}
