//! Read-only attendance aggregation for the guest-tracking dashboard. Shares
//! the roster export with the directory but reads every row, answered or not.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::{roster, FetchError};

/// How often the dashboard re-reads the export between renders.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceStatus {
    Confirmed,
    Declined,
    /// No response recorded yet.
    Potential,
    /// Status cell holds something other than Yes/No; ignored by the totals.
    Unrecognized,
}

/// Per-guest view of the sheet as the dashboard counts it. Unparsable counts
/// tally as zero rather than dropping the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestTally {
    pub name: String,
    pub allowed: u32,
    pub reserved: u32,
    pub status: AttendanceStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialMessage {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub coming: u32,
    pub not_coming: u32,
    pub potential: u32,
    /// Newest first, i.e. bottom of the sheet upward.
    pub messages: Vec<SpecialMessage>,
}

impl AttendanceSummary {
    /// The two slices of the attendance pie.
    pub fn chart_slices(&self) -> [(&'static str, u32); 2] {
        [
            ("Confirmed Attending", self.coming),
            ("Not Attending", self.not_coming),
        ]
    }
}

pub fn parse_tallies(csv_text: &str) -> Vec<GuestTally> {
    roster::parse_roster(csv_text)
        .into_iter()
        .map(|row| {
            let status = match row.status.as_str() {
                "" => AttendanceStatus::Potential,
                "Yes" => AttendanceStatus::Confirmed,
                "No" => AttendanceStatus::Declined,
                _ => AttendanceStatus::Unrecognized,
            };
            GuestTally {
                name: row.name,
                allowed: row.allowed.unwrap_or(0),
                reserved: row.reserved.unwrap_or(0),
                status,
                message: row.message,
            }
        })
        .collect()
}

/// Confirmed guests count their reserved seats as coming and any unclaimed
/// remainder of their allowance as not coming; declined guests put their
/// whole allowance in not coming; unanswered rows stay potential.
pub fn summarize(tallies: &[GuestTally]) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();

    for tally in tallies {
        match tally.status {
            AttendanceStatus::Confirmed => {
                summary.coming += tally.reserved;
                summary.not_coming += tally.allowed.saturating_sub(tally.reserved);
            }
            AttendanceStatus::Declined => summary.not_coming += tally.allowed,
            AttendanceStatus::Potential => summary.potential += tally.allowed,
            AttendanceStatus::Unrecognized => {}
        }
    }

    summary.messages = tallies
        .iter()
        .filter(|tally| !tally.message.is_empty())
        .map(|tally| SpecialMessage {
            name: tally.name.clone(),
            message: tally.message.clone(),
        })
        .rev()
        .collect();

    summary
}

/// Fetches the export and produces a fresh summary per call. The caller owns
/// the polling loop; overlapping refreshes are not coalesced, so the last
/// one to resolve wins on render.
pub struct DashboardFeed {
    http: Client,
    export_url: String,
}

impl DashboardFeed {
    pub fn new(http: Client, export_url: String) -> Self {
        Self { http, export_url }
    }

    pub async fn refresh(&self) -> Result<AttendanceSummary, FetchError> {
        let csv_text = self
            .http
            .get(&self.export_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let summary = summarize(&parse_tallies(&csv_text));
        debug!(
            coming = summary.coming,
            not_coming = summary.not_coming,
            potential = summary.potential,
            "dashboard refreshed"
        );
        Ok(summary)
    }
}
