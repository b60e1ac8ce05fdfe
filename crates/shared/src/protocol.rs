use serde::{Deserialize, Serialize};

use crate::domain::Attending;

/// The payload a guest's browser posts to the RSVP endpoint. Field names are
/// part of the wire contract; `guests` crosses the wire as a string because
/// that is what the form control produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpSubmission {
    pub name: String,
    pub attending: Attending,
    pub guests: String,
    pub phonenumber: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The store's acknowledgment of a values update, passed back to the client
/// verbatim inside the success envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAck {
    pub spreadsheet_id: String,
    pub updated_range: String,
    pub updated_rows: u32,
    pub updated_columns: u32,
    pub updated_cells: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub data: UpdateAck,
}

/// Error body shape shared by every non-success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}
