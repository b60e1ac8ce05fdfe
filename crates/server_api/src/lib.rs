use std::sync::Arc;

use shared::{
    domain::Attending,
    error::{ApiError, ErrorCode},
    protocol::{RsvpSubmission, UpdateAck},
};
use storage::{ResponseCells, SheetStore};
use tracing::{error, info};

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn SheetStore>,
}

/// Locates the submitting guest's row in the shared store and writes the
/// response columns back in one update.
///
/// The name match is exact: no trimming, no case folding. A whitespace or
/// case mismatch reports the guest as not found. When the same name appears
/// more than once, the first row wins and later duplicates are unreachable.
pub async fn reconcile(
    ctx: &ApiContext,
    submission: &RsvpSubmission,
) -> Result<UpdateAck, ApiError> {
    let keys = ctx.store.read_key_column().await.map_err(internal)?;
    if keys.is_empty() {
        return Err(ApiError::new(
            ErrorCode::StoreUnavailable,
            "could not find any data in the sheet",
        ));
    }

    let row_index = keys
        .iter()
        .position(|key| key == &submission.name)
        .ok_or_else(|| ApiError::new(ErrorCode::GuestNotFound, "guest not found"))?;

    // The read result is 0-based; sheet rows are addressed 1-based.
    let sheet_row = row_index as u32 + 1;

    let attending = submission.attending;
    let cells = ResponseCells {
        reserved: attending.as_sheet_value().to_string(),
        guest_count: match attending {
            Attending::Yes => submission.guests.clone(),
            Attending::No => String::new(),
        },
        phone_number: submission.phonenumber.clone(),
        message: submission.message.clone().unwrap_or_default(),
    };

    let ack = ctx
        .store
        .write_response_cells(sheet_row, cells)
        .await
        .map_err(internal)?;
    info!(sheet_row, name = %submission.name, "recorded rsvp response");
    Ok(ack)
}

fn internal(err: anyhow::Error) -> ApiError {
    // The real failure stays in the logs; the caller only ever sees the
    // generic message.
    error!(%err, "sheet store access failed");
    ApiError::new(ErrorCode::Internal, "an internal server error occurred")
}
