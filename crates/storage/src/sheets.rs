use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use shared::protocol::UpdateAck;

use crate::{ResponseCells, SheetStore};

const SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const ASSERTION_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECONDS: i64 = 3600;
const TOKEN_EXPIRY_SLACK_SECONDS: i64 = 60;

/// Service-account identity with read/write access to the spreadsheet.
/// Provisioned externally; the private key is an RSA PEM.
#[derive(Debug, Clone)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenReply {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    #[serde(default)]
    values: Option<Vec<Vec<String>>>,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Sheet store backed by the Google Sheets v4 values API, authenticated with
/// a service-account JWT assertion exchanged for a short-lived bearer token.
pub struct GoogleSheetStore {
    http: Client,
    key: ServiceAccountKey,
    spreadsheet_id: String,
    sheet_name: String,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetStore {
    pub fn new(key: ServiceAccountKey, spreadsheet_id: String, sheet_name: String) -> Self {
        Self {
            http: Client::new(),
            key,
            spreadsheet_id,
            sheet_name,
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.access_token.clone());
            }
        }

        let now = Utc::now();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: TOKEN_URI,
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_LIFETIME_SECONDS,
        };
        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .context("service account private key is not a valid RSA PEM")?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .context("failed to sign service account assertion")?;

        let reply: TokenReply = self
            .http
            .post(TOKEN_URI)
            .form(&[
                ("grant_type", ASSERTION_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .context("token endpoint unreachable")?
            .error_for_status()
            .context("token endpoint rejected the assertion")?
            .json()
            .await
            .context("malformed token endpoint reply")?;

        debug!(expires_in = reply.expires_in, "refreshed sheets access token");
        let expires_at =
            now + Duration::seconds(reply.expires_in - TOKEN_EXPIRY_SLACK_SECONDS);
        *cached = Some(CachedToken {
            access_token: reply.access_token.clone(),
            expires_at,
        });
        Ok(reply.access_token)
    }

    fn values_url(&self, range: &str) -> String {
        format!("{SHEETS_ENDPOINT}/{}/values/{range}", self.spreadsheet_id)
    }
}

#[async_trait]
impl SheetStore for GoogleSheetStore {
    async fn read_key_column(&self) -> Result<Vec<String>> {
        let token = self.access_token().await?;
        let range = key_column_range(&self.sheet_name);
        let reply: ValueRange = self
            .http
            .get(self.values_url(&range))
            .bearer_auth(token)
            .send()
            .await
            .context("sheet read request failed")?
            .error_for_status()
            .context("sheet read was rejected")?
            .json()
            .await
            .context("malformed sheet read reply")?;

        Ok(reply
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().next().unwrap_or_default())
            .collect())
    }

    async fn write_response_cells(
        &self,
        sheet_row: u32,
        cells: ResponseCells,
    ) -> Result<UpdateAck> {
        let token = self.access_token().await?;
        let range = response_range(&self.sheet_name, sheet_row);
        let body = ValueRange {
            range: Some(range.clone()),
            values: Some(vec![cells.into_row()]),
        };

        let ack: UpdateAck = self
            .http
            .put(self.values_url(&range))
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .context("sheet update request failed")?
            .error_for_status()
            .context("sheet update was rejected")?
            .json()
            .await
            .context("malformed sheet update reply")?;

        Ok(ack)
    }
}

/// Read range covering the whole matching-key column.
pub(crate) fn key_column_range(sheet_name: &str) -> String {
    format!("{sheet_name}!A:A")
}

/// Update range for one guest's response cells. Spans C through G even though
/// only four values are written; the store applies the subset.
pub(crate) fn response_range(sheet_name: &str, sheet_row: u32) -> String {
    format!("{sheet_name}!C{sheet_row}:G{sheet_row}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_column_range_covers_column_a() {
        assert_eq!(key_column_range("Sheet1"), "Sheet1!A:A");
    }

    #[test]
    fn response_range_targets_single_row() {
        assert_eq!(response_range("Sheet1", 5), "Sheet1!C5:G5");
        assert_eq!(response_range("Guests", 12), "Guests!C12:G12");
    }

    #[test]
    fn values_url_nests_range_under_spreadsheet() {
        let store = GoogleSheetStore::new(
            ServiceAccountKey {
                client_email: "svc@example.iam.gserviceaccount.com".into(),
                private_key: String::new(),
            },
            "sheet-id".into(),
            "Sheet1".into(),
        );
        assert_eq!(
            store.values_url("Sheet1!A:A"),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/Sheet1!A:A"
        );
    }
}
