use reply_extract::lenient;
use reply_extract::EmailReply;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::HistoryStoreError;

const ID_SUFFIX_LEN: usize = 6;

/// Inputs a reply was generated from, stored as entered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSnapshot {
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub original_email: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub sender_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub designation: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub tone: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub length: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub context_notes: String,
}

/// One generated reply kept in history. Owns its reply by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub timestamp: String,
    #[serde(flatten)]
    pub request: RequestSnapshot,
    #[serde(default, deserialize_with = "reply_or_default")]
    pub response: EmailReply,
}

impl HistoryEntry {
    /// Builds an entry stamped with the current UTC time and a fresh id.
    pub fn new(request: RequestSnapshot, response: EmailReply) -> Result<Self, HistoryStoreError> {
        let now = OffsetDateTime::now_utc();
        let timestamp = now.format(&Rfc3339).map_err(HistoryStoreError::ClockFormat)?;

        Ok(Self {
            id: new_entry_id(now),
            timestamp,
            request,
            response,
        })
    }

    /// Parsed creation time, when the stored timestamp is valid RFC 3339.
    #[must_use]
    pub fn created_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.timestamp, &Rfc3339).ok()
    }
}

/// Time-based id with a short random suffix: unix milliseconds followed by
/// six lowercase hex characters. Collisions are not guarded against.
#[must_use]
pub fn new_entry_id(now: OffsetDateTime) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    let random = Uuid::new_v4().simple().to_string();
    format!("{millis}{}", &random[..ID_SUFFIX_LEN])
}

fn reply_or_default<'de, D>(deserializer: D) -> Result<EmailReply, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(object) => EmailReply::from_object(&object),
        _ => EmailReply::default(),
    })
}
