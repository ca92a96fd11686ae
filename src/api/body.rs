//! Request body decoding
//!
//! Turns a raw body into a typed input. Every failure becomes
//! `KvError::Decode` with a message that is safe to show the client.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::{KvError, Result};

/// Largest accepted request body (1 MiB)
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Decode a JSON body holding exactly one value of type `T`
///
/// Input types use `deny_unknown_fields`, so stray keys are reported too.
pub fn read_json<T: DeserializeOwned>(body: std::result::Result<Bytes, BytesRejection>) -> Result<T> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            KvError::Decode(format!(
                "body must not be larger than {MAX_BODY_BYTES} bytes"
            ))
        } else {
            KvError::Decode(rejection.body_text())
        }
    })?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(KvError::Decode("body must not be empty".to_string()));
    }

    let mut de = serde_json::Deserializer::from_slice(&body);
    let value = T::deserialize(&mut de).map_err(describe)?;

    // Anything but whitespace after the first value
    de.end().map_err(|_| {
        KvError::Decode("body must only contain a single JSON value".to_string())
    })?;

    Ok(value)
}

fn describe(err: serde_json::Error) -> KvError {
    let message = match err.classify() {
        Category::Syntax => format!(
            "body contains badly-formed JSON (at line {} column {})",
            err.line(),
            err.column()
        ),
        Category::Eof => "body contains badly-formed JSON".to_string(),
        Category::Data => match unknown_field(&err) {
            Some(field) => format!("body contains unknown key \"{field}\""),
            None => format!(
                "body contains incorrect JSON type (at line {} column {})",
                err.line(),
                err.column()
            ),
        },
        Category::Io => "body could not be read".to_string(),
    };
    KvError::Decode(message)
}

/// Field name out of serde's "unknown field `name`, expected ..." message
fn unknown_field(err: &serde_json::Error) -> Option<String> {
    let message = err.to_string();
    let rest = message.strip_prefix("unknown field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}
