//! Writing results to a file or stdout.

use crate::error::{IoError, IoResult};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Pretty-printed JSON for any serializable result.
pub fn to_pretty_json<T: Serialize>(value: &T) -> IoResult<String> {
    serde_json::to_string_pretty(value).map_err(|source| IoError::Json {
        context: "result".to_string(),
        source,
    })
}

/// Write `value` as pretty JSON to `out`, or to stdout when `out` is `None`.
pub fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> IoResult<()> {
    let mut text = to_pretty_json(value)?;
    text.push('\n');
    write_text(&text, out)
}

/// Write `text` verbatim to `out`, or to stdout when `out` is `None`.
pub fn write_text(text: &str, out: Option<&Path>) -> IoResult<()> {
    match out {
        Some(path) => std::fs::write(path, text).map_err(|source| IoError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
