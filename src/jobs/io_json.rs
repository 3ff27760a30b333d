// Reading the survey responses.

use std::fs;

use serde_json::Value as JSValue;

use snafu::ResultExt;

use crate::jobs::*;

/// Reads and parses a JSON payload. Its shape is not checked here.
pub fn read_payload(path: &str) -> JobResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_payload: {:?}: {} bytes", path, contents.len());
    Ok(js)
}
