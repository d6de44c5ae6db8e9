use serde_json::Value;

use crate::error::AppResult;
use davstat_rfc::error::RfcError;
use davstat_rfc::rfc::dav::parse::ParseError;
use davstat_rfc::rfc::dav::{PropfindRequest, parse_propfind, propfind_from_value};

/// ## Summary
/// Parses a PROPFIND body, either raw XML or a JSON parameter tree.
///
/// ## Errors
/// Returns `UnknownPropertyRequestSyntax` if the body cannot be parsed.
pub fn parse_propfind_body(body: &[u8], json: bool) -> AppResult<PropfindRequest> {
    if !json {
        return Ok(parse_propfind(body).map_err(RfcError::from)?);
    }

    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body)
            .map_err(|err| RfcError::from(ParseError::invalid_value(err.to_string())))?
    };

    Ok(propfind_from_value(&value).map_err(RfcError::from)?)
}
