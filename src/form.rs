//! Strict `application/x-www-form-urlencoded` decoding.
//!
//! Shared by request bodies, query strings, provider responses and callbacks.
//! Malformed escapes and invalid UTF-8 are errors, never replaced.

use std::collections::HashMap;

use http::header::{HeaderMap, CONTENT_TYPE};
use percent_encoding::percent_decode_str;

use crate::{FormError, FORM_CONTENT_TYPE};

/// True when the content type is exactly `application/x-www-form-urlencoded`.
pub(crate) fn is_form_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .map_or(false, |value| value.as_bytes() == FORM_CONTENT_TYPE.as_bytes())
}

/// True when the media type is `application/x-www-form-urlencoded`, ignoring
/// case and any parameters such as `charset`.
pub(crate) fn has_form_media_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map_or(false, |media_type| {
            media_type.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE)
        })
}

/// Decodes form data into pairs, in input order. Empty segments are skipped
/// and a segment without `=` is a key with an empty value. A `;` is not a
/// separator and is rejected unless escaped.
pub(crate) fn parse(input: &[u8]) -> Result<Vec<(String, String)>, FormError> {
    let input = std::str::from_utf8(input).map_err(|_| FormError::InvalidUtf8)?;
    input
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment.contains(';') {
                return Err(FormError::Semicolon(segment.to_owned()));
            }
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            Ok((decode(key)?, decode(value)?))
        })
        .collect()
}

/// Keeps the first value seen for each key.
pub(crate) fn first_values<I>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut values = HashMap::new();
    for (key, value) in pairs {
        values.entry(key).or_insert(value);
    }
    values
}

fn decode(component: &str) -> Result<String, FormError> {
    let mut rest = component;
    while let Some(pos) = rest.find('%') {
        match rest.get(pos + 1..pos + 3) {
            Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => rest = &rest[pos + 3..],
            _ => return Err(FormError::InvalidEscape(component.to_owned())),
        }
    }
    // '+' must become a space before unescaping so that "%2B" survives.
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| FormError::InvalidUtf8)
}
