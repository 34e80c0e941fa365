use std::collections::HashMap;

use crate::{form, Token, TokenReaderError, TokenReaderResult, OAUTH_TOKEN_KEY};

const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";

const OAUTH_CALLBACK_CONFIRMED_KEY: &str = "oauth_callback_confirmed";

/// Represents response of token acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// OAuth Token and Token Secret
    pub token: Token,
    /// Other contents, e.g. `user_id` on some providers
    pub remain: HashMap<String, String>,
}

/// Reads a temporary credential response (RFC 5849 2.1). The provider must
/// confirm the callback with `oauth_callback_confirmed=true`.
pub(crate) fn read_request_token(text: &str) -> TokenReaderResult<TokenResponse> {
    let mut destructured = destructure(text)?;
    match destructured.remove(OAUTH_CALLBACK_CONFIRMED_KEY) {
        Some(confirmed) if confirmed == "true" => into_token_response(destructured, text),
        _ => Err(TokenReaderError::CallbackNotConfirmed(text.to_owned())),
    }
}

/// Reads a token credential response (RFC 5849 2.3).
pub(crate) fn read_access_token(text: &str) -> TokenReaderResult<TokenResponse> {
    into_token_response(destructure(text)?, text)
}

fn destructure(text: &str) -> TokenReaderResult<HashMap<String, String>> {
    Ok(form::first_values(form::parse(text.as_bytes())?))
}

fn into_token_response(
    mut destructured: HashMap<String, String>,
    text: &str,
) -> TokenReaderResult<TokenResponse> {
    let oauth_token = required(&mut destructured, OAUTH_TOKEN_KEY, text)?;
    let oauth_token_secret = required(&mut destructured, OAUTH_TOKEN_SECRET_KEY, text)?;
    Ok(TokenResponse {
        token: Token::new(oauth_token, oauth_token_secret),
        remain: destructured,
    })
}

fn required(
    values: &mut HashMap<String, String>,
    key: &'static str,
    text: &str,
) -> TokenReaderResult<String> {
    match values.remove(key) {
        Some(value) if value.is_empty() => Err(TokenReaderError::EmptyValue(key)),
        Some(value) => Ok(value),
        None => Err(TokenReaderError::TokenKeyNotFound(key, text.to_owned())),
    }
}
