//! The three-legged handshake (RFC 5849 section 2).
//!
//! Each step is a separate call; values such as the temporary credential and
//! the verifier are threaded through by the caller, nothing is kept in between.

use reqwest::{Method, Request, Url};

use crate::sources::{Clock, NonceSource};
use crate::token_reader::{read_access_token, read_request_token};
use crate::{
    form, CallbackError, Config, Error, Result, SignatureMethod, Signer, Token, TokenReaderError,
    TokenResponse, Transport, OAUTH_TOKEN_KEY, OAUTH_VERIFIER_KEY,
};

/// What the provider sends back to the callback once the resource owner has
/// authorized the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub request_token: String,
    pub verifier: String,
}

impl<'a, TSignatureMethod, TClock, TNonce> Signer<'a, TSignatureMethod, TClock, TNonce>
where
    TSignatureMethod: SignatureMethod,
    TClock: Clock,
    TNonce: NonceSource,
{
    /// Obtains a temporary credential (RFC 5849 2.1) by POSTing a signed
    /// request to the request token URL.
    pub async fn request_token<T: Transport>(&self, transport: &T) -> Result<TokenResponse> {
        let url = Url::parse(&self.config().provider().request_token_url)?;
        tracing::debug!(url = %url, "requesting temporary credential");
        let mut request = Request::new(Method::POST, url);
        self.sign_request_token(&mut request)?;

        let body = exchange(transport, request).await?;
        read_request_token(&body).map_err(rejected)
    }

    /// Exchanges an authorized temporary credential and its verifier for a
    /// token credential (RFC 5849 2.3).
    pub async fn access_token<T: Transport>(
        &self,
        transport: &T,
        request_token: &Token,
        verifier: &str,
    ) -> Result<TokenResponse> {
        let url = Url::parse(&self.config().provider().access_token_url)?;
        tracing::debug!(url = %url, "requesting token credential");
        let mut request = Request::new(Method::POST, url);
        self.sign_access_token(&mut request, request_token, verifier)?;

        let body = exchange(transport, request).await?;
        read_access_token(&body).map_err(rejected)
    }
}

impl Config {
    /// Obtains a temporary credential using the system clock and random
    /// nonces. See [`Signer::request_token`].
    pub async fn request_token<T: Transport>(&self, transport: &T) -> Result<TokenResponse> {
        Signer::new(self).request_token(transport).await
    }

    /// URL of the provider's authorization page for `request_token`, where
    /// the resource owner is sent next (RFC 5849 2.2). Existing query
    /// parameters of the authorize URL are kept.
    pub fn authorization_url(&self, request_token: &str) -> Result<Url> {
        let mut url = Url::parse(&self.provider().authorize_url)?;
        url.query_pairs_mut().append_pair(OAUTH_TOKEN_KEY, request_token);
        Ok(url)
    }

    /// Reads `oauth_token` and `oauth_verifier` from the provider's redirect
    /// to the callback URL (RFC 5849 2.2).
    ///
    /// Form encoded body values of a POST, PUT or PATCH take precedence over
    /// URI query values.
    pub fn handle_authorization_callback<B>(
        &self,
        request: &http::Request<B>,
    ) -> Result<Verification>
    where
        B: AsRef<[u8]>,
    {
        Ok(read_callback(request)?)
    }

    /// Exchanges an authorized temporary credential for a token credential
    /// using the system clock and random nonces. See [`Signer::access_token`].
    pub async fn access_token<T: Transport>(
        &self,
        transport: &T,
        request_token: &Token,
        verifier: &str,
    ) -> Result<TokenResponse> {
        Signer::new(self)
            .access_token(transport, request_token, verifier)
            .await
    }
}

async fn exchange<T: Transport>(transport: &T, request: Request) -> Result<String> {
    let response = transport.send(request).await?;
    let status = response.status();
    let body = response.into_body();
    if !status.is_success() {
        tracing::warn!(status = %status, "provider refused credential request");
        return Err(Error::Status(status, body));
    }
    Ok(body)
}

fn rejected(err: TokenReaderError) -> Error {
    tracing::warn!(error = %err, "provider response rejected");
    err.into()
}

fn read_callback<B>(
    request: &http::Request<B>,
) -> std::result::Result<Verification, CallbackError>
where
    B: AsRef<[u8]>,
{
    let mut pairs = Vec::new();
    let has_body = matches!(
        *request.method(),
        http::Method::POST | http::Method::PUT | http::Method::PATCH
    );
    if has_body && form::has_form_media_type(request.headers()) {
        let body: &[u8] = request.body().as_ref();
        pairs.extend(form::parse(body)?);
    }
    if let Some(query) = request.uri().query() {
        pairs.extend(form::parse(query.as_bytes())?);
    }
    let mut values = form::first_values(pairs);

    let mut take = |key: &'static str| match values.remove(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(CallbackError::MissingParameter(key)),
    };
    let request_token = take(OAUTH_TOKEN_KEY)?;
    let verifier = take(OAUTH_VERIFIER_KEY)?;
    Ok(Verification {
        request_token,
        verifier,
    })
}
