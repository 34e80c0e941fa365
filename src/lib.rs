/*!
oauth1-signer: OAuth 1.0a (RFC 5849) for [reqwest](https://crates.io/crates/reqwest).

# Overview

This library signs outgoing requests with `HMAC-SHA1` and drives the
three-legged handshake a consumer uses to obtain token credentials:

1. temporary credential request ([`Config::request_token`]),
2. resource owner authorization ([`Config::authorization_url`], then
   [`Config::handle_authorization_callback`] on the way back),
3. token credential request ([`Config::access_token`]).

Network I/O goes through a [`Transport`]; `reqwest::Client` is one. Nothing is
retried. A failed step is simply called again, which signs a new request with
a new nonce and timestamp.

# How to use

## Basic usecase 1 - acquiring OAuth token & secret

```rust,no_run
# async fn run() -> oauth1_signer::Result<()> {
use oauth1_signer::{Config, Endpoint};

let config = Config::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .callback("https://consumer.example.com/ready")
    .endpoint(Endpoint::new(
        "https://api.example.com/oauth/request_token",
        "https://api.example.com/oauth/authorize",
        "https://api.example.com/oauth/access_token",
    ));
let transport = reqwest::Client::new();

// step 1: acquire request token & token secret
let temporary = config.request_token(&transport).await?;

// step 2: send the resource owner to the provider
println!("please access to: {}", config.authorization_url(&temporary.token.token)?);

// ...the provider redirects back to the callback URL
# let callback = http::Request::builder().uri("https://consumer.example.com/ready").body(Vec::new()).unwrap();
let verification = config.handle_authorization_callback(&callback)?;

// step 3: acquire access token
let access = config
    .access_token(&transport, &temporary.token, &verification.verifier)
    .await?;
println!("other attributes: {:#?}", access.remain);
# Ok(())
# }
```

## Basic usecase 2 - sending signed requests

```rust,no_run
# async fn run() -> oauth1_signer::Result<()> {
use oauth1_signer::{Config, OAuthClientProvider, Token};

let config = Config::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]");
let access_token = Token::new("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let client = reqwest::Client::new().oauth1(&config, access_token);
let resp = client
    .send(
        client
            .post("https://api.example.com/1.1/statuses/update.json")
            .form(&[("status", "Hello, OAuth!")]),
    )
    .await?;
# Ok(())
# }
```

Deterministic signatures, e.g. for tests, come from a [`Signer`] built with
[`FixedClock`] and [`FixedNonce`].
*/
mod base_string;
mod client;
mod config;
mod encode;
mod error;
mod flow;
mod form;
mod params;
mod signature_method;
mod signer;
mod sources;
mod token_reader;
mod transport;

// exposed to external program
pub use base_string::{base_uri, normalized_parameter_string, signature_base};
pub use client::{Client, OAuthClientProvider};
pub use config::{Config, Endpoint, Token, OUT_OF_BAND_CALLBACK};
pub use encode::percent_encode;
pub use error::{
    CallbackError, Error, FormError, Result, SignError, SignResult, TokenReaderError,
    TokenReaderResult,
};
pub use flow::Verification;
pub use signature_method::{HmacSha1, SignatureMethod};
pub use signer::{authorization_header, OAuthParameters, Signer};
pub use sources::{Clock, FixedClock, FixedNonce, NonceSource, RandomNonce, SystemClock};
pub use token_reader::TokenResponse;
pub use transport::Transport;

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";

// crate-private constant variables
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
