use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type SignResult<T> = std::result::Result<T, SignError>;
pub type TokenReaderResult<T> = std::result::Result<T, TokenReaderError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("token acquisition failed : {0}")]
    TokenReader(#[from] TokenReaderError),
    #[error("OAuth sign failed : {0}")]
    Signer(#[from] SignError),
    #[error("invalid authorization callback : {0}")]
    Callback(#[from] CallbackError),
    #[error("request failed : {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("provider responded with {0} : {1}")]
    Status(StatusCode, String),
    #[error("invalid endpoint url : {0}")]
    Url(#[from] url::ParseError),
}

/// Malformed request input, detected before anything is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignError {
    #[error("request query could not be parsed : {0}")]
    MalformedQuery(FormError),
    #[error("form encoded request body could not be parsed : {0}")]
    MalformedBody(FormError),
    #[error("form encoded request body is a stream and cannot be replayed after signing.")]
    UnreplayableBody,
    #[error("authorization header rejected : {0}")]
    InvalidHeader(String),
}

/// The provider answered, but not with a usable credential.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenReaderError {
    #[error("response has malformed format : {0}")]
    Malformed(#[from] FormError),
    #[error("response has malformed format: not found {0} in {1}")]
    TokenKeyNotFound(&'static str, String),
    #[error("response has empty {0}")]
    EmptyValue(&'static str),
    #[error("oauth_callback_confirmed was not true in {0}")]
    CallbackNotConfirmed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallbackError {
    #[error("callback form values could not be parsed : {0}")]
    Malformed(#[from] FormError),
    #[error("callback did not receive {0}")]
    MissingParameter(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("form data is not valid UTF-8")]
    InvalidUtf8,
    #[error("invalid percent escape in {0:?}")]
    InvalidEscape(String),
    #[error("invalid semicolon separator in {0:?}")]
    Semicolon(String),
}
