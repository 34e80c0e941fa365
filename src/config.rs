use std::fmt;

use serde::{Deserialize, Serialize};

/// `oauth_callback` value for out-of-band verification (RFC 5849 2.1).
pub const OUT_OF_BAND_CALLBACK: &str = "oob";

/// A consumer's key and secret, its callback URL and the provider endpoint it
/// talks to.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    consumer_key: String,
    consumer_secret: String,
    #[serde(default = "default_callback")]
    callback_url: String,
    endpoint: Endpoint,
}

fn default_callback() -> String {
    OUT_OF_BAND_CALLBACK.to_owned()
}

impl Config {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Config {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            callback_url: default_callback(),
            endpoint: Endpoint::default(),
        }
    }

    pub fn callback<T: Into<String>>(self, callback_url: T) -> Self {
        Config {
            callback_url: callback_url.into(),
            ..self
        }
    }

    pub fn endpoint(self, endpoint: Endpoint) -> Self {
        Config { endpoint, ..self }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    pub fn provider(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// The provider's three OAuth1 URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Endpoint {
    pub request_token_url: String,
    pub authorize_url: String,
    pub access_token_url: String,
}

impl Endpoint {
    pub fn new<TRequest, TAuthorize, TAccess>(
        request_token_url: TRequest,
        authorize_url: TAuthorize,
        access_token_url: TAccess,
    ) -> Self
    where
        TRequest: Into<String>,
        TAuthorize: Into<String>,
        TAccess: Into<String>,
    {
        Endpoint {
            request_token_url: request_token_url.into(),
            authorize_url: authorize_url.into(),
            access_token_url: access_token_url.into(),
        }
    }
}

/// A token and its secret.
///
/// The same shape holds a temporary credential (request token) and a token
/// credential (access token). Only the latter may sign resource requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    pub token_secret: String,
}

impl Token {
    pub fn new<TKey, TSecret>(token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Token {
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static CONSUMER_KEY: &str = "dpf43f3p2l4k3l03";
    static CONSUMER_SECRET: &str = "kd94hf93k423kf44";

    #[test]
    fn builder_defaults_to_out_of_band() {
        let config = Config::new(CONSUMER_KEY, CONSUMER_SECRET);
        assert_eq!(config.consumer_key(), CONSUMER_KEY);
        assert_eq!(config.consumer_secret(), CONSUMER_SECRET);
        assert_eq!(config.callback_url(), "oob");
        assert_eq!(config.provider(), &Endpoint::default());

        let config = config
            .callback("http://printer.example.com/ready")
            .endpoint(Endpoint::new(
                "https://photos.example.net/initiate",
                "https://photos.example.net/authorize",
                "https://photos.example.net/token",
            ));
        assert_eq!(config.callback_url(), "http://printer.example.com/ready");
        assert_eq!(
            config.provider().access_token_url,
            "https://photos.example.net/token"
        );
    }

    #[test]
    fn debug_hides_secrets() {
        let config = format!("{:?}", Config::new(CONSUMER_KEY, CONSUMER_SECRET));
        assert!(config.contains(CONSUMER_KEY));
        assert!(!config.contains(CONSUMER_SECRET));

        let token = format!("{:?}", Token::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00"));
        assert!(token.contains("nnch734d00sl2jdk"));
        assert!(!token.contains("pfkkdhi9sl3r4s00"));
    }

    #[test]
    fn deserializes_config() {
        let config: Config = serde_json::from_str(
            r#"{
                "consumer_key": "dpf43f3p2l4k3l03",
                "consumer_secret": "kd94hf93k423kf44",
                "endpoint": {
                    "request_token_url": "https://photos.example.net/initiate",
                    "authorize_url": "https://photos.example.net/authorize",
                    "access_token_url": "https://photos.example.net/token"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.consumer_key(), CONSUMER_KEY);
        assert_eq!(config.consumer_secret(), CONSUMER_SECRET);
        assert_eq!(config.callback_url(), OUT_OF_BAND_CALLBACK);
        assert_eq!(
            config.provider(),
            &Endpoint::new(
                "https://photos.example.net/initiate",
                "https://photos.example.net/authorize",
                "https://photos.example.net/token",
            )
        );

        let config: Config = serde_json::from_str(
            r#"{
                "consumer_key": "ck",
                "consumer_secret": "cs",
                "callback_url": "http://printer.example.com/ready",
                "endpoint": {
                    "request_token_url": "",
                    "authorize_url": "",
                    "access_token_url": ""
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.callback_url(), "http://printer.example.com/ready");
    }

    #[test]
    fn token_survives_serialization() {
        let token = Token::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(
            json,
            r#"{"token":"nnch734d00sl2jdk","token_secret":"pfkkdhi9sl3r4s00"}"#
        );
        assert_eq!(serde_json::from_str::<Token>(&json).unwrap(), token);
    }
}
