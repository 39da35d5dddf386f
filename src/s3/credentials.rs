use secrecy::{ExposeSecret, SecretString};
use std::env;

#[derive(Clone, Debug)]
pub struct Credentials {
    // AWS_ACCESS_KEY_ID
    key: String,
    // AWS_SECRET_ACCESS_KEY
    secret: SecretString,
    // AWS_SESSION_TOKEN, only for temporary credentials
    session_token: Option<SecretString>,
}

impl Credentials {
    /// Environment variables take priority over the passed keys
    #[must_use]
    pub fn new(access: &str, secret: &SecretString) -> Self {
        let key = env::var("AWS_ACCESS_KEY_ID").unwrap_or_else(|_| access.to_string());
        let secret = env::var("AWS_SECRET_ACCESS_KEY")
            .map_or_else(|_| secret.clone(), |s| SecretString::new(s.into()));
        let session_token = env::var("AWS_SESSION_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .map(|token| SecretString::new(token.into()));

        Self {
            key,
            secret,
            session_token,
        }
    }

    /// Get a reference to the access key ID.
    #[must_use]
    pub fn aws_access_key_id(&self) -> &str {
        &self.key
    }

    /// Get a reference to the secret access key.
    #[must_use]
    pub fn aws_secret_access_key(&self) -> &SecretString {
        &self.secret
    }

    #[must_use]
    pub const fn aws_session_token(&self) -> Option<&SecretString> {
        self.session_token.as_ref()
    }

    /// True when there is nothing to sign requests with
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() || self.secret.expose_secret().is_empty()
    }
}
