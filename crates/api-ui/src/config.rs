use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub allow_origin: Option<String>,
}

// Non serializable, no Clone, Copy, Debug traits
#[derive(Default)]
pub struct AuthConfig {
    jwt_secret: String,
}

impl AuthConfig {
    #[must_use]
    pub const fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    #[must_use]
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}
