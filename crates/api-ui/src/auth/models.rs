use jsonwebtoken::{DecodingKey, TokenData, Validation, decode};
use serde::{Deserialize, Serialize};
#[cfg(test)]
use {
    super::error::{AuthResult, CreateJwtSnafu},
    chrono::{Duration, Utc},
    jsonwebtoken::{EncodingKey, Header, encode},
    snafu::ResultExt,
};

// For internal use, should not be included into open api spec
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user the token is issued to
    pub aud: String, // validate audience since as it can be deployed on multiple hosts
    pub iat: i64,    // Issued At
    pub exp: i64,    // Expiration Time
}

// tokens are minted outside this service, tests mint their own
#[cfg(test)]
impl Claims {
    #[must_use]
    pub(crate) fn new(user_id: &str, audience: &str, expiration: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            aud: audience.to_string(),
            iat: now.timestamp(),
            exp: (now + expiration).timestamp(),
        }
    }
}

#[cfg(test)]
pub(crate) fn create_jwt(claims: &Claims, jwt_secret: &str) -> AuthResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .context(CreateJwtSnafu)
}

pub fn get_claims_validate_jwt_token(
    token: &str,
    audience: &str,
    jwt_secret: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_audience(&[audience]);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_checks_audience_and_secret() {
        let claims = Claims::new("alice", "localhost", Duration::minutes(5));
        let token = create_jwt(&claims, "secret").unwrap();

        let decoded = get_claims_validate_jwt_token(&token, "localhost", "secret").unwrap();
        assert_eq!(decoded.claims.sub, "alice");
        assert!(get_claims_validate_jwt_token(&token, "other-host", "secret").is_err());
        assert!(get_claims_validate_jwt_token(&token, "localhost", "wrong").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims::new("alice", "localhost", Duration::minutes(-5));
        let token = create_jwt(&claims, "secret").unwrap();
        assert!(get_claims_validate_jwt_token(&token, "localhost", "secret").is_err());
    }
}
