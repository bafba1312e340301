use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::core::config::AuthConfig;
use crate::core::error::AppError;

use super::model::{AccessTokenClaims, AccountStatus, AuthenticatedUser};

/// Verifies the signed access token carried in the auth cookie.
///
/// Tokens are HS256-signed by the identity service with a shared secret.
/// Verification checks signature and expiry (with configured leeway), then
/// enforces that the account status claim is ACTIVE before the request is
/// allowed anywhere near a handler.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_name: String,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            cookie_name: config.cookie_name.clone(),
        }
    }

    /// Name of the cookie the middleware should read the token from
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Auth(format!("Invalid access token: {}", e)))?;

        let claims = token_data.claims;

        if claims.status != AccountStatus::Active {
            return Err(AppError::Forbidden("Account is not active".to_string()));
        }

        Ok(AuthenticatedUser {
            sub: claims.sub,
            role: claims.role,
            status: claims.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::UserRole;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-secret";

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: SECRET.to_string(),
            cookie_name: "accessToken".to_string(),
            jwt_leeway: Duration::from_secs(0),
        }
    }

    fn mint_token(role: UserRole, status: AccountStatus, expires_in_secs: i64) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;

        let claims = AccessTokenClaims {
            sub: "user-1".to_string(),
            role,
            status,
            exp: (now + expires_in_secs) as u64,
            iat: now as u64,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_authenticated_user() {
        let verifier = TokenVerifier::new(&test_config());
        let token = mint_token(UserRole::Manager, AccountStatus::Active, 3600);

        let user = verifier.verify(&token).unwrap();
        assert_eq!(user.sub, "user-1");
        assert_eq!(user.role, UserRole::Manager);
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = TokenVerifier::new(&test_config());
        let token = mint_token(UserRole::Admin, AccountStatus::Active, -3600);

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let verifier = TokenVerifier::new(&test_config());
        let token = mint_token(UserRole::Admin, AccountStatus::Active, 3600);
        let mut tampered = token.clone();
        tampered.pop();

        assert!(matches!(verifier.verify(&tampered), Err(AppError::Auth(_))));
    }

    #[test]
    fn inactive_statuses_are_forbidden() {
        let verifier = TokenVerifier::new(&test_config());

        for status in [
            AccountStatus::Suspended,
            AccountStatus::Pending,
            AccountStatus::Banned,
        ] {
            let token = mint_token(UserRole::Admin, status, 3600);
            assert!(matches!(
                verifier.verify(&token),
                Err(AppError::Forbidden(_))
            ));
        }
    }
}
