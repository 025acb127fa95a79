use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Built once from the environment at process start and passed to
/// collaborators explicitly. Nothing reads the environment after startup.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Configuration for JWT (JSON Web Token) authentication.
    pub jwt_config: JwtConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// The public base URL of this API, used when composing email links.
    pub api_base_url: String,
    /// The front-end base URL, used for password-reset links.
    pub frontend_url: String,
    /// The front-end URL that the OAuth redirect flow lands on, with the
    /// token pair appended as query parameters.
    pub web_app_auth_callback_url: String,
    /// Configuration for the Google OAuth2 client.
    pub google_client: OAuthProviderClient,
    /// Configuration for the SMTP transport.
    pub smtp: SmtpConfig,
    /// Configuration for the FMP quote provider.
    pub fmp: FmpConfig,
}

#[derive(Clone, Debug)]
/// `OAuthProviderClient` holds the configuration necessary for interacting
/// with an OAuth 2.0 provider: client id and secret, the authorization and
/// token endpoints, and the redirect URI registered with the provider.
pub struct OAuthProviderClient {
    /// The client ID for the OAuth 2.0 provider.
    pub client_id: String,
    /// The client secret for the OAuth 2.0 provider.
    pub client_secret: String,
    /// The authentication URL for the OAuth 2.0 provider.
    pub auth_url: String,
    /// The token URL for the OAuth 2.0 provider.
    pub token_url: String,
    /// The redirect URI for the OAuth 2.0 provider.
    pub redirect_uri: String,
}

#[derive(Clone, Debug)]
/// Configuration for JSON Web Token (JWT) authentication and for the signed
/// single-use tokens embedded in verification/reset emails.
pub struct JwtConfig {
    /// The secret key used to sign and verify JWTs.
    pub secret: String,
    /// The expiration time for access tokens in hours.
    pub access_expiration_hours: i64,
    /// The expiration time for refresh tokens in days.
    pub refresh_expiration_days: i64,
    /// The expiration time for email-action tokens in hours.
    pub action_expiration_hours: i64,
}

#[derive(Clone, Debug)]
/// SMTP transport settings for transactional email.
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port (typically 587 for STARTTLS).
    pub port: u16,
    /// The username for SMTP authentication; empty disables authentication.
    pub username: String,
    /// The password for SMTP authentication.
    pub password: String,
    /// Whether to negotiate STARTTLS with the server.
    pub use_tls: bool,
    /// The From address on outgoing mail.
    pub from_address: String,
}

#[derive(Clone, Debug)]
/// Settings for the FMP stock-quote API.
pub struct FmpConfig {
    /// Base URL of the quote API.
    pub base_url: String,
    /// API key appended to quote requests.
    pub api_key: String,
}

impl JwtConfig {
    /// Creates a new `JwtConfig` instance from environment variables.
    ///
    /// - `JWT_SECRET`: Required. The secret key for token signing.
    /// - `JWT_ACCESS_EXPIRATION_HOURS`: Optional. Defaults to 1 hour.
    /// - `JWT_REFRESH_EXPIRATION_DAYS`: Optional. Defaults to 7 days.
    /// - `JWT_ACTION_EXPIRATION_HOURS`: Optional. Defaults to 24 hours.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or a duration cannot be parsed.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        JwtConfig {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_expiration_hours: env::var("JWT_ACCESS_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .expect("JWT_ACCESS_EXPIRATION_HOURS must be a valid number"),
            refresh_expiration_days: env::var("JWT_REFRESH_EXPIRATION_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("JWT_REFRESH_EXPIRATION_DAYS must be a valid number"),
            action_expiration_hours: env::var("JWT_ACTION_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_ACTION_EXPIRATION_HOURS must be a valid number"),
        }
    }
}

impl SmtpConfig {
    /// Creates a new `SmtpConfig` instance from environment variables.
    ///
    /// All settings have defaults suitable for a local debug transport; a
    /// real deployment sets `EMAIL_HOST`, `EMAIL_HOST_USER` and
    /// `EMAIL_HOST_PASSWORD`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let username = env::var("EMAIL_HOST_USER").unwrap_or_default();
        let from_address = env::var("EMAIL_FROM").unwrap_or_else(|_| {
            if username.is_empty() {
                "no-reply@example.com".to_string()
            } else {
                username.clone()
            }
        });

        SmtpConfig {
            host: env::var("EMAIL_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("EMAIL_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap_or(587),
            username,
            password: env::var("EMAIL_HOST_PASSWORD").unwrap_or_default(),
            use_tls: env::var("EMAIL_USE_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            from_address,
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: "development" or "production"
    /// - `DATABASE_URL`: Connection string for the database
    /// - `JWT_SECRET`: Secret key for token signing (via `JwtConfig::from_env()`)
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:5173")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `API_BASE_URL`: Public base URL for email links (default: "http://localhost:8080")
    /// - `FRONTEND_URL`: Front-end base URL (default: "http://localhost:5173")
    /// - `WEB_APP_AUTH_CALLBACK_URL`: OAuth redirect landing page
    ///   (default: "http://localhost:5173/auth/callback")
    /// - Google OAuth, SMTP and FMP settings (see the sub-struct impls)
    ///
    /// # Panics
    ///
    /// Panics if required environment variables are missing or if numeric
    /// values cannot be parsed correctly.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_config: JwtConfig::from_env(),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            web_app_auth_callback_url: env::var("WEB_APP_AUTH_CALLBACK_URL")
                .unwrap_or_else(|_| "http://localhost:5173/auth/callback".to_string()),
            google_client: OAuthProviderClient {
                client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
                auth_url: env::var("GOOGLE_AUTH_URL")
                    .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string()),
                token_url: env::var("GOOGLE_TOKEN_URL")
                    .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v4/token".to_string()),
                redirect_uri: env::var("GOOGLE_REDIRECT_URI").unwrap_or_else(|_| {
                    "http://localhost:8080/api/auth/google-login".to_string()
                }),
            },
            smtp: SmtpConfig::from_env(),
            fmp: FmpConfig {
                base_url: env::var("FMP_BASE_URL")
                    .unwrap_or_else(|_| "https://financialmodelingprep.com/api/v3".to_string()),
                api_key: env::var("FMP_KEY").unwrap_or_default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_falls_back_to_defaults() {
        temp_env::with_vars(
            [
                ("ENVIRONMENT", Some("development")),
                ("DATABASE_URL", Some("postgresql://u:p@localhost/tradez")),
                ("JWT_SECRET", Some("test-secret")),
                ("PORT", None),
                ("WORKERS", None),
                ("CORS_ALLOWED_ORIGIN", None),
            ],
            || {
                let config = Config::from_env();
                assert_eq!(config.server_port, 8080);
                assert_eq!(config.num_workers, 4);
                assert_eq!(config.cors_allowed_origin, "http://localhost:5173");
                assert_eq!(config.jwt_config.access_expiration_hours, 1);
                assert_eq!(config.jwt_config.refresh_expiration_days, 7);
            },
        );
    }

    #[test]
    fn smtp_tls_flag_parses_case_insensitively() {
        temp_env::with_vars(
            [
                ("EMAIL_HOST", Some("smtp.example.com")),
                ("EMAIL_USE_TLS", Some("False")),
                ("EMAIL_HOST_USER", Some("mailer@example.com")),
                ("EMAIL_FROM", None),
            ],
            || {
                let smtp = SmtpConfig::from_env();
                assert!(!smtp.use_tls);
                assert_eq!(smtp.host, "smtp.example.com");
                // From falls back to the authenticated user
                assert_eq!(smtp.from_address, "mailer@example.com");
            },
        );
    }

    #[test]
    fn smtp_from_defaults_without_user() {
        temp_env::with_vars(
            [
                ("EMAIL_HOST_USER", None::<&str>),
                ("EMAIL_FROM", None),
            ],
            || {
                let smtp = SmtpConfig::from_env();
                assert_eq!(smtp.from_address, "no-reply@example.com");
            },
        );
    }
}
