//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};

/// Default signed URL lifetime (5 minutes)
const DEFAULT_SIGNED_URL_EXPIRATION_SECS: u64 = 5 * 60;

/// Local `DynamoDB` endpoint used when running offline
const DEFAULT_LOCAL_DYNAMODB_ENDPOINT: &str = "http://localhost:8000";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses a local `DynamoDB`)
    Development {
        /// Use the bearer token itself as the user id instead of decoding it
        disable_auth: bool,
    },
}

impl Environment {
    /// Creates an Environment from the `IS_OFFLINE` and `APP_ENV` environment variables
    ///
    /// A truthy `IS_OFFLINE` always selects development.
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        if env_flag("IS_OFFLINE") {
            return Self::development_from_env();
        }

        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::development_from_env(),
            _ => panic!("Invalid environment: {env}"),
        }
    }

    fn development_from_env() -> Self {
        Self::Development {
            disable_auth: env_flag("DISABLE_AUTH"),
        }
    }

    /// Reads a configuration variable, required outside development
    fn required_or(&self, key: &str, development_default: &str) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is not set"))
            }
            Self::Development { .. } => {
                env::var(key).unwrap_or_else(|_| development_default.to_string())
            }
        }
    }

    /// Returns the `DynamoDB` table name for todos
    ///
    /// # Panics
    ///
    /// Panics outside development if `TODOS_TABLE` is not set
    #[must_use]
    pub fn todos_table(&self) -> String {
        self.required_or("TODOS_TABLE", "Todos-dev")
    }

    /// Returns the name of the todos-by-user index
    ///
    /// # Panics
    ///
    /// Panics outside development if `TODOS_INDEX` is not set
    #[must_use]
    pub fn todos_index(&self) -> String {
        self.required_or("TODOS_INDEX", "UserIdIndex")
    }

    /// Returns the `DynamoDB` table name for comments
    ///
    /// # Panics
    ///
    /// Panics outside development if `COMMENTS_TABLE` is not set
    #[must_use]
    pub fn comments_table(&self) -> String {
        self.required_or("COMMENTS_TABLE", "Comments-dev")
    }

    /// Returns the name of the comments-by-todo index
    ///
    /// # Panics
    ///
    /// Panics outside development if `COMMENTS_INDEX` is not set
    #[must_use]
    pub fn comments_index(&self) -> String {
        self.required_or("COMMENTS_INDEX", "TodoIdIndex")
    }

    /// Returns the S3 bucket name for todo attachments
    ///
    /// # Panics
    ///
    /// Panics outside development if `IMAGES_S3_BUCKET` is not set
    #[must_use]
    pub fn images_bucket(&self) -> String {
        self.required_or("IMAGES_S3_BUCKET", "todo-images-dev")
    }

    /// Signed URL expiry time in seconds
    ///
    /// Invalid values fall back to the default of 5 minutes.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn signed_url_expiration_secs(&self) -> u64 {
        env::var("SIGNED_URL_EXPIRATION")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_SIGNED_URL_EXPIRATION_SECS)
    }

    /// Whether bearer tokens are taken verbatim as user ids
    #[must_use]
    pub const fn disable_auth(&self) -> bool {
        matches!(self, Self::Development { disable_auth: true })
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Staging)
    }

    /// Port for the local HTTP listener
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but not a valid port number
    #[allow(clippy::unused_self)]
    pub fn port(&self) -> Result<u16, std::num::ParseIntError> {
        env::var("PORT").map_or(Ok(3000), |p| p.parse())
    }

    /// Returns the endpoint URL to use for `DynamoDB`
    #[must_use]
    pub fn override_dynamodb_endpoint_url(&self) -> Option<String> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // Local DynamoDB for development
            Self::Development { .. } => Some(
                env::var("DYNAMODB_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_LOCAL_DYNAMODB_ENDPOINT.to_string()),
            ),
        }
    }

    /// AWS configuration with retry and timeout settings
    #[allow(clippy::unused_self)]
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config)
            .build()
    }

    /// AWS `DynamoDB` service configuration
    pub async fn dynamodb_client_config(&self) -> aws_sdk_dynamodb::Config {
        let aws_config = self.aws_config().await;
        let dynamodb_config: aws_sdk_dynamodb::Config = (&aws_config).into();
        let mut builder = dynamodb_config.to_builder();

        if let Some(endpoint_url) = self.override_dynamodb_endpoint_url() {
            tracing::info!("Using local DynamoDB at {endpoint_url}");
            builder.set_endpoint_url(Some(endpoint_url));
        }

        builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        (&aws_config).into()
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).is_ok_and(|val| matches!(val.trim().to_lowercase().as_str(), "true" | "1"))
}
