use crate::client::S3Config;
use crate::key_provider::DEFAULT_KEY_NAMESPACE;
use serde::Deserialize;
use std::env::vars;
use std::fmt::Display;
use tracing::info;

pub const DEFAULT_REGION: &str = "auto";
pub const DEFAULT_FILE_BUCKET: &str = "files";
pub const DEFAULT_FORM_DATA_BUCKET: &str = "form-data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Env {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "test")]
    Test,
    #[serde(rename = "prod")]
    Prod,
}

impl Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Test => write!(f, "test"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

// The final, validated configuration.
// `s3` is either complete or absent, never partially filled.
#[derive(Debug, Clone)]
pub struct Config {
    env: Env,
    s3: Option<S3Config>,
    file_bucket: String,
    form_data_bucket: String,
    key_namespace: String,
}

// Intermediate struct for deserializing environment variables.
#[derive(Deserialize)]
struct RawConfig {
    env: Env,
    storage_endpoint: Option<String>,
    storage_region: Option<String>,
    storage_access_key: Option<String>,
    storage_secret_key: Option<String>,
    file_bucket: Option<String>,
    form_data_bucket: Option<String>,
    key_namespace: Option<String>,
}

impl Config {
    /// Local configuration without S3 credentials, served by the in-memory
    /// client.
    pub fn new_for_test() -> Self {
        Self {
            env: Env::Local,
            s3: None,
            file_bucket: DEFAULT_FILE_BUCKET.to_owned(),
            form_data_bucket: DEFAULT_FORM_DATA_BUCKET.to_owned(),
            key_namespace: DEFAULT_KEY_NAMESPACE.to_owned(),
        }
    }

    pub fn environment(&self) -> Env {
        self.env
    }

    pub fn is_local(&self) -> bool {
        matches!(self.env, Env::Local)
    }

    pub fn s3(&self) -> Option<&S3Config> {
        self.s3.as_ref()
    }

    pub fn file_bucket(&self) -> &str {
        &self.file_bucket
    }

    pub fn form_data_bucket(&self) -> &str {
        &self.form_data_bucket
    }

    pub fn key_namespace(&self) -> &str {
        &self.key_namespace
    }

    /// Reads configuration from environment variables and applies
    /// environment-aware defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");
        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            env,
            storage_endpoint,
            storage_region,
            storage_access_key,
            storage_secret_key,
            file_bucket,
            form_data_bucket,
            key_namespace,
        } = raw_config;

        let s3 = match (storage_endpoint, storage_access_key, storage_secret_key) {
            (Some(endpoint), Some(access_key_id), Some(secret_access_key)) => {
                let region = storage_region.unwrap_or_else(|| DEFAULT_REGION.to_owned());
                info!(endpoint = %endpoint, region = %region, "S3 storage configured");
                Some(S3Config {
                    endpoint,
                    region,
                    access_key_id,
                    secret_access_key,
                })
            }
            (None, None, None) if !matches!(env, Env::Prod) => {
                info!("No S3 storage configured, using in-memory storage for {} environment", env);
                None
            }
            (endpoint, access_key, secret_key) => {
                let missing: Vec<&str> = [
                    ("STORAGE_ENDPOINT", endpoint.is_none()),
                    ("STORAGE_ACCESS_KEY", access_key.is_none()),
                    ("STORAGE_SECRET_KEY", secret_key.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                anyhow::bail!("{} must be set for {} environment", missing.join(", "), env);
            }
        };

        let key_namespace = key_namespace.unwrap_or_else(|| DEFAULT_KEY_NAMESPACE.to_owned());
        if key_namespace.is_empty() || key_namespace.contains('/') {
            anyhow::bail!("KEY_NAMESPACE must be a non-empty single path segment, got {key_namespace:?}");
        }

        Ok(Self {
            env,
            s3,
            file_bucket: file_bucket.unwrap_or_else(|| DEFAULT_FILE_BUCKET.to_owned()),
            form_data_bucket: form_data_bucket
                .unwrap_or_else(|| DEFAULT_FORM_DATA_BUCKET.to_owned()),
            key_namespace,
        })
    }
}
