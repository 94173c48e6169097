//! STS `GetCallerIdentity` validity checks.

use async_trait::async_trait;
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sts::error::DisplayErrorContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CheckError, ValidityChecker};
use crate::storage::StorePaths;

/// Client settings for the STS checker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StsSettings {
    /// Region to call. Falls back to the profile's own region, then the
    /// SDK's default resolution.
    pub region: Option<String>,

    /// Override the STS endpoint (e.g. a local mock).
    pub endpoint_url: Option<String>,
}

/// Checks profiles by calling STS with credentials loaded from the profile.
///
/// Credentials always come from the profile files, never from `AWS_*`
/// environment variables, so each check really exercises the named profile.
pub struct StsValidityChecker {
    settings: StsSettings,
    store: Option<StorePaths>,
}

impl StsValidityChecker {
    pub fn new(settings: StsSettings) -> Self {
        Self {
            settings,
            store: None,
        }
    }

    /// Read profiles from these files instead of the SDK's default locations.
    pub fn with_store(mut self, store: StorePaths) -> Self {
        self.store = Some(store);
        self
    }

    fn profile_files(&self) -> Option<ProfileFiles> {
        self.store.as_ref().map(|store| {
            ProfileFiles::builder()
                .with_file(ProfileFileKind::Credentials, store.credentials_file.clone())
                .with_file(ProfileFileKind::Config, store.config_file.clone())
                .build()
        })
    }

    async fn client_for(&self, profile_name: &str) -> aws_sdk_sts::Client {
        let mut credentials = ProfileFileCredentialsProvider::builder().profile_name(profile_name);
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).profile_name(profile_name);

        if let Some(files) = self.profile_files() {
            credentials = credentials.profile_files(files.clone());
            loader = loader.profile_files(files);
        }
        if let Some(region) = &self.settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &self.settings.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader
            .credentials_provider(credentials.build())
            .load()
            .await;
        aws_sdk_sts::Client::new(&sdk_config)
    }
}

#[async_trait]
impl ValidityChecker for StsValidityChecker {
    async fn check(&self, profile_name: &str) -> Result<(), CheckError> {
        let client = self.client_for(profile_name).await;

        match client.get_caller_identity().send().await {
            Ok(identity) => {
                debug!(
                    profile = %profile_name,
                    arn = identity.arn().unwrap_or_default(),
                    "Caller identity confirmed"
                );
                Ok(())
            }
            Err(err) => {
                let status = err.raw_response().map(|response| response.status().as_u16());
                debug!(profile = %profile_name, ?status, "GetCallerIdentity failed");
                Err(CheckError::from_status(
                    status,
                    DisplayErrorContext(&err).to_string(),
                ))
            }
        }
    }
}
