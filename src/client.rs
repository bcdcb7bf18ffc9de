use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_cloudwatch::types::{Datapoint, Dimension, Statistic};
use aws_smithy_types::error::display::DisplayErrorContext;
use chrono::{DateTime, Utc};
use std::time::SystemTime;

use crate::catalog::{AggregationKind, NAMESPACE};
use crate::error::{PluginError, Result};

/// Seam over the CloudWatch statistics API.
#[async_trait]
pub trait CloudWatchApi: Send + Sync {
    /// Fetch datapoints for one metric on one shard over `[start, end]`,
    /// reduced by `statistic` at `period`-second granularity.
    #[allow(clippy::too_many_arguments)]
    async fn get_metric_statistics(
        &self,
        stream_name: &str,
        shard_id: &str,
        metric_name: &str,
        statistic: AggregationKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period: i32,
    ) -> Result<Vec<Datapoint>>;
}

/// Seam over the Kinesis stream-description API.
#[async_trait]
pub trait KinesisApi: Send + Sync {
    /// Shard ids currently reported for the stream, in API order.
    /// An empty stream yields an empty list, not an error.
    async fn describe_shard_ids(&self, stream_name: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl CloudWatchApi for aws_sdk_cloudwatch::Client {
    async fn get_metric_statistics(
        &self,
        stream_name: &str,
        shard_id: &str,
        metric_name: &str,
        statistic: AggregationKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period: i32,
    ) -> Result<Vec<Datapoint>> {
        let statistic = match statistic {
            AggregationKind::Average => Statistic::Average,
            AggregationKind::Maximum => Statistic::Maximum,
            AggregationKind::Minimum => Statistic::Minimum,
        };

        let response = self
            .get_metric_statistics()
            .namespace(NAMESPACE)
            .metric_name(metric_name)
            .dimensions(
                Dimension::builder()
                    .name("StreamName")
                    .value(stream_name)
                    .build(),
            )
            .dimensions(Dimension::builder().name("ShardId").value(shard_id).build())
            .start_time(to_smithy_time(start))
            .end_time(to_smithy_time(end))
            .period(period)
            .statistics(statistic)
            .send()
            .await
            .map_err(|e| PluginError::Fetch(DisplayErrorContext(&e).to_string()))?;

        Ok(response.datapoints.unwrap_or_default())
    }
}

#[async_trait]
impl KinesisApi for aws_sdk_kinesis::Client {
    async fn describe_shard_ids(&self, stream_name: &str) -> Result<Vec<String>> {
        let response = self
            .describe_stream()
            .stream_name(stream_name)
            .send()
            .await
            .map_err(|e| PluginError::Fetch(DisplayErrorContext(&e).to_string()))?;

        Ok(response
            .stream_description()
            .map(|d| d.shards())
            .unwrap_or_default()
            .iter()
            .map(|s| s.shard_id().to_string())
            .collect())
    }
}

/// Optional static credential and region overrides from the command line.
/// Empty strings mean "use the ambient chain".
#[derive(Debug, Default, Clone)]
pub struct AwsAuth {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl AwsAuth {
    /// Static credentials apply only when both key halves are present.
    pub fn has_static_credentials(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}

/// Build the CloudWatch and Kinesis clients bound to one shared credential
/// and region configuration.
///
/// Static credentials are used only when both key halves are present;
/// otherwise resolution is delegated to the SDK's default chain
/// (environment, shared config, instance role).
pub async fn build_clients(auth: &AwsAuth) -> (aws_sdk_cloudwatch::Client, aws_sdk_kinesis::Client) {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if auth.has_static_credentials() {
        loader = loader.credentials_provider(Credentials::new(
            auth.access_key_id.clone(),
            auth.secret_access_key.clone(),
            None,
            None,
            "command-line",
        ));
    }

    if !auth.region.is_empty() {
        loader = loader.region(aws_config::Region::new(auth.region.clone()));
    }

    let config = loader.load().await;

    (
        aws_sdk_cloudwatch::Client::new(&config),
        aws_sdk_kinesis::Client::new(&config),
    )
}

fn to_smithy_time(ts: DateTime<Utc>) -> aws_smithy_types::DateTime {
    let system_time: SystemTime = ts.into();
    aws_smithy_types::DateTime::from(system_time)
}
