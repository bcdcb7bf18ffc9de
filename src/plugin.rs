//! Core fetch pipeline for shard-level Kinesis metrics.
//!
//! One pass per invocation: enumerate the stream's shards, fetch the
//! latest CloudWatch datapoint for every (shard, catalog entry) pair,
//! and aggregate the values into a flat key map. The host agent owns
//! scheduling, so there is no loop and no state across runs.

use aws_sdk_cloudwatch::types::Datapoint;
use chrono::{Duration, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::catalog::{AggregationKind, MetricDefinition, CATALOG};
use crate::client::{CloudWatchApi, KinesisApi};
use crate::error::{PluginError, Result};
use crate::graphs::{self, GraphDef};

/// Trailing query window (3 min).
const WINDOW_SECONDS: i64 = 180;
/// Datapoint granularity.
const PERIOD_SECONDS: i32 = 60;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "kinesis-streams-shard";

/// Shard-level Kinesis metrics plugin, generic over the two API clients
/// so tests can substitute mocks.
pub struct KinesisStreamsShardPlugin<C, K> {
    stream_name: String,
    prefix: String,
    cloudwatch: C,
    kinesis: K,
}

impl<C, K> KinesisStreamsShardPlugin<C, K>
where
    C: CloudWatchApi,
    K: KinesisApi,
{
    pub fn new(
        stream_name: impl Into<String>,
        prefix: impl Into<String>,
        cloudwatch: C,
        kinesis: K,
    ) -> Self {
        Self {
            stream_name: stream_name.into(),
            prefix: prefix.into(),
            cloudwatch,
            kinesis,
        }
    }

    /// Namespace prepended by the host to every emitted key.
    pub fn metric_key_prefix(&self) -> &str {
        if self.prefix.is_empty() {
            DEFAULT_PREFIX
        } else {
            &self.prefix
        }
    }

    /// Shard ids currently reported by the stream-description API.
    pub async fn shard_ids(&self) -> Result<Vec<String>> {
        self.kinesis.describe_shard_ids(&self.stream_name).await
    }

    /// Latest datapoint value for `def` on `shard_id` over the trailing
    /// window ending now.
    pub async fn fetch_last_point(&self, def: &MetricDefinition, shard_id: &str) -> Result<f64> {
        let now = Utc::now();

        let datapoints = self
            .cloudwatch
            .get_metric_statistics(
                &self.stream_name,
                shard_id,
                def.cloudwatch_name,
                def.aggregation,
                now - Duration::seconds(WINDOW_SECONDS),
                now,
                PERIOD_SECONDS,
            )
            .await?;

        latest_point(&datapoints, def.aggregation).ok_or(PluginError::NoData)
    }

    /// Fetch every catalog metric for every shard.
    ///
    /// Shard enumeration failure aborts the run; a failed or empty metric
    /// query is logged and its key omitted, so a partial map is a normal
    /// outcome.
    pub async fn fetch_metrics(&self) -> Result<HashMap<String, f64>> {
        self.fetch_catalog(CATALOG).await
    }

    /// Like [`fetch_metrics`](Self::fetch_metrics) but over an explicit
    /// definition slice.
    pub async fn fetch_catalog(
        &self,
        catalog: &[MetricDefinition],
    ) -> Result<HashMap<String, f64>> {
        let mut stat = HashMap::new();

        let shard_ids = self.shard_ids().await?;
        debug!(
            stream = %self.stream_name,
            shards = shard_ids.len(),
            "enumerated shards"
        );

        for shard_id in &shard_ids {
            for def in catalog {
                match self.fetch_last_point(def, shard_id).await {
                    Ok(value) => {
                        stat.insert(def.key(shard_id), value);
                    }
                    Err(e) => {
                        warn!(
                            shard = %shard_id,
                            metric = def.cloudwatch_name,
                            error = %e,
                            "skipping metric"
                        );
                    }
                }
            }
        }

        Ok(stat)
    }

    /// Display-graph metadata for the configured prefix.
    pub fn graph_definition(&self) -> BTreeMap<&'static str, GraphDef> {
        graphs::graph_definition(self.metric_key_prefix())
    }
}

/// Reduce a window of datapoints to the value of the newest one, reading
/// the field matching `kind`. On a timestamp tie the datapoint iterated
/// last wins; the input order is not assumed sorted.
fn latest_point(datapoints: &[Datapoint], kind: AggregationKind) -> Option<f64> {
    let mut latest: Option<(i64, u32)> = None;
    let mut latest_val = None;

    for dp in datapoints {
        let Some(ts) = dp.timestamp() else { continue };
        let ts = (ts.secs(), ts.subsec_nanos());

        if let Some(cur) = latest {
            if ts < cur {
                continue;
            }
        }

        latest = Some(ts);
        latest_val = match kind {
            AggregationKind::Average => dp.average(),
            AggregationKind::Maximum => dp.maximum(),
            AggregationKind::Minimum => dp.minimum(),
        };
    }

    latest_val
}
