//! Monitoring-agent plugin for shard-level AWS Kinesis Data Streams metrics.
//!
//! Polls CloudWatch for per-shard statistics over a short trailing window
//! and exposes them as a flat key/value map plus static graph metadata, in
//! the format the host monitoring agent consumes. One pass per invocation;
//! the host owns scheduling and delta computation.

pub mod catalog;
pub mod client;
pub mod error;
pub mod graphs;
pub mod output;
pub mod plugin;

// Make mock clients available for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test;

pub use catalog::{AggregationKind, MetricDefinition, CATALOG};
pub use client::{build_clients, AwsAuth, CloudWatchApi, KinesisApi};
pub use error::{PluginError, Result};
pub use plugin::{KinesisStreamsShardPlugin, DEFAULT_PREFIX};
