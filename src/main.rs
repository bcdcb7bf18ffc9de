use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use kinesis_shard_metrics::{
    build_clients, output, AwsAuth, KinesisStreamsShardPlugin, PluginError, DEFAULT_PREFIX,
};

/// Monitoring-agent plugin reporting shard-level AWS Kinesis Data Streams
/// metrics from CloudWatch.
#[derive(Parser)]
#[command(name = "kinesis-shard-metrics", about)]
struct Cli {
    /// AWS access key id; with --secret-access-key, overrides the ambient
    /// credential chain.
    #[arg(long, default_value = "")]
    access_key_id: String,

    /// AWS secret access key.
    #[arg(long, default_value = "")]
    secret_access_key: String,

    /// AWS region override.
    #[arg(long, default_value = "")]
    region: String,

    /// Stream name to report on.
    #[arg(long)]
    identifier: Option<String>,

    /// Delta-state file path; owned by the host agent and unused here.
    #[arg(long)]
    tempfile: Option<PathBuf>,

    /// Metric key prefix.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    metric_key_prefix: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout is the metric protocol channel; logs go to stderr.
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let stream_name = cli.identifier.filter(|name| !name.is_empty()).ok_or_else(|| {
        PluginError::Configuration("--identifier (stream name) is required".to_string())
    })?;

    if let Some(path) = &cli.tempfile {
        tracing::debug!(path = %path.display(), "tempfile is managed by the host agent");
    }

    let auth = AwsAuth {
        access_key_id: cli.access_key_id,
        secret_access_key: cli.secret_access_key,
        region: cli.region,
    };
    let (cloudwatch, kinesis) = build_clients(&auth).await;

    let plugin =
        KinesisStreamsShardPlugin::new(stream_name, cli.metric_key_prefix, cloudwatch, kinesis);

    output::run(&plugin, std::io::stdout().lock()).await
}
