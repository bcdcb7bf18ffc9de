//! Emission protocol spoken to the monitoring agent over stdout.
//!
//! The agent invokes the plugin two ways: with `MACKEREL_AGENT_PLUGIN_META`
//! set it expects a graph-definition JSON document, otherwise it expects
//! one `key<TAB>value<TAB>epoch` line per fetched metric. All keys are
//! namespaced by the plugin's metric key prefix.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use crate::client::{CloudWatchApi, KinesisApi};
use crate::graphs::GraphDef;
use crate::plugin::KinesisStreamsShardPlugin;

/// Environment variable the agent sets when it wants graph metadata
/// instead of values.
pub const PLUGIN_META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

#[derive(Serialize)]
struct GraphMeta<'a> {
    graphs: BTreeMap<String, &'a GraphDef>,
}

/// Render the graph-definition document: a marker line followed by the
/// graph groups keyed under `prefix`.
pub fn render_graph_meta(
    prefix: &str,
    graphs: &BTreeMap<&'static str, GraphDef>,
) -> serde_json::Result<String> {
    let graphs = graphs
        .iter()
        .map(|(key, def)| (format!("{prefix}.{key}"), def))
        .collect();

    let body = serde_json::to_string(&GraphMeta { graphs })?;
    Ok(format!("# mackerel-agent-plugin\n{body}"))
}

/// Render fetched values as `key<TAB>value<TAB>epoch` lines. Sorted by
/// key so output is stable run to run.
pub fn render_metrics(prefix: &str, metrics: &HashMap<String, f64>, at: DateTime<Utc>) -> String {
    let epoch = at.timestamp();
    let mut lines: Vec<String> = metrics
        .iter()
        .map(|(key, value)| format!("{prefix}.{key}\t{value}\t{epoch}"))
        .collect();
    lines.sort();
    lines.join("\n")
}

/// One emission pass against `out`: metadata when the agent asks for it,
/// metric values otherwise.
pub async fn run<C, K>(
    plugin: &KinesisStreamsShardPlugin<C, K>,
    mut out: impl Write,
) -> anyhow::Result<()>
where
    C: CloudWatchApi,
    K: KinesisApi,
{
    let prefix = plugin.metric_key_prefix().to_string();

    let wants_meta = std::env::var(PLUGIN_META_ENV)
        .map(|v| !v.is_empty())
        .unwrap_or(false);
    if wants_meta {
        writeln!(out, "{}", render_graph_meta(&prefix, &plugin.graph_definition())?)?;
        return Ok(());
    }

    let metrics = plugin.fetch_metrics().await?;
    let rendered = render_metrics(&prefix, &metrics, Utc::now());
    if !rendered.is_empty() {
        writeln!(out, "{rendered}")?;
    }

    Ok(())
}
