//! Static graph-definition metadata consumed by the host agent.
//!
//! Purely descriptive: which output metrics group into which display
//! graph, with labels and units. No runtime state.

use serde::Serialize;
use std::collections::BTreeMap;

/// Display unit for a graph group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Integer,
    Float,
}

/// One member metric of a graph group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphMetric {
    pub name: &'static str,
    pub label: &'static str,
}

/// One display graph: label, unit, and ordered member metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphDef {
    pub label: String,
    pub unit: Unit,
    pub metrics: Vec<GraphMetric>,
}

fn metric(name: &'static str, label: &'static str) -> GraphMetric {
    GraphMetric { name, label }
}

/// Title-case a metric key prefix for display: each hyphen-separated word
/// is capitalized and the hyphens become spaces.
pub fn title_case(prefix: &str) -> String {
    prefix
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Graph definitions for the shard metric catalog, keyed by graph group.
/// The `#` placeholder stands for the shard id. Stable for a given prefix.
pub fn graph_definition(prefix: &str) -> BTreeMap<&'static str, GraphDef> {
    let label_prefix = title_case(prefix);

    BTreeMap::from([
        (
            "bytes.#",
            GraphDef {
                label: format!("{} Bytes", label_prefix),
                unit: Unit::Integer,
                metrics: vec![
                    metric("GetRecordsBytes", "GetRecords"),
                    metric("IncomingBytes", "Total Incoming"),
                ],
            },
        ),
        (
            "iteratorage.#",
            GraphDef {
                label: format!("{} Read Delay", label_prefix),
                unit: Unit::Integer,
                metrics: vec![
                    metric("GetRecordsDelayAverageMilliseconds", "Average"),
                    metric("GetRecordsDelayMaxMilliseconds", "Max"),
                    metric("GetRecordsDelayMinMilliseconds", "Min"),
                ],
            },
        ),
        (
            "records.#",
            GraphDef {
                label: format!("{} Records", label_prefix),
                unit: Unit::Integer,
                metrics: vec![
                    metric("GetRecordsRecords", "GetRecords"),
                    metric("IncomingRecords", "Total Incoming"),
                ],
            },
        ),
        (
            "pending.#",
            GraphDef {
                label: format!("{} Pending Operations", label_prefix),
                unit: Unit::Integer,
                metrics: vec![
                    metric("ReadThroughputExceeded", "Read"),
                    metric("WriteThroughputExceeded", "Write"),
                ],
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("kinesis-streams-shard"), "Kinesis Streams Shard");
        assert_eq!(title_case("memcached"), "Memcached");
    }

    #[test]
    fn test_graph_groups() {
        let graphs = graph_definition("kinesis-streams-shard");
        assert_eq!(graphs.len(), 4);

        let bytes = &graphs["bytes.#"];
        assert_eq!(bytes.label, "Kinesis Streams Shard Bytes");
        assert_eq!(bytes.unit, Unit::Integer);
        assert_eq!(
            bytes.metrics,
            vec![
                metric("GetRecordsBytes", "GetRecords"),
                metric("IncomingBytes", "Total Incoming"),
            ]
        );

        assert_eq!(graphs["iteratorage.#"].label, "Kinesis Streams Shard Read Delay");
        assert_eq!(graphs["iteratorage.#"].metrics.len(), 3);
        assert_eq!(graphs["records.#"].label, "Kinesis Streams Shard Records");
        assert_eq!(
            graphs["pending.#"].label,
            "Kinesis Streams Shard Pending Operations"
        );
    }

    #[test]
    fn test_stable_across_calls() {
        assert_eq!(graph_definition("p"), graph_definition("p"));
    }

    #[test]
    fn test_every_catalog_metric_has_a_graph_member() {
        let graphs = graph_definition("kinesis-streams-shard");
        for def in CATALOG {
            let group = format!("{}.#", def.category);
            let graph = graphs
                .get(group.as_str())
                .unwrap_or_else(|| panic!("no graph group for {}", def.category));
            assert!(
                graph.metrics.iter().any(|m| m.name == def.output_name),
                "{} missing from {}",
                def.output_name,
                group
            );
        }
    }

    #[test]
    fn test_unit_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Unit::Integer).unwrap(), "\"integer\"");
    }
}
