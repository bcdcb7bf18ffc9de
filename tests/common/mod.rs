use aws_sdk_cloudwatch::types::Datapoint;
use aws_smithy_types::DateTime;

/// Datapoint carrying only an Average value.
pub fn average_point(secs: i64, value: f64) -> Datapoint {
    Datapoint::builder()
        .timestamp(DateTime::from_secs(secs))
        .average(value)
        .build()
}

/// Datapoint with all three statistic fields populated, so any catalog
/// entry can extract its value.
pub fn stat_point(secs: i64, average: f64, maximum: f64, minimum: f64) -> Datapoint {
    Datapoint::builder()
        .timestamp(DateTime::from_secs(secs))
        .average(average)
        .maximum(maximum)
        .minimum(minimum)
        .build()
}
