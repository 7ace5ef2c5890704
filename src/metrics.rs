//! Metrics instrumentation for the header chain core.

/// Times a fallible block and records success/error counters plus a duration
/// histogram, all labeled by method name.
macro_rules! observe_metrics_for_result {
    ($success_metric:expr, $error_metric:expr, $duration_metric:expr, $method_name:expr, $block:expr) => {{
        let start_time = std::time::Instant::now();
        let result = $block;
        let duration = start_time.elapsed().as_secs_f64();

        if result.is_ok() {
            metrics::counter!($success_metric, "method" => $method_name).increment(1);
        } else {
            metrics::counter!($error_metric, "method" => $method_name).increment(1);
        }
        metrics::histogram!($duration_metric, "method" => $method_name).record(duration);

        result
    }};
}

pub(crate) use observe_metrics_for_result;

/// Container for header chain metric names.
#[derive(Debug, Clone)]
pub(crate) struct Metrics;

impl Metrics {
    pub(crate) const REQUESTS_SUCCESS_TOTAL: &'static str = "header_chain_success_total";
    pub(crate) const REQUESTS_ERROR_TOTAL: &'static str = "header_chain_error_total";
    pub(crate) const REQUEST_DURATION_SECONDS: &'static str = "header_chain_duration_seconds";

    pub(crate) const METHOD_GET_HEADER_BY_HASH: &'static str = "get_header_by_hash";
    pub(crate) const METHOD_HEADER_EXISTS: &'static str = "header_exists";
    pub(crate) const METHOD_GET_SCORE: &'static str = "get_score";
    pub(crate) const METHOD_GET_CANONICAL_HASH: &'static str = "get_canonical_hash";
    pub(crate) const METHOD_GET_CANONICAL_HEADER_BY_NUMBER: &'static str =
        "get_canonical_header_by_number";
    pub(crate) const METHOD_GET_CANONICAL_HEAD: &'static str = "get_canonical_head";
    pub(crate) const METHOD_TRY_GET_HEAD: &'static str = "try_get_head";
    pub(crate) const METHOD_PERSIST: &'static str = "persist";
    pub(crate) const METHOD_PERSIST_CHAIN: &'static str = "persist_chain";

    pub(crate) fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::REQUESTS_SUCCESS_TOTAL,
            metrics::Unit::Count,
            "Total number of successful header chain requests"
        );
        metrics::describe_counter!(
            Self::REQUESTS_ERROR_TOTAL,
            metrics::Unit::Count,
            "Total number of failed header chain requests"
        );
        metrics::describe_histogram!(
            Self::REQUEST_DURATION_SECONDS,
            metrics::Unit::Seconds,
            "Duration of header chain requests"
        );
    }

    fn zero_method(method_name: &'static str) {
        metrics::counter!(Self::REQUESTS_SUCCESS_TOTAL, "method" => method_name).increment(0);
        metrics::counter!(Self::REQUESTS_ERROR_TOTAL, "method" => method_name).increment(0);
        metrics::histogram!(Self::REQUEST_DURATION_SECONDS, "method" => method_name).record(0.0);
    }

    fn zero() {
        Self::zero_method(Self::METHOD_GET_HEADER_BY_HASH);
        Self::zero_method(Self::METHOD_HEADER_EXISTS);
        Self::zero_method(Self::METHOD_GET_SCORE);
        Self::zero_method(Self::METHOD_GET_CANONICAL_HASH);
        Self::zero_method(Self::METHOD_GET_CANONICAL_HEADER_BY_NUMBER);
        Self::zero_method(Self::METHOD_GET_CANONICAL_HEAD);
        Self::zero_method(Self::METHOD_TRY_GET_HEAD);
        Self::zero_method(Self::METHOD_PERSIST);
        Self::zero_method(Self::METHOD_PERSIST_CHAIN);
    }
}
