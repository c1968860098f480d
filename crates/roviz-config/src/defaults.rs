use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default number of cascade generations followed from an explicit request.
pub const DEFAULT_MAX_CASCADE_DEPTH: usize = 3;

/// Default log filter expression used by the binary.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default cascade depth limit.
pub fn default_max_cascade_depth() -> usize {
    DEFAULT_MAX_CASCADE_DEPTH
}
