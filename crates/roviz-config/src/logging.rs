//! Output format for the client's `tracing` subscriber.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How log records are rendered.
///
/// Parsed case-insensitively from `ROVIZ_LOG_FORMAT` or `--log-format`;
/// `text` is accepted for `compact`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per record, event fields flattened.
    #[default]
    Json,
    /// Single-line records for a terminal.
    #[serde(alias = "text")]
    #[strum(to_string = "compact", serialize = "text")]
    Compact,
}

/// Returned when a log format name is not recognised.
pub type LogFormatParseError = strum::ParseError;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("JSON", LogFormat::Json)]
    #[case("compact", LogFormat::Compact)]
    #[case("Text", LogFormat::Compact)]
    fn parses_case_insensitively(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>().expect("parse"), expected);
    }

    #[test]
    fn displays_the_canonical_name() {
        assert_eq!(LogFormat::Compact.to_string(), "compact");
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn rejects_unknown_format() {
        assert!("pretty".parse::<LogFormat>().is_err());
    }

    #[test]
    fn deserialises_the_text_alias() {
        let format: LogFormat = serde_json::from_str("\"text\"").expect("deserialise");
        assert_eq!(format, LogFormat::Compact);
    }
}
