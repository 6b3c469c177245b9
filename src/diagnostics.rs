//! Structured extraction diagnostics.
//!
//! Compilation never fails, so entities that lose attributes or are dropped
//! outright would otherwise vanish silently. Each such case is recorded as a
//! JSON-serializable diagnostic that authoring tools can show next to the
//! offending line.

use serde::Serialize;

use crate::scanner::EntityToken;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Duration keyword without a number before it. The descriptor is dropped.
    MissingDuration,
    /// Background keyword without a recognizable color. The descriptor is dropped.
    MissingColor,
    /// Media entity with neither a URL nor a caption. The descriptor is kept.
    MissingSource,
    /// Text or voiceover without a quoted caption. The descriptor is kept.
    MissingCaption,
}

impl DiagnosticKind {
    /// Whether the entity was left out of the output.
    pub fn drops_descriptor(self) -> bool {
        matches!(self, DiagnosticKind::MissingDuration | DiagnosticKind::MissingColor)
    }

    fn describe(self, keyword: &str) -> String {
        match self {
            DiagnosticKind::MissingDuration => {
                format!("'{}' has no number of seconds before it; beat duration dropped", keyword)
            }
            DiagnosticKind::MissingColor => {
                format!("'{}' has no color next to it; background dropped", keyword)
            }
            DiagnosticKind::MissingSource => {
                format!("'{}' has no URL or quoted caption after it", keyword)
            }
            DiagnosticKind::MissingCaption => {
                format!("'{}' has no quoted caption after it", keyword)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-based line number in the script, counting every line.
    pub line: u32,
    /// 1-based character column of the keyword.
    pub column: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtractionDiagnostic {
    pub kind: DiagnosticKind,
    pub location: SourceLocation,
    /// Keyword as written in the script.
    pub keyword: String,
    pub message: String,
}

impl ExtractionDiagnostic {
    pub fn new(kind: DiagnosticKind, line_number: usize, line: &str, token: &EntityToken) -> Self {
        let column = line[..token.keyword_offset].chars().count() + 1;
        Self {
            kind,
            location: SourceLocation {
                line: line_number as u32,
                column: column as u32,
            },
            keyword: token.keyword.clone(),
            message: kind.describe(&token.keyword),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{scan, ScanMode};

    #[test]
    fn test_column_counts_characters() {
        let line = "4 ⏲ 📢";
        let tokens = scan(line, ScanMode::default());
        let diagnostic = ExtractionDiagnostic::new(DiagnosticKind::MissingCaption, 3, line, &tokens[1]);
        assert_eq!(diagnostic.location, SourceLocation { line: 3, column: 5 });
        assert_eq!(diagnostic.keyword, "📢");
    }

    #[test]
    fn test_only_missing_duration_and_color_drop() {
        assert!(DiagnosticKind::MissingDuration.drops_descriptor());
        assert!(DiagnosticKind::MissingColor.drops_descriptor());
        assert!(!DiagnosticKind::MissingSource.drops_descriptor());
        assert!(!DiagnosticKind::MissingCaption.drops_descriptor());
    }

    #[test]
    fn test_serializes_snake_case_kind() {
        let line = "seconds";
        let tokens = scan(line, ScanMode::default());
        let diagnostic = ExtractionDiagnostic::new(DiagnosticKind::MissingDuration, 1, line, &tokens[0]);
        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(value["kind"], "missing_duration");
        assert_eq!(value["location"]["column"], 1);
    }
}
