//! Diagnostic codes for non-fatal findings
//!
//! IMPORTANT: Diagnostic codes are versioned and stable.
//! NEVER rename or remove codes - they are part of the public API.
//! Add new codes with new names only.
//!
//! Fatal problems (missing tables or columns) are errors, not diagnostics.

use serde::{Deserialize, Serialize};

/// Diagnostic code registry (v1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    // Data quality (1xxx)
    /// A cell was empty and an empty string was substituted
    DataMissingValue,

    /// A cell held a value of unexpected type and was coerced to an empty string
    DataCoercedValue,

    // Lookups (2xxx)
    /// A graph node names an entity absent from the Entities table
    LookupMiss,
}

impl DiagnosticCode {
    /// Get the diagnostic code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataMissingValue => "DATA_MISSING_VALUE",
            Self::DataCoercedValue => "DATA_COERCED_VALUE",
            Self::LookupMiss => "LOOKUP_MISS",
        }
    }

    /// Default severity for this code
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DataMissingValue | Self::DataCoercedValue => Severity::Warn,
            Self::LookupMiss => Severity::Info,
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Warning - the run continues with a substituted value
    Warn,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
        }
    }
}

/// Cell location in an input table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Table name ("Entities" or "Attributes")
    pub table: String,

    /// Data row number (1-indexed, header excluded)
    pub row: usize,

    /// Column name
    pub column: String,
}

impl Location {
    /// Create a location pointing at a single cell
    pub fn cell(table: impl Into<String>, row: usize, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            row,
            column: column.into(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} row {}, column '{}'", self.table, self.row, self.column)
    }
}

/// A non-fatal finding with structured metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable diagnostic code
    pub code: DiagnosticCode,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Input location, when the finding comes from a table cell
    pub location: Option<Location>,

    /// Entity the finding concerns
    pub entity: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with the code's default severity
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.default_severity(),
            message: message.into(),
            location: None,
            entity: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the entity
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_code_stability() {
        assert_eq!(DiagnosticCode::DataMissingValue.as_str(), "DATA_MISSING_VALUE");
        assert_eq!(DiagnosticCode::DataCoercedValue.as_str(), "DATA_COERCED_VALUE");
        assert_eq!(DiagnosticCode::LookupMiss.as_str(), "LOOKUP_MISS");
    }

    #[test]
    fn default_severities() {
        let warn = Diagnostic::new(DiagnosticCode::DataCoercedValue, "coerced");
        assert_eq!(warn.severity, Severity::Warn);

        let info = Diagnostic::new(DiagnosticCode::LookupMiss, "unknown entity");
        assert_eq!(info.severity, Severity::Info);
    }

    #[test]
    fn diagnostic_display_and_serialization() {
        let diag = Diagnostic::new(DiagnosticCode::DataMissingValue, "Empty 'Field Name'")
            .with_location(Location::cell("Attributes", 3, "Field Name"))
            .with_entity("Contact");

        assert_eq!(
            diag.to_string(),
            "[DATA_MISSING_VALUE] Empty 'Field Name' (Attributes row 3, column 'Field Name')"
        );

        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("DATA_MISSING_VALUE"));
        assert!(json.contains("\"warn\""));
        assert!(json.contains("\"column\":\"Field Name\""));
    }
}
