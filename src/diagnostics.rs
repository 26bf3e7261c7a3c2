use std::fmt;

use serde::Serialize;
use typewrap_base::marker::SourceLocation;

pub const PERSISTENCE_FAILURE: &str = "SGE000";
pub const DECLARATION_SKIPPED: &str = "TW0001";

#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// A message reported back to the host compiler.
#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct Diagnostic {
    pub id: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    /// The generated text could not be written under the project path.
    pub fn persistence_failure<E: fmt::Display>(location: &SourceLocation, err: E) -> Self {
        Self {
            id: PERSISTENCE_FAILURE,
            category: "Generator",
            severity: Severity::Error,
            message: format!("Generator failed to write generated source: {}", err),
            location: location.clone(),
        }
    }

    /// A declaration was dropped from the batch.
    pub fn declaration_skipped<E: fmt::Display>(location: &SourceLocation, type_name: &str, err: E) -> Self {
        Self {
            id: DECLARATION_SKIPPED,
            category: "Generator",
            severity: Severity::Warning,
            message: format!("No wrapper generated for {}: {}", type_name, err),
            location: location.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}): {} {}: {}",
            self.location.path, self.location.line, self.severity, self.id, self.message
        )
    }
}
