//! Error adapter for converting SettleError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use settle::{LayoutError, SettleError};

/// Adapter rendering a [`SettleError`] as a miette diagnostic.
///
/// Settle errors carry no source spans, so the adapter only contributes a
/// stable error code and, where one exists, a hint.
pub struct ErrorAdapter<'a>(pub &'a SettleError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SettleError::Io(_) => "settle::io",
            SettleError::Graph(_) => "settle::graph",
            SettleError::Layout(_) => "settle::layout",
            SettleError::Config(_) => "settle::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SettleError::Layout(LayoutError::EmptyGraph) => "pass `--nodes` with at least 1",
            SettleError::Layout(LayoutError::InvalidRadius(_)) => {
                "pass a positive, finite `--radius`"
            }
            SettleError::Config(_) => "check the configuration file and command-line overrides",
            SettleError::Io(_) | SettleError::Graph(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
