//! Error adapter for converting RackError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Errors that carry their source text (malformed device attributes and
//! inventory errors with a location) are rendered with a labeled snippet;
//! every other variant is rendered as a plain message with an error code.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use rackdraw::RackError;

/// Adapter for an error that points into its source text.
pub struct DiagnosticAdapter<'a> {
    err: &'a RackError,
    src: &'a str,
    span: Range<usize>,
    label: String,
    help: Option<&'static str>,
    code: &'static str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create an adapter for `err` if it carries a source location.
    pub fn new(err: &'a RackError) -> Option<Self> {
        match err {
            RackError::MalformedAttribute {
                src, span, issue, ..
            } => Some(Self {
                err,
                src: src.as_str(),
                span: span.clone(),
                label: issue.to_string(),
                help: Some(issue.help()),
                code: "rackdraw::attribute",
            }),
            RackError::Inventory {
                message,
                src,
                span: Some(span),
            } => Some(Self {
                err,
                src: src.as_str(),
                span: span.clone(),
                label: message.clone(),
                help: None,
                code: "rackdraw::inventory",
            }),
            _ => None,
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("err", &self.err)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help.map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::new(self.span.start.into(), self.span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(self.label.clone()), span),
        )))
    }
}

/// Adapter for [`RackError`] variants without a source location.
pub struct ErrorAdapter<'a>(pub &'a RackError);

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
            RackError::Io(_) => "rackdraw::io",
            RackError::MalformedAttribute { .. } => "rackdraw::attribute",
            RackError::InvalidUnitCount { .. } => "rackdraw::rack",
            RackError::Inventory { .. } => "rackdraw::inventory",
            RackError::Config(_) => "rackdraw::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            RackError::InvalidUnitCount { .. } => {
                Some(Box::new("set `units` to 1 or more, or omit it for 42"))
            }
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An error with a labeled location in its source text.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`RackError`] into a list of reportable errors.
pub fn to_reportables(err: &RackError) -> Vec<Reportable<'_>> {
    match DiagnosticAdapter::new(err) {
        Some(diag) => vec![Reportable::Diagnostic(diag)],
        None => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
