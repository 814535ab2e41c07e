//! Diagnostic module - the error sink shared by all compiler phases.
//!
//! Diagnostics are collected, never thrown. Each phase reports
//! `(line, message)` pairs to a [`Handler`] and continues working; the
//! driver checks [`Handler::any_reported`] at pipeline boundaries to
//! decide whether the next phase runs.
//!
//! Message prefixes (`NameError:`, `TypeError:`, `Syntax error`,
//! `Illegal character`, `Unterminated ...`) are part of the contract:
//! tests match on them.

use std::cell::RefCell;
use std::fmt;

/// A single diagnostic: the 1-based source line it refers to and an
/// opaque message string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.message)
    }
}

/// Handler for collecting diagnostics.
///
/// The handler records diagnostics in report order. Each compiler
/// invocation constructs its own handler; two compilations never share
/// one.
///
/// # Examples
///
/// ```
/// use micac_util::Handler;
///
/// let handler = Handler::new();
/// handler.report(3, "TypeError: performing \"+\" on int and float");
/// assert!(handler.any_reported());
/// handler.clear();
/// assert!(!handler.any_reported());
/// ```
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new, empty handler.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Record a diagnostic at the given source line.
    pub fn report(&self, line: u32, message: impl Into<String>) {
        self.diagnostics.borrow_mut().push(Diagnostic {
            line,
            message: message.into(),
        });
    }

    /// Has anything been reported since the last [`clear`](Self::clear)?
    pub fn any_reported(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }

    /// Number of diagnostics recorded.
    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// All diagnostics, in report order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Forget every recorded diagnostic.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
