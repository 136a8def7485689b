//! Diagnostic module - Error and warning reporting infrastructure.
//!
//! Every compiler phase reports problems through a shared [`Handler`].
//! Each diagnostic carries a severity [`Level`], a message, and a [`Span`];
//! the handler renders it to stderr as it is emitted and keeps a record so
//! callers can query for errors afterwards.
//!
//! Rendering follows the `LEVEL: message at line L, column C` shape, with
//! the offending source line and a caret underneath when the handler has a
//! source buffer attached:
//!
//! ```text
//! error: unterminated string literal at line 3, column 12
//!     return "oops;
//!            ^
//! ```

use crate::span::Span;
use std::cell::RefCell;
use std::fmt;
use std::io::IsTerminal;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// A fatal problem; the current phase cannot produce a usable result.
    Fatal,
    /// Suspicious but recoverable; compilation proceeds.
    Warning,
    /// Informational only.
    Info,
}

impl Level {
    /// Returns the canonical name for this level.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Level::Fatal => "error",
            Level::Warning => "warning",
            Level::Info => "info",
        }
    }

    /// Returns the ANSI color code for this level.
    #[inline]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Level::Fatal => "31",   // red
            Level::Warning => "33", // yellow
            Level::Info => "34",    // blue
        }
    }

    /// Returns true if this level represents a fatal error.
    #[inline]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Level::Fatal)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A diagnostic message with severity and location.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// Main diagnostic message.
    pub message: String,
    /// Source location; [`Span::DUMMY`] when unknown.
    pub span: Span,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
        }
    }

    /// Creates a fatal diagnostic.
    pub fn fatal(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Fatal, message, span)
    }

    /// Creates a warning diagnostic.
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Creates an info diagnostic.
    pub fn info(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Info, message, span)
    }
}

/// Handler for collecting and rendering diagnostics.
///
/// The handler is shared by reference between the lexer, parser, and
/// emitter; interior mutability keeps the borrow story simple. Attaching
/// the source buffer enables the source-line-and-caret rendering; without
/// one (emitter-stage errors) only the message line is printed.
///
/// # Examples
///
/// ```
/// use microc_util::{Diagnostic, Handler, Span};
///
/// let handler = Handler::silent();
/// handler.emit(Diagnostic::fatal("unexpected token", Span::DUMMY));
/// assert!(handler.has_errors());
/// ```
pub struct Handler {
    /// Collected diagnostics, in emission order.
    diagnostics: RefCell<Vec<Diagnostic>>,
    /// Source buffer for source-line extraction, if attached.
    source: Option<Vec<u8>>,
    /// Suppress stderr rendering (for tests).
    silent: bool,
}

impl Handler {
    /// Creates a handler with no source buffer attached.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            source: None,
            silent: false,
        }
    }

    /// Creates a handler that renders source lines from `source`.
    pub fn with_source(source: Vec<u8>) -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            source: Some(source),
            silent: false,
        }
    }

    /// Creates a handler that records diagnostics without printing them.
    pub fn silent() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            source: None,
            silent: true,
        }
    }

    /// Emits a diagnostic: renders it to stderr and records it.
    pub fn emit(&self, diagnostic: Diagnostic) {
        if !self.silent {
            self.render(&diagnostic);
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Emits a fatal diagnostic.
    pub fn fatal(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::fatal(message, span));
    }

    /// Emits a warning.
    pub fn warning(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::warning(message, span));
    }

    /// Emits an info diagnostic.
    pub fn info(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::info(message, span));
    }

    /// Returns true if any fatal diagnostic has been emitted.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level.is_fatal())
    }

    /// Number of fatal diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level.is_fatal())
            .count()
    }

    /// Number of warnings emitted so far.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// Returns a snapshot of all diagnostics emitted so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Discards all recorded diagnostics.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }

    /// Renders one diagnostic to stderr.
    fn render(&self, diagnostic: &Diagnostic) {
        let color = std::io::stderr().is_terminal();
        let label = if color {
            format!(
                "\x1b[1;{}m{}\x1b[0m",
                diagnostic.level.color_code(),
                diagnostic.level.name()
            )
        } else {
            diagnostic.level.name().to_string()
        };

        let line = diagnostic.span.line;
        let column = diagnostic.span.column;
        let source_line = self.source_line(line);

        match source_line {
            Some(text) if line > 0 => {
                eprintln!(
                    "{}: {} at line {}, column {}",
                    label, diagnostic.message, line, column
                );
                eprintln!("{}", text);
                let pad = column.saturating_sub(1) as usize;
                eprintln!("{}^", " ".repeat(pad));
            }
            _ => {
                eprintln!("{}: {}", label, diagnostic.message);
            }
        }
    }

    /// Extracts line `line` (1-based) from the attached source buffer by
    /// counting newlines.
    fn source_line(&self, line: u32) -> Option<String> {
        if line == 0 {
            return None;
        }
        let source = self.source.as_deref()?;
        let mut current = 1u32;
        let mut start = 0usize;
        let mut i = 0usize;
        while i < source.len() && current < line {
            if source[i] == b'\n' {
                current += 1;
                start = i + 1;
            }
            i += 1;
        }
        if current < line {
            return None;
        }
        let mut end = start;
        while end < source.len() && source[end] != b'\n' {
            end += 1;
        }
        Some(String::from_utf8_lossy(&source[start..end]).into_owned())
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
