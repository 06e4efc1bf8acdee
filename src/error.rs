use ariadne::{Color, Label, Report, ReportKind, Source};
use std::fmt;
use std::ops::Range;

/// Byte range into the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorKind {
    ParseError,
    RuntimeError,
    IoError,
}

impl ErrorKind {
    fn heading(self) -> &'static str {
        match self {
            ErrorKind::ParseError => "Parse Error",
            ErrorKind::RuntimeError => "Runtime Error",
            ErrorKind::IoError => "IO Error",
        }
    }

    fn color(self) -> Color {
        match self {
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::RuntimeError => Color::Magenta,
            ErrorKind::IoError => Color::Red,
        }
    }
}

/// A diagnostic produced by the parser, the evaluator, or the host.
///
/// `message` is the stable single-line error text; `span` and `help` only
/// feed the rendered report.
#[derive(Debug, Clone)]
pub struct MonkeyError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl MonkeyError {
    pub fn parse_error(span: Span, message: String) -> Self {
        Self {
            kind: ErrorKind::ParseError,
            span,
            message,
            help: None,
        }
    }

    pub fn runtime_error(span: Span, message: String) -> Self {
        Self {
            kind: ErrorKind::RuntimeError,
            span,
            message,
            help: None,
        }
    }

    /// A failure outside any source text, e.g. an unreadable script file.
    pub fn io_error(message: String) -> Self {
        Self {
            kind: ErrorKind::IoError,
            span: Span::new(0, 0),
            message,
            help: None,
        }
    }

    /// Attach a hint to show under the rendered report.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the diagnostic against `source` on stderr. The report is
    /// headed by the error kind and labels the offending span; IO errors
    /// have no source to point into and render as a bare message.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let id = filename.unwrap_or("<repl>");
        let color = self.kind.color();

        let mut report = Report::build(
            ReportKind::Custom(self.kind.heading(), color),
            id,
            self.span.start,
        )
        .with_message(&self.message);

        if !source.is_empty() {
            report = report.with_label(
                Label::new((id, self.span.range()))
                    .with_message(&self.message)
                    .with_color(color),
            );
        }
        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        report.finish().eprint((id, Source::from(source))).ok();
    }
}

impl fmt::Display for MonkeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for MonkeyError {}
