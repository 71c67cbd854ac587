mod display;
mod emitter;

pub use emitter::ErrorEmitter;

use colored::Colorize;
use crest_source::Source;
use crest_span::Span;
use display::line_format::LineFormat;

/// Assembles one rendered message: a colored severity tag, the
/// message itself, a file:line:column location and the offending
/// source line with a caret run underneath.
#[derive(Default, Clone)]
pub struct ErrorBuilder {
    filename: Option<String>,
    tag: Option<&'static str>,
    info: Option<String>,
    location: Option<(usize, usize)>,
    snippet: Option<String>,
}

impl ErrorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(mut self, filename: String) -> Self {
        self.filename = Some(filename);
        self
    }

    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn info(mut self, info: String) -> Self {
        self.info = Some(info);
        self
    }

    pub fn context(mut self, src: &Source, span: Span) -> Self {
        let Some((line, col)) = src.get_line_col(span.0) else {
            return self;
        };

        self.location = Some((line, col));

        if let Some(text) = src
            .get_line_containing_offset(span.0)
            .and_then(|index| src.get_line_contents(index))
        {
            let max = (text.len() + 1).saturating_sub(col).max(1);
            let width = span.len().clamp(1, max);
            let carets =
                format!("{}{}", " ".repeat(col - 1), "^".repeat(width));

            self.snippet = Some(
                LineFormat::new(line, text, Some(carets)).to_string(),
            );
        }

        self
    }

    pub fn build(self) -> String {
        let tag = self.tag.unwrap_or("error");
        let location = self
            .location
            .map(|(line, col)| {
                format!(
                    "{} {}:{line}:{col}",
                    "-->".dimmed(),
                    self.filename.as_deref().unwrap_or("<input>"),
                )
            })
            .unwrap_or_default();

        format!(
            "{}{} {}\n{location}\n{}",
            if tag == "warning" {
                tag.yellow().bold()
            } else {
                tag.red().bold()
            },
            ":".bold(),
            self.info.unwrap_or_default(),
            self.snippet.unwrap_or_default()
        )
    }
}
