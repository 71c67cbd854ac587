use std::fmt::Display;

use crest_source::Source;
use crest_span::Spannable;

use crate::ErrorBuilder;

/// Renders anything that is `Display + Spannable` against the source
/// text it was produced from and writes it to stderr.
pub struct ErrorEmitter<'a> {
    src: Source<'a>,
    builder: ErrorBuilder,
}

impl<'a> ErrorEmitter<'a> {
    pub fn new(src: &'a str, builder: ErrorBuilder) -> Self {
        Self {
            src: Source::from(src),
            builder,
        }
    }

    pub fn emit<T: Display + Spannable>(&self, error: &T) {
        eprintln!("{}", self.render("error", error));
    }

    pub fn warn<T: Display + Spannable>(&self, warning: &T) {
        eprintln!("{}", self.render("warning", warning));
    }

    pub fn render<T: Display + Spannable>(
        &self,
        tag: &'static str,
        item: &T,
    ) -> String {
        self.builder
            .clone()
            .tag(tag)
            .info(item.to_string())
            .context(&self.src, item.span())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorEmitter;
    use crate::ErrorBuilder;
    use crest_span::{Span, Spannable};

    struct Oops;

    impl std::fmt::Display for Oops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "something went wrong")
        }
    }

    impl Spannable for Oops {
        fn span(&self) -> Span {
            Span(4, 5)
        }
    }

    #[test]
    fn renders_with_severity_tag() {
        colored::control::set_override(false);

        let emitter =
            ErrorEmitter::new("int ? x;", ErrorBuilder::new());

        let rendered = emitter.render("warning", &Oops);
        assert!(rendered.starts_with("warning: something went wrong"));
        assert!(rendered.contains("int ? x;"));
    }
}
