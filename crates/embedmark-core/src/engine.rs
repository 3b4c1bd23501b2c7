use crate::config::Options;
use crate::emit::{self, Emitter};
use crate::error::MarkdownError;
use crate::parser::Parser;

/// Extended-Markdown to HTML engine.
///
/// One instance processes one document per call. All scan state (the
/// reference table, the table-cell cursor, the mention list) is created
/// fresh for every call, so a `Markdown` value can be reused freely — but
/// it is not meant to be shared across threads mid-parse: give each thread
/// its own instance.
///
/// ```
/// use embedmark_core::Markdown;
///
/// let mut markdown = Markdown::new();
/// let html = markdown.parse("# Hello").unwrap();
/// assert_eq!(html, "<h1>Hello</h1>");
/// ```
pub struct Markdown {
    options: Options,
    mentioned: Vec<String>,
}

impl Markdown {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            mentioned: Vec::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parses a full document and returns the rendered HTML, trimmed.
    ///
    /// The only errors are configuration errors (`:thumb` without an image
    /// resolver in strict mode, an unknown video hosting); on error no
    /// partial output is returned.
    pub fn parse(&mut self, text: &str) -> Result<String, MarkdownError> {
        self.mentioned.clear();
        let (document, references) = Parser::new(&self.options).parse_document(text);
        let mut emitter = Emitter::new(&self.options, &references);
        let html = emitter.emit_document(&document)?;
        self.mentioned = emitter.into_mentions();
        Ok(html)
    }

    /// Parses a single inline span without block-level wrapping, for
    /// isolated fragments such as titles or comment previews.
    pub fn parse_inline_span(&mut self, text: &str) -> Result<String, MarkdownError> {
        self.mentioned.clear();
        let (inlines, references) = Parser::new(&self.options).parse_span(text);
        let mut emitter = Emitter::new(&self.options, &references);
        let html = emitter.emit_inlines(&inlines)?;
        self.mentioned = emitter.into_mentions();
        Ok(html)
    }

    /// Like [`parse`](Self::parse), then cleans the output down to the
    /// tags and attributes this dialect can produce.
    pub fn parse_sanitized(&mut self, text: &str) -> Result<String, MarkdownError> {
        let html = self.parse(text)?;
        Ok(emit::sanitize(&html))
    }

    /// Usernames whose mentions resolved during the last parse call, in
    /// document order.
    pub fn mentioned_usernames(&self) -> &[String] {
        &self.mentioned
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}
