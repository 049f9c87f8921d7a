use crate::errors::ExtractionError;
use crate::scanner::{NaiveBraceScanner, SpanScanner};
use regex::Regex;
use tracing::{debug, trace};

pub const DEFAULT_TYPE_KEYWORD: &str = "class";

/// Pulls a single type definition out of a block of source text.
pub struct TypeExtractor {
    keyword: String,
    scanner: Box<dyn SpanScanner>,
}

impl TypeExtractor {
    pub fn new() -> Self {
        debug!("Creating TypeExtractor with keyword '{}'", DEFAULT_TYPE_KEYWORD);
        TypeExtractor {
            keyword: DEFAULT_TYPE_KEYWORD.to_string(),
            scanner: Box::new(NaiveBraceScanner),
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_scanner(mut self, scanner: Box<dyn SpanScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Returns the first definition of `type_name` in `text`, from its
    /// declaration keyword through the line that closes its outermost block.
    ///
    /// An empty `type_name` returns `text` untouched. Later definitions with
    /// the same name are never looked at.
    pub fn extract<'a>(&self, text: &'a str, type_name: &str) -> Result<&'a str, ExtractionError> {
        if type_name.is_empty() {
            trace!("No type name given, passing text through");
            return Ok(text);
        }

        let declaration = self.declaration_pattern(type_name)?;
        let found = declaration
            .find(text)
            .ok_or_else(|| ExtractionError::NotFound(type_name.to_string()))?;
        debug!(
            "Found declaration of '{}' at byte {}",
            type_name,
            found.start()
        );

        let span = self
            .scanner
            .find_balanced_span(text, found.start())
            .ok_or_else(|| ExtractionError::Unterminated(type_name.to_string()))?;
        debug!(
            "Extracted '{}' spanning bytes {}..{}",
            type_name, span.start, span.end
        );
        Ok(&text[span])
    }

    fn declaration_pattern(&self, type_name: &str) -> Result<Regex, ExtractionError> {
        let pattern = format!(
            r"(?s)\b{}\s+{}\b.*?\{{",
            regex::escape(&self.keyword),
            regex::escape(type_name)
        );
        trace!("Declaration pattern: {}", pattern);
        Ok(Regex::new(&pattern)?)
    }
}

impl Default for TypeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts `type_name` with the default keyword and the naive scanner.
pub fn extract_type<'a>(text: &'a str, type_name: &str) -> Result<&'a str, ExtractionError> {
    TypeExtractor::new().extract(text, type_name)
}
