pub mod errors;
pub mod extractor;
pub mod scanner;

pub use errors::ExtractionError;
pub use extractor::{extract_type, TypeExtractor, DEFAULT_TYPE_KEYWORD};
pub use scanner::{LexicalBraceScanner, NaiveBraceScanner, SpanScanner};
