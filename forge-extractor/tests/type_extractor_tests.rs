use forge_extractor::{
    extract_type, ExtractionError, LexicalBraceScanner, NaiveBraceScanner, SpanScanner,
    TypeExtractor,
};
use proptest::prelude::*;
use tracing::debug;

const TWO_CLASSES: &str = r#"
// ===== include/a.hpp =====
int helper() { return 1; }

class Foo {
public:
    int run(int x) {
        if (x > 0) { return x; }
        return 0;
    }
};

class Bar { int y; };

int main() {}"#;

#[test]
fn test_extracts_first_definition_exactly() {
    let extracted = extract_type(TWO_CLASSES, "Foo")
        .unwrap_or_else(|e| panic!("Failed to extract Foo: {:?}", e));

    let expected = r#"class Foo {
public:
    int run(int x) {
        if (x > 0) { return x; }
        return 0;
    }
};"#;
    assert_eq!(extracted, expected);
    debug!("Test passed for extracting the first definition.");
}

#[test]
fn test_single_line_definition() {
    let extracted = extract_type(TWO_CLASSES, "Bar").unwrap();
    assert_eq!(extracted, "class Bar { int y; };");
}

#[test]
fn test_empty_type_name_passes_text_through() {
    let extracted = extract_type(TWO_CLASSES, "").unwrap();
    assert_eq!(extracted, TWO_CLASSES);
}

#[test]
fn test_missing_type_is_not_found() {
    let result = extract_type(TWO_CLASSES, "Baz");
    assert_eq!(result, Err(ExtractionError::NotFound("Baz".to_string())));
}

#[test]
fn test_type_name_must_be_whole_token() {
    let text = "class FooBar {\n};\n";
    assert_eq!(
        extract_type(text, "Foo"),
        Err(ExtractionError::NotFound("Foo".to_string()))
    );
}

#[test]
fn test_keyword_must_be_whole_token() {
    let text = "subclass Foo {\n};\nclass Foo { int real; };\n";
    let extracted = extract_type(text, "Foo").unwrap();
    assert_eq!(extracted, "class Foo { int real; };");
}

#[test]
fn test_declaration_spanning_lines_keeps_header_line() {
    let text = "template <typename T>\nclass Foo : public Base<T>\n{\n    T value;\n};\nint after;\n";
    let extracted = extract_type(text, "Foo").unwrap();
    assert_eq!(extracted, "class Foo : public Base<T>\n{\n    T value;\n};");
}

#[test]
fn test_only_first_of_duplicate_names() {
    let text = "namespace a {\nclass Foo { int first; };\n}\nnamespace b {\nclass Foo { int second; };\n}\n";
    let extracted = extract_type(text, "Foo").unwrap();
    assert!(extracted.contains("first"));
    assert!(!extracted.contains("second"));
}

#[test]
fn test_unterminated_definition_is_reported() {
    let text = "class Foo {\n    int x;\n";
    assert_eq!(
        extract_type(text, "Foo"),
        Err(ExtractionError::Unterminated("Foo".to_string()))
    );
}

#[test]
fn test_custom_keyword() {
    let text = "class Point {};\nstruct Point { int x, y; };\n";
    let extractor = TypeExtractor::new().with_keyword("struct");
    assert_eq!(extractor.keyword(), "struct");
    assert_eq!(
        extractor.extract(text, "Point").unwrap(),
        "struct Point { int x, y; };"
    );
}

#[test]
fn test_type_name_with_regex_characters_is_literal() {
    let text = "class Foo { };\n";
    assert_eq!(
        extract_type(text, "F.o"),
        Err(ExtractionError::NotFound("F.o".to_string()))
    );
}

#[test]
fn test_crlf_line_endings_are_kept_inside_span() {
    let text = "class Foo {\r\n    int x;\r\n};\r\nint y;\r\n";
    let extracted = extract_type(text, "Foo").unwrap();
    assert_eq!(extracted, "class Foo {\r\n    int x;\r\n};");
}

const BRACE_IN_STRING: &str = r#"class Foo {
    const char* open = "}";
    int x;
};
int tail;"#;

#[test]
fn test_naive_scanner_is_fooled_by_brace_in_string() {
    let extractor = TypeExtractor::new().with_scanner(Box::new(NaiveBraceScanner));
    let extracted = extractor.extract(BRACE_IN_STRING, "Foo").unwrap();
    assert_eq!(extracted, "class Foo {\n    const char* open = \"}\";");
}

#[test]
fn test_lexical_scanner_ignores_brace_in_string() {
    let extractor = TypeExtractor::new().with_scanner(Box::new(LexicalBraceScanner));
    let extracted = extractor.extract(BRACE_IN_STRING, "Foo").unwrap();
    assert_eq!(
        extracted,
        "class Foo {\n    const char* open = \"}\";\n    int x;\n};"
    );
}

#[test]
fn test_lexical_scanner_ignores_comment_braces() {
    let text = "class Foo {\n    // closes early }\n    /* { */\n    int x;\n};\n";
    let span = LexicalBraceScanner
        .find_balanced_span(text, 0)
        .expect("span should close");
    assert_eq!(&text[span], "class Foo {\n    // closes early }\n    /* { */\n    int x;\n};");
}

#[test]
fn test_scanner_start_past_end_returns_none() {
    assert_eq!(NaiveBraceScanner.find_balanced_span("{}", 10), None);
}

fn member_lines() -> impl Strategy<Value = Vec<(usize, String)>> {
    prop::collection::vec((0usize..4, "[a-z ;=0-9]{0,16}"), 0..8)
}

proptest! {
    #[test]
    fn prop_balanced_definition_round_trips(
        prefix in "[a-z ;=0-9\n]{0,40}",
        suffix in "[a-z ;=0-9\n]{0,40}",
        members in member_lines(),
    ) {
        let mut lines = vec!["class Foo {".to_string()];
        for (depth, text) in &members {
            for level in 0..*depth {
                lines.push(format!("{}if (x) {{", "    ".repeat(level + 1)));
            }
            lines.push(format!("    {}", text));
            for level in (0..*depth).rev() {
                lines.push(format!("{}}}", "    ".repeat(level + 1)));
            }
        }
        lines.push("};".to_string());
        let definition = lines.join("\n");
        let text = format!("{}\n{}\n{}", prefix, definition, suffix);

        let extracted = extract_type(&text, "Foo").unwrap();
        let opens = extracted.matches('{').count();
        let closes = extracted.matches('}').count();
        prop_assert_eq!(opens, closes);
        prop_assert!(opens > 0);
        prop_assert_eq!(extracted, definition.as_str());
    }

    #[test]
    fn prop_absent_name_is_not_found(text in "[a-z{}; \n]{0,80}") {
        prop_assert_eq!(
            extract_type(&text, "Foo"),
            Err(ExtractionError::NotFound("Foo".to_string()))
        );
    }
}
