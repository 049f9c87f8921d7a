use std::iter::Peekable;
use std::ops::Range;
use std::str::Chars;
use tracing::trace;

/// Finds where a brace-delimited block that starts at `start` ends.
///
/// Implementations return the byte range from `start` through the end of the
/// line on which the nesting depth first returns to zero after at least one
/// opening brace was seen. The trailing line terminator is not part of the
/// range. `None` means the depth never returned to zero before end of input.
pub trait SpanScanner: Send + Sync {
    fn find_balanced_span(&self, text: &str, start: usize) -> Option<Range<usize>>;
}

/// Counts every `{` and `}` on a line, including those inside string
/// literals, character literals and comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveBraceScanner;

impl SpanScanner for NaiveBraceScanner {
    fn find_balanced_span(&self, text: &str, start: usize) -> Option<Range<usize>> {
        walk_lines(text, start, |line| {
            (
                line.matches('{').count() as i64,
                line.matches('}').count() as i64,
            )
        })
    }
}

/// Ignores braces inside string literals, character literals, `//` comments
/// and `/* */` comments. Raw string literals are not recognised.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalBraceScanner;

impl SpanScanner for LexicalBraceScanner {
    fn find_balanced_span(&self, text: &str, start: usize) -> Option<Range<usize>> {
        let mut in_block_comment = false;
        walk_lines(text, start, |line| {
            count_code_markers(line, &mut in_block_comment)
        })
    }
}

fn walk_lines<F>(text: &str, start: usize, mut count: F) -> Option<Range<usize>>
where
    F: FnMut(&str) -> (i64, i64),
{
    let mut depth: i64 = 0;
    let mut inside = false;
    let mut offset = start;

    for line in text.get(start..)?.split_inclusive('\n') {
        let body = line.strip_suffix('\n').unwrap_or(line);
        let body = body.strip_suffix('\r').unwrap_or(body);

        let (opens, closes) = count(body);
        if opens > 0 {
            inside = true;
        }
        depth += opens - closes;
        trace!("Line at byte {}: +{} -{} depth {}", offset, opens, closes, depth);

        if inside && depth == 0 {
            return Some(start..offset + body.len());
        }
        offset += line.len();
    }
    None
}

fn count_code_markers(line: &str, in_block_comment: &mut bool) -> (i64, i64) {
    let mut opens = 0;
    let mut closes = 0;
    let mut chars = line.chars().peekable();
    // inside an identifier or number token, and whether that token is a number
    let mut in_word = false;
    let mut in_number = false;

    while let Some(c) = chars.next() {
        if *in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block_comment = false;
            }
            continue;
        }
        match c {
            c if c.is_ascii_alphanumeric() || c == '_' => {
                if !in_word {
                    in_number = c.is_ascii_digit();
                }
                in_word = true;
                continue;
            }
            // 1'000'000 and 0xFF'FF use ' as a digit separator, u8'{' does not
            '\'' if in_number => continue,
            '.' if in_number => continue,
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                *in_block_comment = true;
            }
            '"' => skip_literal(&mut chars, '"'),
            '\'' => skip_literal(&mut chars, '\''),
            '{' => opens += 1,
            '}' => closes += 1,
            _ => {}
        }
        in_word = false;
        in_number = false;
    }
    (opens, closes)
}

fn skip_literal(chars: &mut Peekable<Chars>, quote: char) {
    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return;
        }
    }
}
