use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub static DEFAULT_CLEANING_RULES: Lazy<CleaningRules> = Lazy::new(CleaningRules::default);

/// Line prefixes that get a line dropped from a source file.
///
/// Lines are matched on their trimmed form but always emitted untouched, so
/// cleaned text is a subset of the original lines in their original order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningRules {
    pub guard_directive: String,
    pub include_directive: String,
    /// An include line containing this marker survives cleaning.
    pub universal_include: String,
    /// Only applied when debug-line removal is requested.
    pub debug_prefixes: Vec<String>,
}

impl Default for CleaningRules {
    fn default() -> Self {
        CleaningRules {
            guard_directive: "#pragma once".to_string(),
            include_directive: "#include".to_string(),
            universal_include: "<bits/stdc++.h>".to_string(),
            debug_prefixes: vec!["print".to_string(), "pprint".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    GuardDirective,
    Include,
    DebugPrint,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub kept: usize,
    pub guard_directives: usize,
    pub includes: usize,
    pub debug_prints: usize,
}

impl CleanReport {
    pub fn dropped(&self) -> usize {
        self.guard_directives + self.includes + self.debug_prints
    }

    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::GuardDirective => self.guard_directives += 1,
            DropReason::Include => self.includes += 1,
            DropReason::DebugPrint => self.debug_prints += 1,
        }
    }
}

impl CleaningRules {
    pub fn drop_reason(&self, line: &str, remove_debug_lines: bool) -> Option<DropReason> {
        let stripped = line.trim();

        if stripped.starts_with(&self.guard_directive) {
            return Some(DropReason::GuardDirective);
        }

        if stripped.starts_with(&self.include_directive)
            && !stripped.contains(&self.universal_include)
        {
            return Some(DropReason::Include);
        }

        if remove_debug_lines
            && self
                .debug_prefixes
                .iter()
                .any(|prefix| stripped.starts_with(prefix.as_str()))
        {
            return Some(DropReason::DebugPrint);
        }

        None
    }

    pub fn clean(&self, code: &str, remove_debug_lines: bool) -> String {
        self.clean_with_report(code, remove_debug_lines).0
    }

    pub fn clean_with_report(&self, code: &str, remove_debug_lines: bool) -> (String, CleanReport) {
        let mut report = CleanReport::default();
        let mut cleaned_lines = Vec::new();

        // `split` keeps the empty tail after a final newline, `lines()` drops it.
        let segments: Vec<&str> = code.split('\n').collect();
        let last = segments.len() - 1;
        for (index, line) in segments.into_iter().enumerate() {
            match self.drop_reason(line, remove_debug_lines) {
                Some(reason) => {
                    trace!("Dropping line ({:?}): {}", reason, line);
                    report.record(reason);
                }
                None => {
                    // the empty tail after a final newline is not a line
                    if !(index == last && line.is_empty()) {
                        report.kept += 1;
                    }
                    cleaned_lines.push(line);
                }
            }
        }

        (cleaned_lines.join("\n"), report)
    }
}

/// Cleans `code` with the default rules.
pub fn clean(code: &str, remove_debug_lines: bool) -> String {
    DEFAULT_CLEANING_RULES.clean(code, remove_debug_lines)
}
