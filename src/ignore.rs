use glob::Pattern;
use std::path::Path;
use tracing::{debug, warn};

/// Glob patterns for header paths the collector skips.
pub struct ExcludePatterns {
    patterns: Vec<Pattern>,
}

impl ExcludePatterns {
    pub fn new(patterns: &[String]) -> Self {
        let compiled_patterns = patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Invalid exclude pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();

        debug!("Using exclude patterns: {:?}", patterns);

        ExcludePatterns {
            patterns: compiled_patterns,
        }
    }

    pub fn should_exclude<P: AsRef<Path>>(&self, path: P) -> bool {
        let path_str = path.as_ref().to_string_lossy().replace('\\', "/");
        self.patterns.iter().any(|pattern| pattern.matches(&path_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_patterns_are_skipped() {
        let excludes = ExcludePatterns::new(&["[".to_string(), "legacy/**".to_string()]);
        assert!(excludes.should_exclude("legacy/old.hpp"));
        assert!(!excludes.should_exclude("include/a.hpp"));
    }
}
