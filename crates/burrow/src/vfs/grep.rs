//! Line-oriented regex search with context windows.

use regex::{Regex, RegexBuilder};

use super::error::FsResult;
use super::info::GrepMatch;

/// Options for a grep call, mirroring the tool parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrepOptions {
    /// Glob(s) restricting which files are searched when grepping a directory
    pub file_name_pattern: Option<Vec<String>>,
    /// Characters of context around each match
    pub character_window: Option<usize>,
    /// Lines of context around each match; wins over `character_window`
    pub line_window: Option<usize>,
    /// Compile the pattern case-insensitively
    pub ignore_case: bool,
}

impl GrepOptions {
    /// Restrict a directory search to files matching `pattern`.
    pub fn file_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_name_pattern
            .get_or_insert_with(Vec::new)
            .push(pattern.into());
        self
    }

    /// Include `window` characters either side of each match.
    pub fn character_window(mut self, window: usize) -> Self {
        self.character_window = Some(window);
        self
    }

    /// Include `window` lines either side of each match.
    pub fn line_window(mut self, window: usize) -> Self {
        self.line_window = Some(window);
        self
    }

    /// Match case-insensitively.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

pub(crate) fn compile(pattern: &str, ignore_case: bool) -> FsResult<Regex> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()?)
}

/// Search one file's content, appending a record per match.
pub(crate) fn search_content(
    path: &str,
    content: &str,
    regex: &Regex,
    options: &GrepOptions,
    out: &mut Vec<GrepMatch>,
) {
    let lines: Vec<&str> = content.split('\n').collect();
    for (row, line) in lines.iter().enumerate() {
        for found in regex.find_iter(line) {
            let start = char_offset(line, found.start());
            let end = char_offset(line, found.end());
            let snippet = if let Some(window) = options.line_window {
                let first = row.saturating_sub(window);
                let last = row.saturating_add(window).saturating_add(1).min(lines.len());
                lines[first..last].join("\n")
            } else if let Some(window) = options.character_window {
                let first = start.saturating_sub(window);
                let last = end.saturating_add(window).min(line.chars().count());
                line.chars().skip(first).take(last - first).collect()
            } else {
                (*line).to_string()
            };
            out.push(GrepMatch {
                path: path.to_string(),
                snippet,
                line_number: row,
                match_range: [start, end],
                match_text: found.as_str().to_string(),
            });
        }
    }
}

/// Convert a byte offset on a char boundary into a char offset.
fn char_offset(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}
