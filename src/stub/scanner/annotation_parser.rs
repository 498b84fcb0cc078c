use anyhow::{Result, Context, bail};
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::stub::types::IdentifierPattern;

static DEFAULT_PARSER: Lazy<AnnotationParser> = Lazy::new(|| {
    AnnotationParser::new("@class", IdentifierPattern::NonWhitespace)
        .expect("default annotation pattern is valid")
});

/// Line scanner that pulls documented identifiers out of source text
#[derive(Debug, Clone)]
pub struct AnnotationParser {
    /// Compiled `<marker>\s+<identifier>` expression
    pattern: Regex,

    /// Identifier must be a whole word run ending at whitespace or end of line
    word_only: bool,
}

impl Default for AnnotationParser {
    fn default() -> Self {
        DEFAULT_PARSER.clone()
    }
}

impl AnnotationParser {
    /// Build a parser for the given marker and identifier character class
    pub fn new(marker: &str, identifier: IdentifierPattern) -> Result<Self> {
        if marker.is_empty() {
            bail!("Annotation marker must not be empty");
        }

        let word_only = identifier == IdentifierPattern::Word;
        let identifier = if word_only { r"(\w+)" } else { r"(\S+)" };
        let source = format!(r"{}\s+{}", regex::escape(marker), identifier);
        let pattern = Regex::new(&source)
            .with_context(|| format!("Failed to compile annotation pattern {}", source))?;

        Ok(Self { pattern, word_only })
    }

    /// Identifier on a single line, if the line carries the marker.
    ///
    /// Only the first marker match on a line counts. In word mode that match is
    /// rejected (not truncated) when punctuation follows the word.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        let name = self.pattern.captures(line)?.get(1)?;
        if self.word_only {
            let ends_cleanly = line[name.end()..].chars().next().is_none_or(char::is_whitespace);
            if !ends_cleanly {
                return None;
            }
        }
        Some(name.as_str())
    }

    /// Every identifier in the content, in line order, duplicates kept
    pub fn extract_all(&self, content: &str) -> Vec<String> {
        content.lines()
            .filter_map(|line| self.match_line(line))
            .inspect(|name| trace!("Found identifier: {}", name))
            .map(str::to_string)
            .collect()
    }

    /// Scan line by line, replacing the current identifier on every match and
    /// handing it to `on_match` straight away. Returns the last identifier seen.
    pub fn scan_incremental<F>(&self, content: &str, mut on_match: F) -> Result<Option<String>>
    where
        F: FnMut(&str) -> Result<()>,
    {
        let mut current: Option<String> = None;

        for line in content.lines() {
            if let Some(name) = self.match_line(line) {
                trace!("Found identifier: {}", name);
                let name = current.insert(name.to_string());
                on_match(name)?;
            }
        }

        Ok(current)
    }
}
