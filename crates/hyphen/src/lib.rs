//! A TeX-style hyphenation dictionary.
//!
//! Loads a Liang pattern file (`.dic`) and computes the legal hyphenation
//! points of a word. A dictionary is immutable once loaded and can be shared
//! freely between typesetting jobs and threads.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("no hyphenation dictionary for language {0:?}")]
    NoSuchLanguage(String),
    #[error("invalid hyphen dictionary header: {0}")]
    InvalidHeader(String),
    #[error("invalid value for header {key}: {value:?}")]
    InvalidHeaderValue { key: String, value: String },
    #[error("cannot read hyphenation dictionary")]
    Io(#[from] io::Error),
}

/// A loaded set of Liang hyphenation patterns.
#[derive(Debug, Clone)]
pub struct HyphenDictionary {
    left_hyphen_min: usize,
    right_hyphen_min: usize,
    // Parsed from the header but not consulted; compound-word minima apply to
    // a pattern level this engine does not implement.
    #[allow(dead_code)]
    compound_left_hyphen_min: usize,
    #[allow(dead_code)]
    compound_right_hyphen_min: usize,
    /// Pattern key (digits removed) to the per-position digit string.
    fragments: HashMap<String, String>,
}

impl HyphenDictionary {
    /// Load the dictionary for a language from a directory containing files
    /// named by the `hyph_<language>.dic` convention.
    pub fn for_language<P: AsRef<Path>>(
        directory: P,
        language: &str,
    ) -> Result<HyphenDictionary, DictionaryError> {
        let path = directory.as_ref().join(format!("hyph_{language}.dic"));
        let file = File::open(&path)
            .map_err(|_| DictionaryError::NoSuchLanguage(language.to_string()))?;
        Self::from_reader(file)
    }

    /// Read a `.dic` file from a UTF-8 stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<HyphenDictionary, DictionaryError> {
        let mut dictionary = HyphenDictionary {
            left_hyphen_min: 2,
            right_hyphen_min: 3,
            compound_left_hyphen_min: 2,
            compound_right_hyphen_min: 3,
            fragments: HashMap::new(),
        };

        let mut started = false;
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let line = line.trim();

            if line.starts_with('%') || line.is_empty() {
                // Comment.
                continue;
            }

            if started {
                dictionary.add_pattern(line);
            } else {
                let mut fields = line.split_whitespace();
                let Some(key) = fields.next() else { continue };
                match key {
                    "LEFTHYPHENMIN" => {
                        dictionary.left_hyphen_min = parse_header_value(key, fields.next())?
                    }
                    "RIGHTHYPHENMIN" => {
                        dictionary.right_hyphen_min = parse_header_value(key, fields.next())?
                    }
                    "COMPOUNDLEFTHYPHENMIN" => {
                        dictionary.compound_left_hyphen_min =
                            parse_header_value(key, fields.next())?
                    }
                    "COMPOUNDRIGHTHYPHENMIN" => {
                        dictionary.compound_right_hyphen_min =
                            parse_header_value(key, fields.next())?
                    }
                    "UTF-8" => {
                        // The only encoding we read anyway.
                    }
                    "NEXTLEVEL" => started = true,
                    _ => return Err(DictionaryError::InvalidHeader(key.to_string())),
                }
            }
        }

        log::debug!(
            "loaded hyphenation dictionary: {} patterns, left min {}, right min {}",
            dictionary.fragments.len(),
            dictionary.left_hyphen_min,
            dictionary.right_hyphen_min
        );

        Ok(dictionary)
    }

    /// Minimum number of letters in the first fragment.
    pub fn left_hyphen_min(&self) -> usize {
        self.left_hyphen_min
    }

    /// Minimum number of letters in the last fragment.
    pub fn right_hyphen_min(&self) -> usize {
        self.right_hyphen_min
    }

    /// Add a TeX pattern to the map.
    fn add_pattern(&mut self, pattern: &str) {
        self.fragments
            .insert(remove_digits(pattern), remove_non_digits(pattern));
    }

    /// Hyphenate the word, returning the fragments between which hyphenation
    /// may happen. If the word already contains a hyphen, the hyphen ends up
    /// at the end of one of the fragments; don't add another after it.
    pub fn hyphenate(&self, word: &str) -> Vec<String> {
        let word_chars: Vec<char> = word.chars().collect();

        // One possible cut point before each character, plus one at the end.
        let mut cut_points = vec![b'0'; word_chars.len() + 1];

        // Wrap with periods to represent begin and end of word.
        let mut wrapped: Vec<char> = Vec::with_capacity(word_chars.len() + 2);
        wrapped.push('.');
        wrapped.extend(word_chars.iter().flat_map(|ch| ch.to_lowercase()));
        wrapped.push('.');

        // Look up every substring of the wrapped word.
        for seq_length in 1..=wrapped.len() {
            for start in 0..=wrapped.len() - seq_length {
                let seq: String = wrapped[start..start + seq_length].iter().collect();
                let Some(value) = self.fragments.get(&seq) else {
                    continue;
                };

                // At the beginning of the word the period isn't counted.
                let offset: isize = if seq.starts_with('.') { 0 } else { -1 };

                // Take the max of the new hints and the existing ones.
                for (i, digit) in value.bytes().enumerate() {
                    let index = start as isize + i as isize + offset;
                    if let Some(slot) = usize::try_from(index)
                        .ok()
                        .and_then(|index| cut_points.get_mut(index))
                    {
                        if digit > *slot {
                            *slot = digit;
                        }
                    }
                }
            }
        }

        // Prevent hyphenation too close to the start and end of the word.
        for slot in cut_points.iter_mut().take(self.left_hyphen_min) {
            *slot = 0;
        }
        for slot in cut_points.iter_mut().rev().take(self.right_hyphen_min) {
            *slot = 0;
        }

        // Split the word where the hints are odd.
        let mut segments = Vec::new();
        let mut last_start = 0;
        for (i, &hint) in cut_points.iter().enumerate() {
            if hint % 2 != 0 {
                segments.push(word_chars[last_start..i].iter().collect());
                last_start = i;
            }
        }
        if last_start < word_chars.len() {
            segments.push(word_chars[last_start..].iter().collect());
        }

        let segments = merge_single_hyphens(segments);
        move_hyphen_prefixes(segments)
    }
}

fn parse_header_value(key: &str, value: Option<&str>) -> Result<usize, DictionaryError> {
    let value = value.unwrap_or("");
    value
        .parse()
        .map_err(|_| DictionaryError::InvalidHeaderValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// The pattern with its interleaved digits removed; this is the lookup key.
fn remove_digits(pattern: &str) -> String {
    pattern.chars().filter(|ch| !ch.is_ascii_digit()).collect()
}

/// The pattern's digits, one per cut point, with implicit zeros filled in.
/// Anchor periods are stripped first; they don't carry cut points.
fn remove_non_digits(pattern: &str) -> String {
    let trimmed = pattern.strip_prefix('.').unwrap_or(pattern);
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);

    let mut digits = String::new();
    let mut pending = b'0';
    for ch in trimmed.chars() {
        if let Some(digit) = ch.to_digit(10) {
            pending = b'0' + digit as u8;
        } else {
            digits.push(pending as char);
            pending = b'0';
        }
    }
    digits.push(pending as char);
    digits
}

/// We once saw the word "super-confort" hyphenate with the hyphen as its own
/// segment. Merge it with the previous segment.
fn merge_single_hyphens(segments: Vec<String>) -> Vec<String> {
    if !segments.iter().any(|segment| segment == "-") {
        return segments;
    }

    let mut merged: Vec<String> = Vec::with_capacity(segments.len());
    let mut iter = segments.into_iter().peekable();
    while let Some(segment) = iter.next() {
        if iter.peek().map(String::as_str) == Some("-") {
            merged.push(segment + "-");
            iter.next();
        } else {
            merged.push(segment);
        }
    }
    merged
}

/// We once saw "back-end" hyphenate as "back" and "-end". Move the hyphen to
/// the end of the previous segment.
fn move_hyphen_prefixes(segments: Vec<String>) -> Vec<String> {
    let mut moved: Vec<String> = Vec::with_capacity(segments.len());
    let mut iter = segments.into_iter().peekable();
    while let Some(segment) = iter.next() {
        if matches!(iter.peek(), Some(next) if next.starts_with('-')) {
            moved.push(segment + "-");
            let next = iter.next().unwrap();
            moved.push(next[1..].to_string());
        } else {
            moved.push(segment);
        }
    }
    moved
}

/// Join fragments with hyphens, for diagnostics.
pub fn segments_to_string(segments: &[String]) -> String {
    segments.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(body: &str) -> HyphenDictionary {
        let text = format!(
            "UTF-8\nLEFTHYPHENMIN 2\nRIGHTHYPHENMIN 3\n% a comment\n\nNEXTLEVEL\n{body}"
        );
        HyphenDictionary::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn pattern_normalization() {
        assert_eq!(remove_digits("a1bc3d4"), "abcd");
        assert_eq!(remove_digits(".ab1c"), ".abc");
        assert_eq!(remove_non_digits("a1bc3d4"), "01034");
        assert_eq!(remove_non_digits("abc"), "0000");
        assert_eq!(remove_non_digits(".ab1c"), "0010");
        assert_eq!(remove_non_digits("1fi"), "100");
    }

    #[test]
    fn hyphenates_difficult() {
        let dictionary = dictionary("1fi\n1c\n");
        assert_eq!(dictionary.hyphenate("difficult"), ["dif", "fi", "cult"]);
    }

    #[test]
    fn respects_left_and_right_minima() {
        // The pattern wants a break after every letter; the minima restrict
        // it to the middle of the word.
        let dictionary = dictionary("a1\nb1\nc1\nd1\ne1\nf1\n");
        assert_eq!(dictionary.hyphenate("abcdef"), ["ab", "c", "def"]);
    }

    #[test]
    fn anchored_patterns_only_match_word_edges() {
        let dictionary = dictionary(".abc1\n");
        assert_eq!(dictionary.hyphenate("abcabc"), ["abc", "abc"]);
    }

    #[test]
    fn fragments_concatenate_to_the_word() {
        let dictionary = dictionary("1fi\n1c\n");
        for word in ["difficult", "magnificent", "offices"] {
            let segments = dictionary.hyphenate(word);
            assert_eq!(segments.concat(), word);
        }
    }

    #[test]
    fn lone_hyphen_merges_with_previous_segment() {
        // Force a cut on both sides of the hyphen so it would become its own
        // segment without the fix-up pass.
        let dictionary = dictionary("r1-\n-1c\n");
        let segments = dictionary.hyphenate("super-confort");
        assert!(!segments.iter().any(|segment| segment == "-"), "{segments:?}");
        assert_eq!(segments_to_string(&segments), "super--confort");
    }

    #[test]
    fn hyphen_prefix_moves_to_previous_segment() {
        let dictionary = dictionary("k1-e\n");
        assert_eq!(dictionary.hyphenate("back-end"), ["back-", "end"]);
    }

    #[test]
    fn unknown_header_is_an_error() {
        let text = "UTF-8\nWHATISTHIS 2\nNEXTLEVEL\n";
        match HyphenDictionary::from_reader(text.as_bytes()) {
            Err(DictionaryError::InvalidHeader(key)) => assert_eq!(key, "WHATISTHIS"),
            other => panic!("expected invalid header, got {other:?}"),
        }
    }

    #[test]
    fn header_minima_are_read() {
        let text = "LEFTHYPHENMIN 4\nRIGHTHYPHENMIN 5\nNEXTLEVEL\n";
        let dictionary = HyphenDictionary::from_reader(text.as_bytes()).unwrap();
        assert_eq!(dictionary.left_hyphen_min(), 4);
        assert_eq!(dictionary.right_hyphen_min(), 5);
    }

    #[test]
    fn uppercase_words_match_lowercase_patterns() {
        let dictionary = dictionary("1fi\n1c\n");
        assert_eq!(dictionary.hyphenate("Difficult"), ["Dif", "fi", "cult"]);
    }
}
