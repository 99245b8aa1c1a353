//! The horizontal assembler.
//!
//! Accumulates elements for one paragraph: text is split into words, words
//! are hyphenated into discretionaries, ligatures are folded around the
//! discretionaries, kerns are inserted, and the finished list is broken into
//! lines by the shared breaker.

use std::collections::VecDeque;

use quire_font::{FontPack, SizedFont, NO_CHARACTER};
use quire_hyphen::HyphenDictionary;
use quire_types::{Sp, SpaceUnit};
use quire_text::TextSpan;

use crate::breaker::{
    break_list, resolve_discretionary, BreakOutcome, BreakableList, BreakerConfig, Breakpoint,
    Chunk,
};
use crate::element::{
    Bookmark, CharDirection, Discretionary, Element, Flexibility, Glue, HBox, Kern, Penalty, Text,
};
use crate::vertical::VerticalList;

/// Accumulates elements in a horizontal list until a paragraph is finished,
/// then formats them into lines.
pub struct HorizontalList {
    elements: Vec<Element>,
    ragged_left: bool,
    ragged_right: bool,
    allow_line_breaks: bool,
    /// Cost of breaking at a discretionary hyphen inserted by hyphenation.
    hyphen_penalty: i64,
    /// Finite stretch granted to each ragged margin, making leftover space
    /// there acceptable.
    ragged_stretch: Sp,
}

impl Default for HorizontalList {
    fn default() -> HorizontalList {
        HorizontalList::new()
    }
}

impl HorizontalList {
    fn with_modes(ragged_left: bool, ragged_right: bool, allow_line_breaks: bool) -> HorizontalList {
        HorizontalList {
            elements: Vec::new(),
            ragged_left,
            ragged_right,
            allow_line_breaks,
            hyphen_penalty: Discretionary::HYPHEN_PENALTY,
            ragged_stretch: SpaceUnit::Pt.to_sp(10.0),
        }
    }

    /// A justified paragraph.
    pub fn new() -> HorizontalList {
        HorizontalList::with_modes(false, false, true)
    }

    /// A paragraph with a ragged right edge (no justification).
    pub fn ragged_right() -> HorizontalList {
        HorizontalList::with_modes(false, true, true)
    }

    /// A centered paragraph.
    pub fn centered() -> HorizontalList {
        HorizontalList::with_modes(true, true, true)
    }

    /// A list that never breaks at spaces; implicitly ragged right.
    pub fn no_line_breaks() -> HorizontalList {
        HorizontalList::with_modes(false, true, false)
    }

    /// Override the cost of discretionary hyphen breaks.
    pub fn set_hyphen_penalty(&mut self, hyphen_penalty: i64) {
        self.hyphen_penalty = hyphen_penalty;
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn add_element(&mut self, element: Element) {
        debug_assert!(
            !matches!(element, Element::Columns(_)),
            "column groups cannot appear in a horizontal list"
        );
        self.elements.push(element);
    }

    /// The number of footnotes carried in this list.
    pub fn footnote_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element, Element::Bookmark(Bookmark::Footnote(_))))
            .count()
    }

    /// Add a text span, picking the font from the span's style flags.
    pub fn add_text_span(
        &mut self,
        span: &TextSpan,
        font_pack: &FontPack,
        dictionary: Option<&HyphenDictionary>,
    ) {
        let font = if span.flags.small_caps {
            font_pack.small_caps()
        } else if span.flags.bold && span.flags.italic {
            font_pack.bold_italic()
        } else if span.flags.bold {
            font_pack.bold()
        } else if span.flags.italic {
            font_pack.italic()
        } else if span.flags.code {
            font_pack.code()
        } else {
            font_pack.regular()
        };

        self.add_text(&span.text, font, dictionary);
    }

    /// Add text in the given font: words, hyphenation, ligatures, kerning.
    ///
    /// Pass no dictionary to skip hyphenation.
    pub fn add_text(
        &mut self,
        text: &str,
        font: &SizedFont,
        dictionary: Option<&HyphenDictionary>,
    ) {
        // First, convert the string into word-sized Text elements with glue
        // and penalties between them.
        let mut elements = self.text_to_words(text, font);

        // Second, insert discretionary hyphens.
        if self.allow_line_breaks {
            if let Some(dictionary) = dictionary {
                elements = self.hyphenate(elements, dictionary, font);
            }
        }

        // Third, substitute ligatures, which may straddle discretionaries.
        elements = transform_ligatures(elements, font);

        // Finally, add kerning between and within text elements.
        elements = add_kerning(elements, font);

        self.elements.extend(elements);
    }

    /// The glue and penalties that end a paragraph: forbid a break before
    /// the filling glue, fill out the last line, force the break.
    pub fn add_end_of_paragraph(&mut self) {
        self.add_element(Element::Penalty(Penalty::new(Penalty::INFINITY)));
        self.add_element(Element::Glue(Glue::with_flex(
            0,
            Flexibility::infinite(SpaceUnit::Pt.to_sp(1.0)),
            Flexibility::NONE,
            true,
        )));
        self.add_element(Element::Penalty(Penalty::new(-Penalty::INFINITY)));
    }

    /// Break the paragraph into lines against the measure.
    pub fn break_lines(&self, line_width: Sp, config: &BreakerConfig) -> BreakOutcome<HBox> {
        break_list(self, line_width, config, 1)
    }

    /// Break the paragraph into lines and return them.
    pub fn format(&self, line_width: Sp, config: &BreakerConfig) -> Vec<HBox> {
        self.break_lines(line_width, config).boxes
    }

    /// Break the paragraph into lines and append them to a vertical list.
    pub fn format_into(
        &self,
        vertical_list: &mut VerticalList,
        line_width: Sp,
        config: &BreakerConfig,
    ) {
        for line in self.format(line_width, config) {
            vertical_list.add_element(Element::HBox(line));
        }
    }

    /// Split the string into three kinds of elements: glue (for spaces and
    /// non-breaking spaces), words, and runs of non-word characters.
    fn text_to_words(&self, text: &str, font: &SizedFont) -> Vec<Element> {
        let mut elements = Vec::new();

        let space_width = font.space_width();

        // No stretching or shrinking unless we're justifying.
        let stretchability: Sp = if self.ragged_left || self.ragged_right {
            0
        } else {
            1
        };

        // Roughly TeX's interword glue.
        let space_glue = Glue::new(
            space_width,
            space_width / 2 * stretchability,
            space_width / 3 * stretchability,
            true,
        );
        let thin_space_glue = Glue::new(
            space_width / 2,
            space_width / 4 * stretchability,
            space_width / 6 * stretchability,
            true,
        );

        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            i += 1;

            if ch == ' ' && self.allow_line_breaks {
                elements.push(Element::Glue(space_glue));
            } else if ch == '\u{00A0}' && self.allow_line_breaks {
                // Non-break space: elastic but preceded by an infinite
                // penalty so it never breaks.
                elements.push(Element::Penalty(Penalty::new(Penalty::INFINITY)));
                elements.push(Element::Glue(space_glue));
            } else if ch == '\u{202F}' && self.allow_line_breaks {
                // Thin non-break space.
                elements.push(Element::Penalty(Penalty::new(Penalty::INFINITY)));
                elements.push(Element::Glue(thin_space_glue));
            } else {
                let mut word = String::new();
                word.push(ch);

                // Grab the rest of the word (or of the non-word run).
                let is_word = is_word_character(ch);
                while i < chars.len() {
                    let ch = chars[i];
                    if is_word != is_word_character(ch)
                        || (matches!(ch, ' ' | '\u{00A0}' | '\u{202F}') && self.allow_line_breaks)
                    {
                        break;
                    }
                    word.push(ch);
                    i += 1;
                }

                elements.push(Element::Text(Text::new(word, font.clone())));
            }
        }

        elements
    }

    /// Replace each word Text with its syllables separated by discretionary
    /// hyphens.
    fn hyphenate(
        &self,
        elements: Vec<Element>,
        dictionary: &HyphenDictionary,
        font: &SizedFont,
    ) -> Vec<Element> {
        let mut new_elements = Vec::new();

        for element in elements {
            let Element::Text(text) = &element else {
                new_elements.push(element);
                continue;
            };
            let word = text.text();
            if !word.chars().next().is_some_and(is_word_character) {
                // Not a word, leave it as-is.
                new_elements.push(element);
                continue;
            }

            let syllables = dictionary.hyphenate(word);
            let last = syllables.len() - 1;
            for (i, syllable) in syllables.into_iter().enumerate() {
                // The hyphen is implicit unless the word carries its own.
                let pre_break = if syllable.ends_with('-') { "" } else { "-" };

                new_elements.push(Element::Text(Text::new(syllable, font.clone())));

                if i < last {
                    new_elements.push(Element::Discretionary(Discretionary::new(
                        HBox::make_only_string(pre_break, font),
                        HBox::make_only_string("", font),
                        HBox::make_only_string("", font),
                        self.hyphen_penalty,
                    )));
                }
            }
        }

        new_elements
    }
}

/// Whether the character can be part of a hyphenated word. Both kinds of
/// apostrophe count.
pub fn is_word_character(ch: char) -> bool {
    ch.is_alphabetic() || ch == '-' || ch == '\'' || ch == '’'
}

/// Substitute ligatures in a list of Text and Discretionary elements.
///
/// Were it not for hyphenation this would be a per-Text substitution, but a
/// discretionary can cut through the middle of a ligature, as in
/// "dif-fi-cult" cutting "ffi". So for each Text/Discretionary/Text pattern
/// the three whole alternative readings are reconstructed, ligated
/// independently, and redistributed into a common prefix, a new
/// discretionary, and a common suffix:
///
/// ```text
/// original:   difficult
/// hyphenated: Text(dif) Disc(-,,) Text(fi) Disc(-,,) Text(cult)
/// with "fi":  Text(dif) Disc(-,,) Text(ﬁ) Disc(-,,) Text(cult)
/// with "ffi": Text(di) Disc(f-,ﬁ,ﬃ) Disc(-,,) Text(cult)
/// ```
///
/// The trailing Text is pushed back onto the input because it may take part
/// in the next discretionary's pattern; its ligatures get substituted twice,
/// which is harmless.
fn transform_ligatures(elements: Vec<Element>, font: &SizedFont) -> Vec<Element> {
    let mut old_elements: VecDeque<Element> = elements.into();
    let mut new_elements: Vec<Element> = Vec::new();

    while let Some(element) = old_elements.pop_front() {
        // Pick out a Text/Discretionary/Text pattern, any part optional
        // except that the after-Text needs the discretionary.
        let (before, discretionary) = match element {
            Element::Text(text) => {
                let discretionary = match old_elements.front() {
                    Some(Element::Discretionary(_)) => match old_elements.pop_front() {
                        Some(Element::Discretionary(discretionary)) => Some(discretionary),
                        _ => unreachable!(),
                    },
                    _ => None,
                };
                (Some(text), discretionary)
            }
            Element::Discretionary(discretionary) => (None, Some(discretionary)),
            other => {
                new_elements.push(other);
                continue;
            }
        };
        let after = if discretionary.is_some() {
            match old_elements.front() {
                Some(Element::Text(_)) => match old_elements.pop_front() {
                    Some(Element::Text(text)) => Some(text),
                    _ => unreachable!(),
                },
                _ => None,
            }
        } else {
            None
        };

        if let (Some(before), Some(after)) = (&before, &after) {
            // Hyphenation never crosses font changes within a word.
            assert!(
                before.font().is_same(after.font()),
                "fonts differ across a discretionary"
            );
        }

        // The three whole alternative readings.
        let before_text = before.as_ref().map(|text| text.text()).unwrap_or("");
        let after_text = after.as_ref().map(|text| text.text()).unwrap_or("");
        let entire_pre_break = format!(
            "{}{}",
            before_text,
            discretionary
                .as_ref()
                .map(|d| d.pre_break().only_string())
                .unwrap_or("")
        );
        let entire_post_break = format!(
            "{}{}",
            discretionary
                .as_ref()
                .map(|d| d.post_break().only_string())
                .unwrap_or(""),
            after_text
        );
        let entire_no_break = format!(
            "{}{}{}",
            before_text,
            discretionary
                .as_ref()
                .map(|d| d.no_break().only_string())
                .unwrap_or(""),
            after_text
        );

        let entire_pre_break = font.transform_ligatures(&entire_pre_break);
        let entire_post_break = font.transform_ligatures(&entire_post_break);
        let entire_no_break = font.transform_ligatures(&entire_no_break);

        // What pre and no share stays a plain Text before the discretionary;
        // what post and no share stays a plain Text after it.
        let prefix_len = common_prefix_bytes(&entire_pre_break, &entire_no_break);
        let suffix_len = common_suffix_bytes(&entire_post_break, &entire_no_break);

        let common_prefix = &entire_no_break[..prefix_len];
        let common_suffix = &entire_post_break[entire_post_break.len() - suffix_len..];
        let pre_break = &entire_pre_break[prefix_len..];
        let post_break = &entire_post_break[..entire_post_break.len() - suffix_len];
        let no_break = &entire_no_break[prefix_len..entire_no_break.len() - suffix_len];

        if !common_prefix.is_empty() {
            new_elements.push(Element::Text(Text::new(common_prefix, font.clone())));
        }
        if let Some(discretionary) = discretionary {
            new_elements.push(Element::Discretionary(Discretionary::new(
                HBox::make_only_string(pre_break, font),
                HBox::make_only_string(post_break, font),
                HBox::make_only_string(no_break, font),
                discretionary.penalty(),
            )));
        }
        // The suffix may participate in the next discretionary's pattern, so
        // it goes back on the input.
        if !common_suffix.is_empty() {
            old_elements.push_front(Element::Text(Text::new(common_suffix, font.clone())));
        }
    }

    new_elements
}

fn common_prefix_bytes(a: &str, b: &str) -> usize {
    let mut len = 0;
    let mut b_chars = b.chars();
    for a_ch in a.chars() {
        if b_chars.next() != Some(a_ch) {
            break;
        }
        len += a_ch.len_utf8();
    }
    len
}

fn common_suffix_bytes(a: &str, b: &str) -> usize {
    let mut len = 0;
    let mut b_chars = b.chars().rev();
    for a_ch in a.chars().rev() {
        if b_chars.next() != Some(a_ch) {
            break;
        }
        len += a_ch.len_utf8();
    }
    len
}

/// Insert kerns between character pairs the font wants adjusted.
fn add_kerning(elements: Vec<Element>, font: &SizedFont) -> Vec<Element> {
    let mut new_elements = Vec::with_capacity(elements.len());
    add_kerning_to_list(&elements, &mut new_elements, NO_CHARACTER, font);
    new_elements
}

/// Kern the elements into `out`, tracking the previous character across
/// element boundaries. Returns the character the list ends with, for the
/// caller to continue tracking.
fn add_kerning_to_list(
    elements: &[Element],
    out: &mut Vec<Element>,
    mut previous_ch: char,
    font: &SizedFont,
) -> char {
    for (index, element) in elements.iter().enumerate() {
        match element {
            Element::Text(text) => {
                // Walk the text a character at a time, splitting it wherever
                // a pair needs kerning.
                let chars: Vec<char> = text.text().chars().collect();
                let mut segment_start = 0;
                for (i, &ch) in chars.iter().enumerate() {
                    let kerning = font.kerning(previous_ch, ch);
                    if kerning != 0 {
                        if i > segment_start {
                            let segment: String = chars[segment_start..i].iter().collect();
                            out.push(Element::Text(Text::new(segment, font.clone())));
                        }
                        out.push(Element::Kern(Kern::implicit(kerning)));
                        segment_start = i;
                    }
                    previous_ch = ch;
                }
                if segment_start < chars.len() {
                    let segment: String = chars[segment_start..].iter().collect();
                    out.push(Element::Text(Text::new(segment, font.clone())));
                }
            }
            Element::Glue(glue) => {
                // A glue with width is a space as far as kerning goes.
                if glue.size() > 0 {
                    previous_ch = ' ';
                }
                out.push(element.clone());
            }
            Element::Discretionary(discretionary) => {
                // Kern each branch separately: pre and no continue from the
                // preceding character, post starts fresh.
                let mut pre_break_elements = Vec::new();
                add_kerning_to_list(
                    discretionary.pre_break().elements(),
                    &mut pre_break_elements,
                    previous_ch,
                    font,
                );
                let mut post_break_elements = Vec::new();
                let post_break_ch = add_kerning_to_list(
                    discretionary.post_break().elements(),
                    &mut post_break_elements,
                    NO_CHARACTER,
                    font,
                );
                let mut no_break_elements = Vec::new();
                let no_break_ch = add_kerning_to_list(
                    discretionary.no_break().elements(),
                    &mut no_break_elements,
                    previous_ch,
                    font,
                );

                if post_break_ch != no_break_ch {
                    // The usual case for a simple discretionary hyphen: the
                    // post branch is empty while the no branch continues the
                    // word. The kern against the next character differs per
                    // branch, so peek ahead and put it inside each branch.
                    let mut resolved = false;
                    if let Some(Element::Text(peek)) = elements.get(index + 1) {
                        if let Some(next_ch) = peek.text().chars().next() {
                            let kerning = font.kerning(post_break_ch, next_ch);
                            if kerning != 0 {
                                post_break_elements.push(Element::Kern(Kern::implicit(kerning)));
                            }
                            let kerning = font.kerning(no_break_ch, next_ch);
                            if kerning != 0 {
                                no_break_elements.push(Element::Kern(Kern::implicit(kerning)));
                            }
                            resolved = true;
                        }
                    }
                    if resolved {
                        // Kerning against the next character is done; don't
                        // do it again at the outer level.
                        previous_ch = NO_CHARACTER;
                    } else {
                        // Seen with a two-ligature discretionary followed by
                        // a hyphen discretionary. The model can't carry a
                        // per-branch kern here, so carry on from the no-break
                        // branch, the most likely rendering.
                        log::warn!(
                            "cannot resolve kerning across discretionary (post {post_break_ch:?} vs no-break {no_break_ch:?}); assuming no-break"
                        );
                        previous_ch = no_break_ch;
                    }
                } else {
                    previous_ch = post_break_ch;
                }

                out.push(Element::Discretionary(Discretionary::new(
                    HBox::new(pre_break_elements),
                    HBox::new(post_break_elements),
                    HBox::new(no_break_elements),
                    discretionary.penalty(),
                )));
            }
            Element::Kern(_) => {
                panic!("kern elements must not appear before the kerning pass");
            }
            Element::Rule(_) | Element::VBox(_) => {
                // A zero-width rule is a strut and doesn't affect kerning;
                // anything with width resets the pair.
                if element.width() > 0 {
                    previous_ch = NO_CHARACTER;
                }
                out.push(element.clone());
            }
            Element::HBox(_) => {
                panic!("cannot kern through a nested hbox");
            }
            Element::Penalty(_) => {
                out.push(element.clone());
            }
            other => {
                panic!("unexpected element during kerning: {other:?}");
            }
        }
    }

    previous_ch
}

impl BreakableList for HorizontalList {
    type Output = HBox;

    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn element_size(&self, element: &Element) -> Sp {
        element.width()
    }

    fn make_output_box(&self, elements: Vec<Element>, _counter: usize, shift: Sp) -> HBox {
        HBox::with_shift(elements, shift)
    }

    /// The elements of one line: begin is inclusive, end exclusive except
    /// that a discretionary at either boundary is materialized as the
    /// appropriate branch.
    fn element_sublist(&self, begin: &Breakpoint, end: &Breakpoint) -> Vec<Element> {
        let begin_index = begin.start_index();
        let end_index = end.index();

        let mut elements =
            Vec::with_capacity(end_index.saturating_sub(begin_index) + 2);

        if self.ragged_left {
            // Make it acceptable to leave space on the left.
            elements.push(Element::Glue(Glue::with_flex(
                0,
                Flexibility::finite(self.ragged_stretch),
                Flexibility::NONE,
                true,
            )));
        }

        for i in begin_index..=end_index {
            let Some(element) = self.elements.get(i) else {
                break;
            };
            if let Element::Discretionary(discretionary) = element {
                elements.push(resolve_discretionary(
                    discretionary,
                    i,
                    begin_index,
                    end_index,
                ));
            } else if i < end_index {
                // The end index is normally exclusive.
                elements.push(element.clone());
            }
        }

        if self.ragged_right {
            elements.push(Element::Glue(Glue::with_flex(
                0,
                Flexibility::finite(self.ragged_stretch),
                Flexibility::NONE,
                true,
            )));
        }

        elements
    }

    fn chunk_extra_increment(&self, _chunk: &Chunk) -> usize {
        // Whole-page images don't take horizontal space; they're pulled out
        // during vertical processing.
        0
    }

    fn extra_stretch(&self) -> Sp {
        let mut extra = 0;
        if self.ragged_left {
            extra += self.ragged_stretch;
        }
        if self.ragged_right {
            extra += self.ragged_stretch;
        }
        extra
    }

    /// Reverse isolated right-to-left runs so they read correctly.
    fn reverse_right_to_left(&self, elements: Vec<Element>) -> Vec<Element> {
        let contains_rtl = elements.iter().any(|element| match element {
            Element::Text(text) => text.contains_right_to_left(),
            _ => false,
        });
        if !contains_rtl {
            return elements;
        }

        // Split every Text into single characters, leaving the rest alone.
        let mut single_chars: Vec<Element> = Vec::new();
        for element in elements {
            if let Element::Text(text) = &element {
                text.break_up_into(&mut single_chars);
            } else {
                single_chars.push(element);
            }
        }

        // Find maximal runs that start and end on a right-to-left character
        // and contain only right-to-left, neutral, or non-Text elements.
        // Reverse each in place.
        let mut first_rtl: Option<usize> = None;
        let mut most_recent_rtl: Option<usize> = None;
        for i in 0..single_chars.len() {
            let Element::Text(text) = &single_chars[i] else {
                continue;
            };
            match text.character_direction() {
                CharDirection::LeftToRight => {
                    if let (Some(first), Some(last)) = (first_rtl, most_recent_rtl) {
                        single_chars[first..=last].reverse();
                    }
                    first_rtl = None;
                    most_recent_rtl = None;
                }
                CharDirection::Neutral => {}
                CharDirection::RightToLeft => {
                    if first_rtl.is_none() {
                        first_rtl = Some(i);
                    }
                    most_recent_rtl = Some(i);
                }
            }
        }
        if let (Some(first), Some(last)) = (first_rtl, most_recent_rtl) {
            single_chars[first..=last].reverse();
        }

        // The single-character Texts could be merged back together here, but
        // there's no real benefit.
        single_chars
    }
}
