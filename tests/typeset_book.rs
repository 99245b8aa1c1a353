//! End-to-end scenarios: a small book's worth of paragraphs through the
//! whole pipeline, from source text to positioned pages.

mod common;

use common::{drawn_text, RecordingSink, TestFont};
use quire::typeset::{Columns, ColumnLayout};
use quire::{
    parse_distance, Block, Bookmark, Bookmarks, BreakerConfig, Element, FontVariantFlags,
    HorizontalList, HyphenDictionary, SectionKind, Sections, Sp, Span, SpaceUnit, TextSpan,
    VerticalList,
};

fn pt(value: f64) -> Sp {
    SpaceUnit::Pt.to_sp(value)
}

fn english_dictionary() -> HyphenDictionary {
    let text = "UTF-8\nLEFTHYPHENMIN 2\nRIGHTHYPHENMIN 3\nNEXTLEVEL\n1fi\n1c\n";
    HyphenDictionary::from_reader(text.as_bytes()).unwrap()
}

#[test]
fn distance_literals() {
    assert_eq!(parse_distance("2.54 cm").unwrap(), 4_718_592);
    assert_eq!(parse_distance("-3 pt").unwrap(), -196_608);
    assert!(parse_distance("5").is_err());
    assert_eq!(
        parse_distance("1km").unwrap_err().to_string(),
        "unknown unit km"
    );
    assert_eq!(
        parse_distance("5").unwrap_err().to_string(),
        "missing unit"
    );
}

#[test]
fn french_punctuation_end_to_end() {
    let mut block = Block::body("Bonjour!");
    block.post_process_text("fr");
    assert_eq!(block.text(), "Bonjour\u{202F}!");

    let mut block = Block::body("- Bonjour");
    block.post_process_text("fr");
    assert_eq!(block.text(), "\u{2014}Bonjour");
}

#[test]
fn english_smart_quotes_end_to_end() {
    let mut block = Block::body("She said \"hi\", it's fine.");
    block.post_process_text("en_US");
    assert_eq!(block.text(), "She said \u{201C}hi\u{201D}, it\u{2019}s fine.");
}

#[test]
fn hyphenation_segments() {
    let dictionary = english_dictionary();
    assert_eq!(dictionary.hyphenate("difficult"), ["dif", "fi", "cult"]);
}

#[test]
fn roman_page_labels_with_a_part_on_page_seven() {
    // Six front-matter pages, then a part.
    let mut list = VerticalList::new();
    let font = TestFont::new().sized(10.0);
    for page in 0..7 {
        if page == 6 {
            list.add_element(Element::Bookmark(Bookmark::section(
                SectionKind::Part,
                "Part One",
            )));
        }
        let mut paragraph = HorizontalList::new();
        paragraph.add_text("content", &font, None);
        paragraph.add_end_of_paragraph();
        paragraph.format_into(&mut list, pt(200.0), &BreakerConfig::default());
        list.new_page();
    }

    let pages = list.format(pt(200.0), &BreakerConfig::default());
    assert_eq!(pages.len(), 7);

    let mut sections = Sections::new();
    sections.configure_from_bookmarks(&Bookmarks::from_pages(&pages));

    let labels: Vec<String> = (1..=7)
        .map(|page| sections.page_number_label(page))
        .collect();
    assert_eq!(labels, ["i", "ii", "iii", "iv", "v", "vi", "1"]);
}

#[test]
fn a_paragraph_flows_through_to_drawn_pages() {
    common::init_logging();
    let font = TestFont::new().sized(10.0);
    let dictionary = english_dictionary();

    let mut block = Block::body("It's a \"difficult\" business, typesetting.");
    block.post_process_text("en_US");

    let mut paragraph = HorizontalList::new();
    for span in block.spans() {
        if let Span::Text(text_span) = span {
            paragraph.add_text(&text_span.text, &font, Some(&dictionary));
        }
    }
    paragraph.add_end_of_paragraph();

    let mut list = VerticalList::new();
    paragraph.format_into(&mut list, pt(120.0), &BreakerConfig::default());
    list.eject_page();

    let pages = list.format(pt(400.0), &BreakerConfig::default());
    assert_eq!(pages.len(), 1);

    let mut sink = RecordingSink::default();
    pages[0].lay_out(0, pt(400.0), &mut sink).unwrap();
    let drawn = drawn_text(&sink);

    // Everything the paragraph said is drawn, smart quotes included, with
    // no stray hyphens unless a line actually broke inside a word.
    let squashed: String = drawn.chars().filter(|ch| !ch.is_whitespace()).collect();
    let expected: String = "It\u{2019}sa\u{201C}difficult\u{201D}business,typesetting."
        .chars()
        .collect::<String>();
    // Remove any discretionary hyphens the breaker chose.
    let squashed = squashed.replace('-', "");
    assert_eq!(squashed, expected.replace('-', ""));
}

#[test]
fn label_bookmarks_resolve_to_page_numbers() {
    let font = TestFont::new().sized(10.0);
    let mut list = VerticalList::new();

    let mut first = HorizontalList::new();
    first.add_text("first page", &font, None);
    first.add_end_of_paragraph();
    first.format_into(&mut list, pt(200.0), &BreakerConfig::default());
    list.new_page();

    let mut second = HorizontalList::new();
    second.add_text("see ", &font, None);
    second.add_element(Element::Bookmark(Bookmark::label("target")));
    second.add_text("here", &font, None);
    second.add_end_of_paragraph();
    second.format_into(&mut list, pt(200.0), &BreakerConfig::default());
    list.eject_page();

    let pages = list.format(pt(200.0), &BreakerConfig::default());
    assert_eq!(pages.len(), 2);

    let bookmarks = Bookmarks::from_pages(&pages);
    assert_eq!(bookmarks.page_for_label("target"), Some(2));
    assert_eq!(bookmarks.page_for_label("nowhere"), None);
}

#[test]
fn index_entries_land_on_their_pages() {
    let font = TestFont::new().sized(10.0);
    let mut list = VerticalList::new();

    let mut paragraph = HorizontalList::new();
    paragraph.add_text("kerning is subtle", &font, None);
    paragraph.add_element(Element::Bookmark(Bookmark::Index(vec![
        "typography".to_string(),
        "kerning".to_string(),
    ])));
    paragraph.add_end_of_paragraph();
    paragraph.format_into(&mut list, pt(200.0), &BreakerConfig::default());
    list.eject_page();

    let pages = list.format(pt(200.0), &BreakerConfig::default());
    let bookmarks = Bookmarks::from_pages(&pages);
    let index_pages: Vec<(usize, &Vec<String>)> = bookmarks
        .entries()
        .filter_map(|(page, bookmark)| match bookmark {
            Bookmark::Index(entries) => Some((page, entries)),
            _ => None,
        })
        .collect();
    assert_eq!(index_pages.len(), 1);
    assert_eq!(index_pages[0].0, 1);
    assert_eq!(index_pages[0].1[1], "kerning");
}

#[test]
fn two_column_section_spans_the_text_width() {
    use quire::typeset::{HBox, Rule};

    let text_width = pt(200.0);
    let layout = ColumnLayout::new(2, pt(10.0));
    let column_width = layout.column_width(text_width);

    let mut list = VerticalList::new();
    list.change_column_layout(layout);
    for _ in 0..4 {
        // Lines already set to the narrow per-column measure.
        list.add_element(Element::HBox(HBox::new(vec![Element::Rule(Rule::new(
            column_width,
            pt(7.0),
            pt(3.0),
        ))])));
    }
    list.eject_page();

    let pages = list.format(pt(400.0), &BreakerConfig::default());
    let columns: Vec<&Columns> = pages[0]
        .elements()
        .iter()
        .filter_map(|element| match element {
            Element::Columns(columns) => Some(columns),
            _ => None,
        })
        .collect();
    assert_eq!(columns.len(), 1);
    // The children hold the column measure, so the group spans the page's
    // text area.
    assert_eq!(columns[0].width(), text_width);
    assert_eq!(columns[0].columns().len(), 2);
}

#[test]
fn spans_pick_fonts_and_flow_together() {
    let regular = TestFont::new().sized(10.0);
    let bold = TestFont::new().sized(10.0);
    let pack = quire::FontPack::new(
        regular.clone(),
        bold,
        regular.clone(),
        regular.clone(),
        regular.clone(),
        regular,
    );

    let mut paragraph = HorizontalList::new();
    paragraph.add_text_span(
        &TextSpan::new("plain and ", FontVariantFlags::PLAIN),
        &pack,
        None,
    );
    paragraph.add_text_span(
        &TextSpan::new("bold", FontVariantFlags::PLAIN.bold(true)),
        &pack,
        None,
    );
    paragraph.add_end_of_paragraph();

    let lines = paragraph.format(pt(300.0), &BreakerConfig::default());
    assert_eq!(lines.len(), 1);

    let fonts: Vec<bool> = lines[0]
        .elements()
        .iter()
        .filter_map(|element| match element {
            Element::Text(text) => Some(text.font().is_same(pack.bold())),
            _ => None,
        })
        .collect();
    // The last run is bold, the others are not.
    assert!(fonts.last().copied().unwrap());
    assert!(!fonts[0]);
}
