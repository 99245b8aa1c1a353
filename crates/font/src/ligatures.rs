//! The standard Latin ligature set.

/// Multi-character sequences and their single-codepoint ligature forms.
/// Ordered longest first so that "ffi" wins over "ff".
const LIGATURES: &[(&str, char)] = &[
    ("ffi", '\u{FB03}'),
    ("ffl", '\u{FB04}'),
    ("ff", '\u{FB00}'),
    ("fi", '\u{FB01}'),
    ("fl", '\u{FB02}'),
];

/// Substitute the standard Latin ligatures, keeping only the ones the font
/// covers according to `has_character`. Already-substituted ligature
/// codepoints pass through unchanged, so the transform is idempotent.
pub fn transform_standard_ligatures(text: &str, has_character: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'outer: while !rest.is_empty() {
        for &(sequence, ligature) in LIGATURES {
            if rest.starts_with(sequence) && has_character(ligature) {
                out.push(ligature);
                rest = &rest[sequence.len()..];
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        out.push(chars.next().unwrap());
        rest = chars.as_str();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_longest_first() {
        let all = |_: char| true;
        assert_eq!(transform_standard_ligatures("difficult", all), "di\u{FB03}cult");
        assert_eq!(transform_standard_ligatures("fine flat stuff", all), "\u{FB01}ne \u{FB02}at stu\u{FB00}");
    }

    #[test]
    fn skips_uncovered_ligatures() {
        let only_fi = |ch: char| ch == '\u{FB01}';
        assert_eq!(transform_standard_ligatures("difficult", only_fi), "dif\u{FB01}cult");
        let none = |_: char| false;
        assert_eq!(transform_standard_ligatures("difficult", none), "difficult");
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let all = |_: char| true;
        let once = transform_standard_ligatures("affliction offices", all);
        let twice = transform_standard_ligatures(&once, all);
        assert_eq!(once, twice);
    }
}
