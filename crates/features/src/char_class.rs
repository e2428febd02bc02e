//! Character classes used by the digit and special-character counts
//!
//! Trained models saw counts taken with the training pipeline's string
//! predicates, which differ from `char::is_numeric` and
//! `char::is_alphanumeric` outside ASCII: vulgar fractions such as `½` are
//! not digits, and combining marks such as Devanagari vowel signs are not
//! alphanumeric.

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

/// Code points with Numeric_Type=Digit (all general category `No`).
/// General categories come from `unicode-properties`; this property is not
/// exposed there.
const DIGIT_NUMERIC_TYPE: [(char, char); 20] = [
    ('\u{00B2}', '\u{00B3}'),
    ('\u{00B9}', '\u{00B9}'),
    ('\u{1369}', '\u{1371}'),
    ('\u{19DA}', '\u{19DA}'),
    ('\u{2070}', '\u{2070}'),
    ('\u{2074}', '\u{2079}'),
    ('\u{2080}', '\u{2089}'),
    ('\u{2460}', '\u{2468}'),
    ('\u{2474}', '\u{247C}'),
    ('\u{2488}', '\u{2490}'),
    ('\u{24EA}', '\u{24EA}'),
    ('\u{24F5}', '\u{24FD}'),
    ('\u{24FF}', '\u{24FF}'),
    ('\u{2776}', '\u{277E}'),
    ('\u{2780}', '\u{2788}'),
    ('\u{278A}', '\u{2792}'),
    ('\u{10A40}', '\u{10A43}'),
    ('\u{10E60}', '\u{10E68}'),
    ('\u{11052}', '\u{1105A}'),
    ('\u{1F100}', '\u{1F10A}'),
];

/// Decimal digits (`Nd`) plus Numeric_Type=Digit characters like `²`
pub fn is_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    match c.general_category() {
        GeneralCategory::DecimalNumber => true,
        GeneralCategory::OtherNumber => DIGIT_NUMERIC_TYPE
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&c)),
        _ => false,
    }
}

/// Letters (`L*`) or numbers (`N*`); combining marks are excluded
pub fn is_alnum(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric();
    }
    matches!(
        c.general_category_group(),
        GeneralCategoryGroup::Letter | GeneralCategoryGroup::Number
    )
}
