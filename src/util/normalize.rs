// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Canonical search form for Arabic (and mixed Latin) text.
//!
//! Quranic editions carry full tashkeel, Quranic small signs, tatweel, and in
//! the tajweed edition, inline rule markup like `[h:1[ٱ]`. People type none of
//! that. So before a verse becomes terms, and before a query becomes terms,
//! both go through [`normalize`]:
//!
//! ```text
//! "بِسْمِ ٱللَّهِ"  ──lowercase──▶ ──strip marks──▶ ──unify letters──▶ ──strip markup──▶ ──trim──▶  "بسم الله"
//! ```
//!
//! The index builder and the query tokenizer call the exact same function.
//! If they ever diverge, recall drops silently: the index holds one spelling
//! and the query looks for another.
//!
//! # Step order
//!
//! Case folding runs first so it can never re-introduce a combining mark
//! (`İ` lowercases to `i` + U+0307). Markup removal runs after letter
//! unification so that nothing it exposes needs another pass. Removing
//! tatweel, annotation signs or markup brackets can leave two runs of kept
//! marks side by side, so the last step decomposes once more to restore
//! canonical mark order. The result is idempotent:
//! `normalize(normalize(x)) == normalize(x)`.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Letter unification table. Fixed and exhaustive.
///
/// Hamza-bearing alef forms and alef wasla collapse to bare alef, the
/// hamza-bearing waw/ya collapse to their base letters, taa marbuta becomes
/// haa, and alef maksura becomes ya.
const LETTER_UNIFICATION: [(char, char); 8] = [
    ('آ', 'ا'),
    ('أ', 'ا'),
    ('إ', 'ا'),
    ('ٱ', 'ا'),
    ('ؤ', 'و'),
    ('ئ', 'ي'),
    ('ة', 'ه'),
    ('ى', 'ي'),
];

/// Normalize text for indexing and querying.
///
/// Lowercases, removes Arabic tashkeel and Quranic annotation signs (plus
/// general combining marks), unifies letter variants, removes tajweed markup,
/// and trims. Empty input gives an empty string.
///
/// ```
/// use ayat_search::normalize;
///
/// assert_eq!(normalize("بِسْمِ"), normalize("بسم"));
/// assert_eq!(normalize("آدم"), "ادم");
/// assert_eq!(normalize("رسالة"), "رساله");
/// assert_eq!(normalize("  Al-Faatiha "), "al-faatiha");
/// ```
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let folded = text.to_lowercase();
    let unified: String = decompose(&folded)
        .filter(|c| !is_diacritic(*c))
        .map(unify_letter)
        .collect();
    let unmarked = strip_tajweed(&unified);

    // Dropping a base character can join two mark runs; put them back in canonical order
    decompose(&unmarked).collect::<String>().trim().to_string()
}

/// Split text into normalized search terms.
///
/// Normalizes first, then splits on anything that is not alphanumeric.
/// Order is preserved and duplicates are kept; callers count frequencies.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(is_word_boundary)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Word boundary detection: checks if character is a word separator.
#[inline]
pub fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Length in Unicode scalar values, not bytes.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(feature = "unicode-normalization")]
fn decompose(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
}

/// Without NFD, precomposed hamza letters are still caught by the table.
#[cfg(not(feature = "unicode-normalization"))]
fn decompose(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
}

/// Marks with no lexical value for matching.
#[inline]
fn is_diacritic(c: char) -> bool {
    matches!(c,
        '\u{064B}'..='\u{065F}' |  // Tashkeel: fathatan .. wavy hamza below
        '\u{0670}' |               // Superscript alef
        '\u{06D6}'..='\u{06ED}' |  // Quranic annotation signs
        '\u{0640}' |               // Tatweel
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

#[inline]
fn unify_letter(c: char) -> char {
    LETTER_UNIFICATION
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

/// Remove tajweed rule markup, keeping the annotated letters.
///
/// `[h:1[ٱ]` becomes `ٱ`, `[l[ل]` becomes `ل`. Brackets that don't form a
/// complete tag are left untouched. Runs to a fixpoint, since removing one
/// tag can complete another (`[a[[b[c]]`).
pub fn strip_tajweed(text: &str) -> String {
    let mut current = text.to_string();
    while current.contains('[') {
        let next = strip_tajweed_once(&current);
        if next.len() == current.len() {
            break;
        }
        current = next;
    }
    current
}

fn strip_tajweed_once(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '[' {
            if let Some((content_start, close)) = match_tajweed_tag(&chars, i) {
                out.extend(&chars[content_start..close]);
                i = close + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// Match `[r[...]` or `[r:N[...]` starting at `open`.
///
/// Returns the content range `(start, close)` where `chars[close] == ']'`.
/// Content runs to the first closing bracket, like a non-greedy regex.
fn match_tajweed_tag(chars: &[char], open: usize) -> Option<(usize, usize)> {
    let mut i = open + 1;
    if !chars.get(i)?.is_ascii_lowercase() {
        return None;
    }
    i += 1;

    if chars.get(i) == Some(&':') {
        i += 1;
        let digits_start = i;
        while chars.get(i).is_some_and(char::is_ascii_digit) {
            i += 1;
        }
        if i == digits_start {
            return None;
        }
    }

    if chars.get(i) != Some(&'[') {
        return None;
    }

    let content_start = i + 1;
    let close = chars[content_start..].iter().position(|&c| c == ']')? + content_start;
    Some((content_start, close))
}
