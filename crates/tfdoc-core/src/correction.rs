//! OCR error correction for common letter/digit confusions.
//!
//! Tokens are runs of ASCII letters, digits and `|`, optionally joined by
//! `.` or `,` (`1,25O.0O`). A token that looks numeric gets `O`/`o` read as
//! `0` and `I`/`l`/`|` read as `1`. An upper-case word of three or more
//! characters gets `0` read as `O` and `1` read as `I`.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"[A-Za-z0-9|]+(?:[.,][A-Za-z0-9|]+)*").unwrap();
    static ref PART: Regex = Regex::new(r"[A-Za-z0-9|]+").unwrap();
}

/// Corrected text and the number of characters changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub text: String,
    pub replacements: usize,
}

/// Characters OCR commonly produces in place of `0` or `1`.
fn is_digit_lookalike(c: char) -> bool {
    matches!(c, 'O' | 'o' | 'I' | 'l' | '|')
}

fn counts(part: &str) -> (usize, usize) {
    let digits = part.chars().filter(|c| c.is_ascii_digit()).count();
    (digits, part.chars().count() - digits)
}

/// A part with at least one digit, where the digits are the majority or
/// every other character is a digit lookalike (`1OO`).
fn is_numeric_like(part: &str) -> bool {
    let (digits, others) = counts(part);
    digits > 0
        && (digits >= others
            || part
                .chars()
                .filter(|c| !c.is_ascii_digit())
                .all(is_digit_lookalike))
}

/// A `.`/`,` separated group reads as one number when some part has a digit
/// and every part is numeric-like or made of lookalikes only (`1OO.OO`).
fn is_numeric_group(token: &str) -> bool {
    let mut has_digit = false;
    let all_numeric = PART.find_iter(token).all(|m| {
        let part = m.as_str();
        has_digit |= part.chars().any(|c| c.is_ascii_digit());
        is_numeric_like(part) || part.chars().all(is_digit_lookalike)
    });
    has_digit && all_numeric
}

fn is_upper_word(part: &str) -> bool {
    let (digits, letters) = counts(part);
    part.len() >= 3
        && letters > digits
        && part
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .all(|c| c.is_ascii_uppercase())
}

fn to_digit(c: char) -> char {
    match c {
        'O' | 'o' => '0',
        'I' | 'l' | '|' => '1',
        other => other,
    }
}

fn to_letter(c: char) -> char {
    match c {
        '0' => 'O',
        '1' => 'I',
        other => other,
    }
}

fn map_chars(text: &str, map: fn(char) -> char) -> (String, usize) {
    let mut changed = 0;
    let mapped = text
        .chars()
        .map(|c| {
            let m = map(c);
            if m != c {
                changed += 1;
            }
            m
        })
        .collect();
    (mapped, changed)
}

fn correct_part(part: &str) -> (String, usize) {
    if is_numeric_like(part) {
        map_chars(part, to_digit)
    } else if is_upper_word(part) {
        map_chars(part, to_letter)
    } else {
        (part.to_string(), 0)
    }
}

fn correct_token(token: &str) -> (String, usize) {
    if is_numeric_group(token) {
        return map_chars(token, to_digit);
    }

    let mut changed = 0;
    let corrected = PART.replace_all(token, |caps: &Captures| {
        let (part, n) = correct_part(&caps[0]);
        changed += n;
        part
    });
    (corrected.into_owned(), changed)
}

/// Fix O/0 and I/1 swaps typical of OCR output.
pub fn correct_ocr_errors(text: &str) -> Correction {
    let mut replacements = 0;
    let corrected = TOKEN.replace_all(text, |caps: &Captures| {
        let (token, changed) = correct_token(&caps[0]);
        replacements += changed;
        token
    });

    Correction {
        text: corrected.into_owned(),
        replacements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numeric_tokens() {
        let c = correct_ocr_errors("TOTAL: USD 1,25O.0O");
        assert_eq!(c.text, "TOTAL: USD 1,250.00");
        assert_eq!(c.replacements, 2);

        assert_eq!(correct_ocr_errors("2O24-0l-15").text, "2024-01-15");
        assert_eq!(correct_ocr_errors("1|0").text, "110");
    }

    #[test]
    fn test_upper_case_words() {
        let c = correct_ocr_errors("C0MMERCIAL INV0ICE");
        assert_eq!(c.text, "COMMERCIAL INVOICE");
        assert_eq!(c.replacements, 2);

        assert_eq!(correct_ocr_errors("B1LL").text, "BILL");
    }

    #[test]
    fn test_untouched_tokens() {
        for text in ["INV-123", "hello world", "Port of Loading", "MSKU1234565", "NO: 12"] {
            let c = correct_ocr_errors(text);
            assert_eq!(c.text, text);
            assert_eq!(c.replacements, 0);
        }
    }

    #[test]
    fn test_amounts_with_mostly_misread_digits() {
        let c = correct_ocr_errors("USD 1OO.OO");
        assert_eq!(c.text, "USD 100.00");
        assert_eq!(c.replacements, 4);

        assert_eq!(correct_ocr_errors("TOTAL: 1OO").text, "TOTAL: 100");
        assert_eq!(correct_ocr_errors("QTY 1O").text, "QTY 10");
        assert_eq!(correct_ocr_errors("15.O1.2O24").text, "15.01.2024");
    }

    #[test]
    fn test_dotted_words_corrected_per_part() {
        assert_eq!(correct_ocr_errors("NO.123").text, "NO.123");
        assert_eq!(correct_ocr_errors("REF B0X.1O").text, "REF BOX.10");
        assert_eq!(correct_ocr_errors("Ltd. 1OO").text, "Ltd. 100");
    }

    #[test]
    fn test_whitespace_preserved() {
        let text = "LINE ONE\n\n  B0X  2O\n";
        assert_eq!(correct_ocr_errors(text).text, "LINE ONE\n\n  BOX  20\n");
    }
}
