//! OCR artifact cleanup and paragraph reflow.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extract::patterns::LABEL_VALUE;
use crate::models::config::defaults::GENERIC_MAX_LABEL_LEN;

lazy_static! {
    static ref HYPHEN_BREAK: Regex = Regex::new(r"(\p{L})-[ \t]*\n[ \t]*(\p{L})").unwrap();
    static ref INLINE_WHITESPACE: Regex = Regex::new(r"[ \t]+").unwrap();
}

fn ascii_replacement(c: char) -> Option<&'static str> {
    let replacement = match c {
        '\u{FB00}' => "ff",
        '\u{FB01}' => "fi",
        '\u{FB02}' => "fl",
        '\u{FB03}' => "ffi",
        '\u{FB04}' => "ffl",
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => "\"",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => "-",
        '\u{2026}' => "...",
        '\u{00A0}' | '\u{2007}' | '\u{202F}' => " ",
        _ => return None,
    };
    Some(replacement)
}

fn is_noise_line(line: &str) -> bool {
    line.chars().count() >= 3 && !line.chars().any(char::is_alphanumeric)
}

/// Clean common OCR artifacts from `text`.
pub fn clean_ocr_text(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.replace("\r\n", "\n").chars() {
        match ascii_replacement(c) {
            Some(replacement) => folded.push_str(replacement),
            None if c == '\r' => folded.push('\n'),
            None if c.is_control() && c != '\n' && c != '\t' => {}
            None => folded.push(c),
        }
    }

    let joined = HYPHEN_BREAK.replace_all(&folded, "${1}${2}");

    let mut lines: Vec<String> = Vec::new();
    for line in joined.lines() {
        let line = INLINE_WHITESPACE.replace_all(line, " ").trim().to_string();
        if is_noise_line(&line) {
            continue;
        }
        if line.is_empty() && lines.last().is_none_or(|last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Lines that keep their own line when reflowing: `label: value` pairs and
/// upper-case headings.
fn stands_alone(line: &str) -> bool {
    let labeled = LABEL_VALUE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .is_some_and(|label| label.as_str().chars().count() < GENERIC_MAX_LABEL_LEN);

    let heading = line.chars().any(char::is_alphabetic)
        && !line.chars().any(char::is_lowercase);

    labeled || heading
}

/// Join wrapped lines into paragraphs.
pub fn reflow_paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    fn flush(out: &mut Vec<String>, paragraph: &mut Vec<&str>) {
        if !paragraph.is_empty() {
            out.push(paragraph.join(" "));
            paragraph.clear();
        }
    }

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            flush(&mut out, &mut paragraph);
            if out.last().is_some_and(|last| !last.is_empty()) {
                out.push(String::new());
            }
        } else if stands_alone(line) {
            flush(&mut out, &mut paragraph);
            out.push(line.to_string());
        } else {
            paragraph.push(line);
        }
    }
    flush(&mut out, &mut paragraph);

    while out.last().is_some_and(|last| last.is_empty()) {
        out.pop();
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_typography_to_ascii() {
        assert_eq!(
            clean_ocr_text("\u{FB01}nal \u{201C}terms\u{201D} \u{2013} buyer\u{2019}s"),
            "final \"terms\" - buyer's"
        );
    }

    #[test]
    fn test_control_characters_dropped() {
        assert_eq!(clean_ocr_text("A\u{0007}B\u{000C}C"), "ABC");
        assert_eq!(clean_ocr_text("one\r\ntwo\rthree"), "one\ntwo\nthree");
    }

    #[test]
    fn test_hyphenated_words_rejoined() {
        assert_eq!(clean_ocr_text("docu-\nmentary credit"), "documentary credit");
        assert_eq!(clean_ocr_text("DOCU-  \n  MENTARY"), "DOCUMENTARY");
        assert_eq!(clean_ocr_text("LC-2024"), "LC-2024");
    }

    #[test]
    fn test_noise_lines_and_whitespace() {
        let text = "HEADER\n-----\n~~~\n--\nA   B\t\tC  ";
        assert_eq!(clean_ocr_text(text), "HEADER\n--\nA B C");
    }

    #[test]
    fn test_blank_lines_collapsed() {
        assert_eq!(clean_ocr_text("\n\na\n\n\n\nb\n\n"), "a\n\nb");
    }

    #[test]
    fn test_reflow_joins_wrapped_lines() {
        let text = "The goods were shipped\nin good order and\ncondition.\n\nNext paragraph\nhere.";
        assert_eq!(
            reflow_paragraphs(text),
            "The goods were shipped in good order and condition.\n\nNext paragraph here."
        );
    }

    #[test]
    fn test_reflow_keeps_labels_and_headings() {
        let text = "BILL OF LADING\nShipper: ABC Trading\nreceived the goods\nas stated";
        assert_eq!(
            reflow_paragraphs(text),
            "BILL OF LADING\nShipper: ABC Trading\nreceived the goods as stated"
        );
    }
}
