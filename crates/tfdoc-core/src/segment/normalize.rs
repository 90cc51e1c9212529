//! Line normalization ahead of boundary detection.

/// Split text into non-empty trimmed lines with internal whitespace runs
/// collapsed to single spaces.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_lines() {
        let text = "  COMMERCIAL   INVOICE \r\n\r\n\tInvoice\t No:  42  \rTotal: USD 5\n   \n";
        assert_eq!(
            normalize_lines(text),
            vec!["COMMERCIAL INVOICE", "Invoice No: 42", "Total: USD 5"]
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize_lines("").is_empty());
        assert!(normalize_lines(" \n\t\n ").is_empty());
    }
}
