//! Common regex patterns for trade-finance field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// ISO currency codes seen on trade documents. Upper case only.
const CURRENCY: &str = r"(?-i:USD|EUR|GBP|JPY|CNY|RMB|CHF|AUD|CAD|HKD|SGD|INR|AED|SAR|KRW|MYR|THB|IDR|NZD|ZAR|BRL|MXN|TRY|SEK|NOK|DKK|PLN|BDT|PKR|VND|PHP|EGP|NGN|KES)";

/// Decimal number with optional thousands separators.
const NUMBER: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?";

/// Reference token: letters, digits, slashes and hyphens, with at least one digit.
const REFERENCE: &str = r"([A-Za-z0-9/\-]*\d[A-Za-z0-9/\-]*)";

/// Like `REFERENCE` without slashes.
const HYPHENATED: &str = r"([A-Za-z0-9\-]*\d[A-Za-z0-9\-]*)";

/// Supported date layouts, captured as group 1.
const DATE: &str = r"(\d{4}-\d{1,2}-\d{1,2}|\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}|\d{1,2}[\s\-](?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[\s\-]\d{4}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}|\b\d{6}\b)";

/// Number followed by a unit word.
const WEIGHT: &str = r"(\d[\d,]*(?:\.\d+)?[ \t]*(?:kgs?|kilograms?|lbs?|mt|tons?|tonnes?)\b)";

/// Separator between a label and its value.
const SEP: &str = r"[ \t]*[:.]?[ \t]*";

fn labeled(label: &str, value: &str) -> Regex {
    Regex::new(&format!(r"(?im)\b(?:{}){}{}", label, SEP, value)).unwrap()
}

/// `label: value` with the value running to the end of the line.
fn labeled_line(label: &str) -> Regex {
    Regex::new(&format!(r"(?im)\b(?:{})[ \t]*:[ \t]*([^\n]+)", label)).unwrap()
}

fn amount() -> String {
    format!(r"({}[ \t]?{})", CURRENCY, NUMBER)
}

lazy_static! {
    // Shared
    pub static ref AMOUNT: Regex = Regex::new(&format!(r"\b{}", amount())).unwrap();

    pub static ref PORT_OF_LOADING: Regex =
        labeled_line(r"port\s+of\s+loading|port\s+of\s+departure");

    pub static ref PORT_OF_DISCHARGE: Regex =
        labeled_line(r"port\s+of\s+discharge|port\s+of\s+destination");

    pub static ref INVOICE_NUMBER: Regex = Regex::new(&format!(
        r"(?i)\binvoice[ \t]*(?:number\b|no\b\.?|#){}{}",
        SEP, REFERENCE
    ))
    .unwrap();

    // Letter of credit
    pub static ref LC_NUMBER: Regex = Regex::new(&format!(
        r"(?i)(?:\b(?:l/?c|letter\s+of\s+credit|documentary\s+credit|credit)[ \t]*)?(?:\bnumber\b|\bno\b\.?|#){}{}",
        SEP, HYPHENATED
    ))
    .unwrap();

    pub static ref LC_ISSUE_DATE: Regex =
        labeled(r"date\s+of\s+issue|issue\s+date|issued\s+on", DATE);

    pub static ref LC_EXPIRY_DATE: Regex = labeled(
        r"date\s+and\s+place\s+of\s+expiry|expiry\s+date|date\s+of\s+expiry|expires?\s+on",
        DATE,
    );

    pub static ref LC_LATEST_SHIPMENT: Regex = labeled(
        r"latest\s+(?:date\s+of\s+)?shipment(?:\s+date)?",
        DATE,
    );

    pub static ref BENEFICIARY: Regex = labeled_line("beneficiary");

    pub static ref APPLICANT: Regex = labeled_line("applicant");

    pub static ref ISSUING_BANK: Regex = labeled_line(r"issuing\s+bank");

    pub static ref ADVISING_BANK: Regex = labeled_line(r"advising\s+bank");

    // Commercial invoice
    pub static ref INVOICE_DATE: Regex =
        labeled(r"invoice\s+date|date\s+of\s+invoice|date", DATE);

    pub static ref SELLER: Regex = labeled_line(r"seller|exporter");

    pub static ref BUYER: Regex = labeled_line(r"buyer|importer|sold\s+to|bill\s+to");

    pub static ref TOTAL_AMOUNT: Regex = Regex::new(&format!(
        r"(?i)\b(?:grand\s+)?total(?:\s+amount)?(?:\s+due)?(?:\s+value)?{}{}",
        SEP,
        amount()
    ))
    .unwrap();

    pub static ref INCOTERMS: Regex = Regex::new(
        r"\b((?:EXW|FCA|FAS|FOB|CFR|CIF|CPT|CIP|DAP|DPU|DDP)(?:[ \t]+[A-Z][A-Za-z]+)?)\b"
    )
    .unwrap();

    pub static ref PAYMENT_TERMS: Regex =
        labeled_line(r"payment\s+terms|terms\s+of\s+payment");

    pub static ref LC_REFERENCE: Regex = Regex::new(&format!(
        r"(?i)\b(?:l/?c|letter\s+of\s+credit|documentary\s+credit)[ \t]*(?:number\b|no\b\.?|ref(?:erence)?\b\.?){}{}",
        SEP, HYPHENATED
    ))
    .unwrap();

    // Bill of lading
    pub static ref BL_NUMBER: Regex = Regex::new(&format!(
        r"(?i)\b(?:b/?l|bill\s+of\s+lading)[ \t]*(?:number\b|no\b\.?|#){}{}",
        SEP, REFERENCE
    ))
    .unwrap();

    pub static ref SHIPPER: Regex = labeled_line(r"shipper(?:\s*/\s*exporter)?");

    pub static ref CONSIGNEE: Regex = labeled_line("consignee");

    pub static ref NOTIFY_PARTY: Regex = labeled_line(r"notify(?:\s+party)?");

    pub static ref VESSEL: Regex =
        labeled_line(r"(?:ocean\s+)?vessel(?:\s+name)?(?:\s*/\s*voy(?:age)?)?");

    pub static ref VOYAGE: Regex = labeled(
        r"voy(?:age)?(?:\s+(?:number|no\b\.?))?",
        HYPHENATED,
    );

    /// ISO 6346 container number: owner code, category, serial, check digit.
    pub static ref CONTAINER_NUMBER: Regex = Regex::new(r"\b([A-Z]{4}\d{7})\b").unwrap();

    pub static ref SHIPPED_ON_BOARD: Regex = labeled(
        r"shipped\s+on\s+board(?:\s+date)?|on\s+board\s+date|date\s+of\s+shipment",
        DATE,
    );

    // Packing list
    pub static ref PACKING_LIST_NUMBER: Regex = Regex::new(&format!(
        r"(?i)\bpacking\s+list[ \t]*(?:number\b|no\b\.?|#){}{}",
        SEP, REFERENCE
    ))
    .unwrap();

    pub static ref TOTAL_PACKAGES: Regex = labeled(
        r"total\s+(?:number\s+of\s+)?(?:packages|cartons|cases|pallets|pkgs|ctns)",
        r"(\d[\d,]*(?:[ \t]+[A-Za-z]+)?)",
    );

    pub static ref GROSS_WEIGHT: Regex = labeled(r"(?:total\s+)?gross\s+weight", WEIGHT);

    pub static ref NET_WEIGHT: Regex = labeled(r"(?:total\s+)?net\s+weight", WEIGHT);

    pub static ref MEASUREMENT: Regex = labeled(
        r"measurement|volume|total\s+cbm",
        r"(\d[\d,]*(?:\.\d+)?[ \t]*(?:cbm|m3|cubic\s+met(?:er|re)s?))",
    );

    // Generic `label: value` lines
    pub static ref LABEL_VALUE: Regex = Regex::new(r"^([^:]+?)[ \t]*:[ \t]*(.+)$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
        re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
    }

    #[test]
    fn test_lc_number_variants() {
        assert_eq!(capture(&LC_NUMBER, "LETTER OF CREDIT NO. LC-2024-001"), Some("LC-2024-001"));
        assert_eq!(capture(&LC_NUMBER, "L/C Number: 0042ABC"), Some("0042ABC"));
        assert_eq!(capture(&LC_NUMBER, "Credit # 77-12"), Some("77-12"));
        assert_eq!(capture(&LC_NUMBER, "No: 12345"), Some("12345"));
        assert_eq!(capture(&LC_NUMBER, "NOTIFY 12345"), None);
    }

    #[test]
    fn test_amount_requires_known_currency() {
        assert_eq!(capture(&AMOUNT, "AMOUNT: USD 1,250,000.00"), Some("USD 1,250,000.00"));
        assert_eq!(capture(&AMOUNT, "EUR500"), Some("EUR500"));
        assert_eq!(capture(&AMOUNT, "SUBJECT TO UCP 600"), None);
        assert_eq!(capture(&AMOUNT, "usd 100"), None);
    }

    #[test]
    fn test_total_amount() {
        assert_eq!(capture(&TOTAL_AMOUNT, "TOTAL AMOUNT: USD 500.00"), Some("USD 500.00"));
        assert_eq!(capture(&TOTAL_AMOUNT, "Grand total USD 12,000"), Some("USD 12,000"));
        assert_eq!(capture(&TOTAL_AMOUNT, "SUBTOTAL: USD 5"), None);
    }

    #[test]
    fn test_labeled_line_stops_at_newline() {
        assert_eq!(
            capture(&BENEFICIARY, "BENEFICIARY: ABC Trading Company Limited\nAPPLICANT: X"),
            Some("ABC Trading Company Limited")
        );
        assert_eq!(capture(&BENEFICIARY, "BENEFICIARY:\nAPPLICANT: X"), None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(capture(&LC_EXPIRY_DATE, "EXPIRY DATE: 15 March 2024"), Some("15 March 2024"));
        assert_eq!(capture(&LC_ISSUE_DATE, "Date of issue 240115"), Some("240115"));
        assert_eq!(capture(&INVOICE_DATE, "DATE: 2024-01-20"), Some("2024-01-20"));
        assert_eq!(
            capture(&SHIPPED_ON_BOARD, "SHIPPED ON BOARD: Feb 3, 2024"),
            Some("Feb 3, 2024")
        );
    }

    #[test]
    fn test_bill_of_lading_patterns() {
        assert_eq!(capture(&BL_NUMBER, "B/L NO: MAEU-240117"), Some("MAEU-240117"));
        assert_eq!(capture(&CONTAINER_NUMBER, "CONTAINER MSKU1234565 40HC"), Some("MSKU1234565"));
        assert_eq!(capture(&VOYAGE, "VOYAGE NO: 412E"), Some("412E"));
        assert_eq!(capture(&VESSEL, "VESSEL/VOYAGE: MSC ANNA"), Some("MSC ANNA"));
    }

    #[test]
    fn test_packing_list_patterns() {
        assert_eq!(capture(&TOTAL_PACKAGES, "TOTAL PACKAGES: 120 CARTONS"), Some("120 CARTONS"));
        assert_eq!(capture(&GROSS_WEIGHT, "GROSS WEIGHT: 2,450.5 KGS"), Some("2,450.5 KGS"));
        assert_eq!(capture(&MEASUREMENT, "MEASUREMENT: 18.2 CBM"), Some("18.2 CBM"));
    }

    #[test]
    fn test_incoterms_case_sensitive() {
        assert_eq!(capture(&INCOTERMS, "TERMS: CIF Hamburg"), Some("CIF Hamburg"));
        assert_eq!(capture(&INCOTERMS, "cif hamburg"), None);
    }
}
