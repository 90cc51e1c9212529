//! Static signature table for the supported trade-finance documents.
//!
//! All patterns are compiled with `(?im)` so `^`/`$` anchor per line, both
//! when a single normalized line is tested and when whole text is scanned.

use lazy_static::lazy_static;
use regex::Regex;

use super::DocumentSignature;
use crate::models::document::DocumentType;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

lazy_static! {
    pub(super) static ref SIGNATURES: Vec<DocumentSignature> = vec![
        DocumentSignature {
            document_type: DocumentType::LetterOfCredit,
            start_patterns: compile(&[
                r"(?im)^(?:irrevocable\s+)?(?:documentary\s+)?letter\s+of\s+credit\b",
                r"(?im)^(?:irrevocable\s+)?documentary\s+credit\b",
                r"(?im)^(?:irrevocable\s+)?(?:documentary\s+)?(?:letter\s+of\s+credit|credit)\s+(?:number|no\.?|#)",
                r"(?im)\bMT\s?700\b",
            ]),
            end_patterns: compile(&[
                r"(?im)^end\s+of\s+(?:letter\s+of\s+credit|documentary\s+credit|message)\b",
                r"(?im)\bsubject\s+to\s+(?:ucp\s*600|the\s+uniform\s+customs)",
            ]),
            keywords: vec![
                "letter of credit",
                "documentary credit",
                "beneficiary",
                "applicant",
                "issuing bank",
                "advising bank",
                "expiry",
                "amount",
                "latest shipment",
                "ucp 600",
            ],
        },
        DocumentSignature {
            document_type: DocumentType::CommercialInvoice,
            start_patterns: compile(&[
                r"(?im)^commercial\s+invoice\b",
                r"(?im)^(?:tax|proforma|pro-forma|customs)\s+invoice\b",
                r"(?im)^invoice$",
                r"(?im)^commercial\s+invoice\s+(?:number|no\.?|#)",
            ]),
            end_patterns: compile(&[
                r"(?im)^(?:total\s+amount\s+due|grand\s+total|amount\s+in\s+words)\b",
                r"(?im)^(?:authorized|authorised)\s+signature\b",
            ]),
            keywords: vec!["invoice", "commercial", "total", "amount", "unit price"],
        },
        DocumentSignature {
            document_type: DocumentType::BillOfLading,
            start_patterns: compile(&[
                r"(?im)^(?:(?:ocean|marine|sea|house|master|through)\s+)?bill\s+of\s+lading\b",
                r"(?im)^(?:(?:ocean|marine|sea|house|master|through)\s+)?bill\s+of\s+lading\s+(?:number|no\.?|#)",
            ]),
            end_patterns: compile(&[
                r"(?im)\bas\s+agents?\s+for\s+the\s+carrier\b",
                r"(?im)^signed\s+(?:for|on\s+behalf\s+of)\s+the\s+(?:carrier|master)\b",
            ]),
            keywords: vec![
                "bill of lading",
                "shipper",
                "consignee",
                "notify party",
                "vessel",
                "port of loading",
                "port of discharge",
                "freight",
                "container",
                "shipped on board",
            ],
        },
        DocumentSignature {
            document_type: DocumentType::PackingList,
            start_patterns: compile(&[
                r"(?im)^packing\s+(?:list|slip)\b",
                r"(?im)^(?:packing\s+and\s+)?weight\s+(?:list|note)\b",
                r"(?im)^packing\s+list\s+(?:number|no\.?|#)",
            ]),
            end_patterns: compile(&[r"(?im)^end\s+of\s+packing\s+list\b"]),
            keywords: vec![
                "packing list",
                "gross weight",
                "net weight",
                "cartons",
                "packages",
                "measurement",
                "marks",
                "quantity",
            ],
        },
        DocumentSignature {
            document_type: DocumentType::CertificateOfOrigin,
            start_patterns: compile(&[
                r"(?im)^certificate\s+of\s+origin\b",
                r"(?im)^(?:form\s+a|eur\.?\s?1|generalized\s+system\s+of\s+preferences)\b",
                r"(?im)^certificate\s+of\s+origin\s+(?:number|no\.?|#)",
            ]),
            end_patterns: compile(&[
                r"(?im)^(?:certified|certification|declaration)\s+by\s+the\s+(?:chamber|competent\s+authority)\b",
            ]),
            keywords: vec![
                "certificate of origin",
                "country of origin",
                "exporter",
                "producer",
                "chamber of commerce",
                "origin criterion",
                "hereby certif",
            ],
        },
        DocumentSignature {
            document_type: DocumentType::InsuranceCertificate,
            start_patterns: compile(&[
                r"(?im)^(?:marine\s+)?(?:cargo\s+)?insurance\s+(?:certificate|policy)\b",
                r"(?im)^certificate\s+of\s+insurance\b",
                r"(?im)^(?:insurance\s+)?policy\s+(?:number|no\.?|#)",
            ]),
            end_patterns: compile(&[r"(?im)\bclaims?\s+(?:are\s+)?payable\s+(?:at|in)\b"]),
            keywords: vec![
                "insurance",
                "insured",
                "policy",
                "premium",
                "claims",
                "institute cargo clauses",
                "sum insured",
                "underwriter",
            ],
        },
    ];
}
