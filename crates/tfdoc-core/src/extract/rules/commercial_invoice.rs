//! Commercial invoice fields.

use lazy_static::lazy_static;

use super::FieldRule;
use crate::extract::patterns::*;
use crate::models::document::FieldKind;

lazy_static! {
    pub static ref COMMERCIAL_INVOICE_RULES: Vec<FieldRule> = vec![
        FieldRule::new("Invoice Number", &INVOICE_NUMBER, 0.9, FieldKind::Identifier),
        FieldRule::new("Invoice Date", &INVOICE_DATE, 0.85, FieldKind::Date),
        FieldRule::new("Seller", &SELLER, 0.8, FieldKind::Text),
        FieldRule::new("Buyer", &BUYER, 0.8, FieldKind::Text),
        FieldRule::new("Total Amount", &TOTAL_AMOUNT, 0.9, FieldKind::Amount),
        FieldRule::new("Incoterms", &INCOTERMS, 0.85, FieldKind::Text),
        FieldRule::new("Payment Terms", &PAYMENT_TERMS, 0.8, FieldKind::Text),
        FieldRule::new("LC Reference", &LC_REFERENCE, 0.85, FieldKind::Identifier),
    ];
}
