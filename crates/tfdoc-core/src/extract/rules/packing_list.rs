//! Packing list fields.

use lazy_static::lazy_static;

use super::FieldRule;
use crate::extract::patterns::*;
use crate::models::document::FieldKind;

lazy_static! {
    pub static ref PACKING_LIST_RULES: Vec<FieldRule> = vec![
        FieldRule::new("Packing List Number", &PACKING_LIST_NUMBER, 0.9, FieldKind::Identifier),
        FieldRule::new("Invoice Number", &INVOICE_NUMBER, 0.85, FieldKind::Identifier),
        FieldRule::new("Total Packages", &TOTAL_PACKAGES, 0.85, FieldKind::Quantity),
        FieldRule::new("Gross Weight", &GROSS_WEIGHT, 0.85, FieldKind::Quantity),
        FieldRule::new("Net Weight", &NET_WEIGHT, 0.85, FieldKind::Quantity),
        FieldRule::new("Measurement", &MEASUREMENT, 0.8, FieldKind::Quantity),
    ];
}
