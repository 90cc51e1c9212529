//! Letter of credit fields.

use lazy_static::lazy_static;

use super::FieldRule;
use crate::extract::patterns::*;
use crate::models::document::FieldKind;

lazy_static! {
    pub static ref LETTER_OF_CREDIT_RULES: Vec<FieldRule> = vec![
        FieldRule::new("LC Number", &LC_NUMBER, 0.9, FieldKind::Identifier),
        FieldRule::new("Issue Date", &LC_ISSUE_DATE, 0.85, FieldKind::Date),
        FieldRule::new("Expiry Date", &LC_EXPIRY_DATE, 0.85, FieldKind::Date),
        FieldRule::new("Amount", &AMOUNT, 0.9, FieldKind::Amount),
        FieldRule::new("Beneficiary", &BENEFICIARY, 0.8, FieldKind::Text),
        FieldRule::new("Applicant", &APPLICANT, 0.8, FieldKind::Text),
        FieldRule::new("Issuing Bank", &ISSUING_BANK, 0.8, FieldKind::Text),
        FieldRule::new("Advising Bank", &ADVISING_BANK, 0.8, FieldKind::Text),
        FieldRule::new("Latest Shipment Date", &LC_LATEST_SHIPMENT, 0.85, FieldKind::Date),
        FieldRule::new("Port of Loading", &PORT_OF_LOADING, 0.8, FieldKind::Text),
        FieldRule::new("Port of Discharge", &PORT_OF_DISCHARGE, 0.8, FieldKind::Text),
    ];
}
