//! Bill of lading fields.

use lazy_static::lazy_static;

use super::FieldRule;
use crate::extract::patterns::*;
use crate::models::document::FieldKind;

lazy_static! {
    pub static ref BILL_OF_LADING_RULES: Vec<FieldRule> = vec![
        FieldRule::new("B/L Number", &BL_NUMBER, 0.9, FieldKind::Identifier),
        FieldRule::new("Shipper", &SHIPPER, 0.8, FieldKind::Text),
        FieldRule::new("Consignee", &CONSIGNEE, 0.8, FieldKind::Text),
        FieldRule::new("Notify Party", &NOTIFY_PARTY, 0.8, FieldKind::Text),
        FieldRule::new("Vessel", &VESSEL, 0.85, FieldKind::Text),
        FieldRule::new("Voyage Number", &VOYAGE, 0.85, FieldKind::Identifier),
        FieldRule::new("Port of Loading", &PORT_OF_LOADING, 0.8, FieldKind::Text),
        FieldRule::new("Port of Discharge", &PORT_OF_DISCHARGE, 0.8, FieldKind::Text),
        FieldRule::new("Container Number", &CONTAINER_NUMBER, 0.9, FieldKind::Identifier),
        FieldRule::new("Shipped on Board Date", &SHIPPED_ON_BOARD, 0.85, FieldKind::Date),
    ];
}
