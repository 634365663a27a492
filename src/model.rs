//! Wire types shared with the banking backend.
//!
//! The backend sends capability flags as 0/1 integers and omits them in
//! contexts that do not expose them; they stay `Option<u8>` here rather
//! than booleans so round-trips are lossless.

use serde::{Deserialize, Serialize};

/// A bank account as the backend serves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: Option<String>,
    /// Account category (`"personal"`, `"society"`, …). `type` on the wire.
    #[serde(rename = "type")]
    pub kind: String,
    pub iban: String,
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_deposit: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_withdraw: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_transfer: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_export: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_control_members: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_frozen: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_society: Option<u8>,
}

/// A ledger entry for an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    /// What happened: `"deposit"`, `"withdraw"`, `"transfer"`, …
    pub action: String,
    pub done_by: String,
    pub amount: f64,
    pub from_account: i64,
    pub to_account: i64,
    pub description: String,
    /// Backend timestamp, format unspecified — kept verbatim.
    pub created_at: String,
}
