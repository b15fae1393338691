//! Turns a raw Aptos transaction into a [`TransactionExplanation`].
//!
//! Everything here is pure: no I/O, no shared state, and the same input always
//! produces the same explanation. Missing payloads, events or changes only leave
//! the matching sections empty.

mod accounts;
mod balances;
mod calls;
mod events;
mod narrative;
mod transfers;

use serde_json::Value;
use tracing::debug;

use crate::error::ExplainError;
use crate::lookup::NATIVE_DECIMALS;
use crate::models::TransactionExplanation;
use crate::raw_transaction::RawTransaction;

pub use accounts::extract_account_changes;
pub use balances::extract_balance_changes;
pub use calls::{classify, extract_function_calls};
pub use narrative::{Narrative, synthesize};
pub use transfers::extract_token_transfers;

/// Explain one transaction record.
pub fn parse_aptos_transaction(tx: &RawTransaction) -> TransactionExplanation {
    let hash = tx.hash.clone().unwrap_or_default();
    let success = tx.success.unwrap_or(false);

    debug!(
        hash = %hash,
        success,
        events = tx.events.len(),
        changes = tx.changes.len(),
        has_payload = tx.payload.is_some(),
        "Parsing Aptos transaction"
    );

    let gas_used = tx.gas_used.unwrap_or(0);
    let gas_unit_price = tx.gas_unit_price.unwrap_or(0);
    // Convert octas to APT
    let gas_fee = (gas_used as f64 * gas_unit_price as f64) / 10f64.powi(NATIVE_DECIMALS as i32);

    let account_changes = extract_account_changes(&tx.changes);
    let function_calls = extract_function_calls(tx.payload.as_ref());
    let token_transfers = extract_token_transfers(&tx.events);
    let transaction_type = classify(&function_calls);
    let balance_changes = extract_balance_changes(&tx.events);

    let Narrative {
        summary,
        educational_content,
    } = synthesize(
        transaction_type,
        &function_calls,
        &token_transfers,
        &balance_changes,
    );

    let error = (!success).then(|| tx.vm_status.clone().unwrap_or(Value::Null).to_string());

    TransactionExplanation {
        hash,
        success,
        summary,
        timestamp: tx.timestamp.map(|secs| secs.saturating_mul(1000)),
        gas_used,
        gas_unit_price,
        gas_fee,
        version: tx.version.unwrap_or(0),
        block_height: tx.block_height,
        sender: tx.sender.clone(),
        account_changes,
        function_calls,
        token_transfers,
        transaction_type,
        error,
        balance_changes,
        educational_content,
    }
}

/// Validate the gross shape of a fetched JSON record, then explain it.
pub fn explain_value(value: Value) -> Result<TransactionExplanation, ExplainError> {
    let tx = RawTransaction::from_value(value)?;
    Ok(parse_aptos_transaction(&tx))
}
