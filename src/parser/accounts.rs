use crate::models::{AccountChange, AccountChangeKind};
use crate::raw_transaction::RawChange;

const WRITE_RESOURCE: &str = "write_resource";
const WRITE_TABLE_ITEM: &str = "write_table_item";

// One entry per resource or table-item write, everything else is dropped
pub fn extract_account_changes(changes: &[RawChange]) -> Vec<AccountChange> {
    changes
        .iter()
        .filter(|change| {
            matches!(
                change.kind.as_deref(),
                Some(WRITE_RESOURCE) | Some(WRITE_TABLE_ITEM)
            )
        })
        .map(|change| {
            let account = change.address.clone().unwrap_or_else(|| "unknown".to_string());
            AccountChange {
                description: format!("Account {} was modified", account),
                account,
                change_type: AccountChangeKind::Modified,
                balance: 0.0,
                sequence_number: change.sequence_number(),
            }
        })
        .collect()
}
