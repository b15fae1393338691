use std::collections::HashMap;

use tracing::{debug, warn};

use super::events::{EventFamily, classify_event};
use crate::lookup::{self, NATIVE_DECIMALS};
use crate::models::{BalanceChange, BalanceDirection};
use crate::raw_transaction::RawEvent;

#[derive(Debug, Clone)]
struct Flow {
    debits: u128, // minor units
    credits: u128,
    token_type: String,
}

// Per-account debit/credit totals, kept in first-seen order
#[derive(Debug, Default)]
struct Ledger {
    index: HashMap<String, usize>,
    flows: Vec<(String, Flow)>,
}

impl Ledger {
    fn entry(&mut self, account: &str, token_type: &str) -> &mut Flow {
        let slot = match self.index.get(account) {
            Some(&slot) => slot,
            None => {
                self.flows.push((
                    account.to_string(),
                    Flow {
                        debits: 0,
                        credits: 0,
                        token_type: token_type.to_string(),
                    },
                ));
                self.index.insert(account.to_string(), self.flows.len() - 1);
                self.flows.len() - 1
            }
        };
        &mut self.flows[slot].1
    }

    fn debit(&mut self, account: &str, token_type: &str, amount: u128) {
        let flow = self.entry(account, token_type);
        flow.debits = flow.debits.saturating_add(amount);
    }

    fn credit(&mut self, account: &str, token_type: &str, amount: u128) {
        let flow = self.entry(account, token_type);
        flow.credits = flow.credits.saturating_add(amount);
    }
}

/// Net every coin and fungible-asset event into at most one change per account.
///
/// Debits and credits are summed independently, `preBalance` holds the total
/// debited and `postBalance` the total credited. Accounts that net to zero are
/// dropped. Totals are kept in minor units and only scaled by the native
/// 8-decimal divisor when the change is emitted, so exact offsets stay zero.
pub fn extract_balance_changes(events: &[RawEvent]) -> Vec<BalanceChange> {
    let scale = 10f64.powi(NATIVE_DECIMALS as i32);
    let mut ledger = Ledger::default();

    for event in events {
        let family = classify_event(event.event_type());
        if family == EventFamily::Other {
            continue;
        }

        let Some(amount) = event.amount() else {
            warn!("Skipping {} balance event with unreadable amount", event.event_type());
            continue;
        };

        match family {
            EventFamily::CoinWithdrawn { token_type } => match event.data_str("sender") {
                Some(account) => ledger.debit(account, &token_type, amount),
                None => debug!("Withdrawal event without sender: {}", event.event_type()),
            },
            EventFamily::CoinDeposited { token_type } => match event.data_str("receiver") {
                Some(account) => ledger.credit(account, &token_type, amount),
                None => debug!("Deposit event without receiver: {}", event.event_type()),
            },
            EventFamily::FungibleAsset { token_type } => {
                if let Some(from) = event.data_str("from") {
                    ledger.debit(from, token_type, amount);
                }
                if let Some(receiver) = event.data_str("receiver") {
                    ledger.credit(receiver, token_type, amount);
                }
            }
            EventFamily::Other => {}
        }
    }

    ledger
        .flows
        .into_iter()
        .filter_map(|(account, flow)| {
            if flow.credits == flow.debits {
                return None;
            }

            let change = (flow.credits as f64 - flow.debits as f64) / scale;

            let usd = lookup::usd_value(&flow.token_type, change.abs());
            Some(BalanceChange {
                account,
                pre_balance: flow.debits as f64 / scale,
                post_balance: flow.credits as f64 / scale,
                change,
                change_type: if change > 0.0 {
                    BalanceDirection::Increase
                } else {
                    BalanceDirection::Decrease
                },
                usd_value: lookup::format_usd(usd),
                token_type: flow.token_type,
            })
        })
        .collect()
}
