use tracing::warn;

use super::events::{EventFamily, classify_event};
use crate::lookup::{self, TokenInfo};
use crate::models::TokenTransfer;
use crate::raw_transaction::RawEvent;

const UNKNOWN_PARTY: &str = "unknown";

/// One transfer record per coin or fungible-asset event.
///
/// Events whose `amount` is missing or not numeric are left out.
pub fn extract_token_transfers(events: &[RawEvent]) -> Vec<TokenTransfer> {
    events.iter().filter_map(token_transfer).collect()
}

fn token_transfer(event: &RawEvent) -> Option<TokenTransfer> {
    let (token_type, from_key) = match classify_event(event.event_type()) {
        EventFamily::CoinWithdrawn { token_type } | EventFamily::CoinDeposited { token_type } => {
            (token_type, "sender")
        }
        EventFamily::FungibleAsset { token_type } => (token_type.to_string(), "from"),
        EventFamily::Other => return None,
    };

    let Some(raw_amount) = event.amount() else {
        warn!("Skipping {} transfer with unreadable amount", event.event_type());
        return None;
    };

    let info: TokenInfo = lookup::token_info(&token_type);

    Some(TokenTransfer {
        from: event.data_str(from_key).unwrap_or(UNKNOWN_PARTY).to_string(),
        to: event.data_str("receiver").unwrap_or(UNKNOWN_PARTY).to_string(),
        amount: raw_amount as f64 / 10f64.powi(info.decimals as i32),
        token_type,
        token_name: Some(info.name.to_string()),
        token_symbol: Some(info.symbol.to_string()),
        decimals: info.decimals,
        description: format!("{} transfer", info.symbol),
    })
}
