use crate::lookup;

/// Event families the interpreter understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFamily {
    /// Legacy `0x1::coin` withdrawal, debits `data.sender`
    CoinWithdrawn { token_type: String },
    /// Legacy `0x1::coin` deposit, credits `data.receiver`
    CoinDeposited { token_type: String },
    /// Fungible-asset transfer/deposit, debits `data.from` and credits `data.receiver`
    FungibleAsset { token_type: &'static str },
    Other,
}

pub fn classify_event(event_type: &str) -> EventFamily {
    if event_type.contains("::coin::CoinWithdrawn") {
        EventFamily::CoinWithdrawn {
            token_type: legacy_token_type(event_type),
        }
    } else if event_type.contains("::coin::CoinDeposited") {
        EventFamily::CoinDeposited {
            token_type: legacy_token_type(event_type),
        }
    } else if event_type.contains("::Transfer") || event_type.contains("::Deposit") {
        EventFamily::FungibleAsset {
            token_type: lookup::fungible_asset_token(event_type),
        }
    } else {
        EventFamily::Other
    }
}

// First three `::` segments of the event type
fn legacy_token_type(event_type: &str) -> String {
    event_type.split("::").take(3).collect::<Vec<_>>().join("::")
}
