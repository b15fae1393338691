use crate::lookup;
use crate::models::{BalanceChange, BalanceDirection, FunctionCall, TokenTransfer, TransactionType};

const SWAP_NOTE: &str = "💡 Token swaps on Aptos are executed through decentralized exchanges like Liquidswap or PancakeSwap. These platforms use automated market makers (AMMs) to provide liquidity and determine exchange rates with Move's parallel execution for faster processing.";
const TRANSFER_NOTE: &str = "💡 Aptos transfers are extremely fast and efficient, leveraging Move's resource-oriented programming model. The parallel execution engine allows multiple transfers to be processed simultaneously, reducing congestion and fees.";
const STAKE_NOTE: &str = "💡 Staking on Aptos helps secure the network while earning rewards. The Move language ensures type safety and prevents common staking vulnerabilities. Validators process transactions and maintain the blockchain.";
const NFT_NOTE: &str = "💡 NFTs on Aptos use the Aptos Token standard, which is more flexible and efficient than traditional NFT standards. Move's resource model ensures NFTs are treated as first-class citizens with strong ownership guarantees.";
const DEFI_NOTE: &str = "💡 Aptos DeFi protocols like Aries Markets and Liquidswap leverage Move's safety features and parallel execution. The resource-oriented model prevents common DeFi exploits like reentrancy attacks.";

const PORTFOLIO_UP: &str = "💰 Your portfolio value increased from this transaction. This could be from trading profits, staking rewards, or receiving tokens.";
const PORTFOLIO_DOWN: &str = "📉 Your portfolio value decreased from this transaction. This is normal for trades, fees, or when sending tokens to others.";
const NATIVE_COIN_NOTE: &str = "⚡ Aptos uses the Move language for smart contracts, which provides better security through formal verification and prevents common blockchain vulnerabilities like reentrancy attacks.";
const TRANSFER_MECHANICS_NOTE: &str = "🔄 Token transfers on Aptos use the Aptos Coin standard, which is built on Move's resource model. This ensures type safety and prevents common token-related bugs.";
const CLOSING_NOTE: &str = "🚀 Aptos's Move language and parallel execution engine enable high throughput (up to 100,000 TPS) while maintaining security. The resource-oriented programming model ensures assets are handled safely.";

#[derive(Debug, Clone, PartialEq)]
pub struct Narrative {
    pub summary: String,
    pub educational_content: Vec<String>,
}

pub fn synthesize(
    transaction_type: TransactionType,
    calls: &[FunctionCall],
    transfers: &[TokenTransfer],
    balances: &[BalanceChange],
) -> Narrative {
    Narrative {
        summary: summary(transaction_type, calls, transfers),
        educational_content: educational_content(transaction_type, calls, transfers, balances),
    }
}

// One-line summary of what happened
fn summary(transaction_type: TransactionType, calls: &[FunctionCall], transfers: &[TokenTransfer]) -> String {
    match transaction_type {
        TransactionType::Swap => format!(
            "Token swap transaction involving {} token transfers",
            transfers.len()
        ),
        TransactionType::Transfer => format!(
            "Token transfer transaction moving {} different tokens",
            transfers.len()
        ),
        TransactionType::Stake => "Staking transaction delegating tokens to validators".to_string(),
        TransactionType::Nft => "NFT transaction involving token minting or transfer".to_string(),
        TransactionType::Defi => {
            "DeFi transaction involving liquidity or lending operations".to_string()
        }
        _ => format!("Aptos transaction with {} function calls", calls.len()),
    }
}

fn type_note(transaction_type: TransactionType) -> Option<&'static str> {
    match transaction_type {
        TransactionType::Swap => Some(SWAP_NOTE),
        TransactionType::Transfer => Some(TRANSFER_NOTE),
        TransactionType::Stake => Some(STAKE_NOTE),
        TransactionType::Nft => Some(NFT_NOTE),
        TransactionType::Defi => Some(DEFI_NOTE),
        _ => None,
    }
}

// Signed USD total across all balance changes
fn net_usd(balances: &[BalanceChange]) -> f64 {
    balances
        .iter()
        .map(|b| {
            let usd = lookup::usd_value(&b.token_type, b.change.abs());
            match b.change_type {
                BalanceDirection::Increase => usd,
                BalanceDirection::Decrease => -usd,
            }
        })
        .sum()
}

/// Advisory notes in display order: type note, portfolio direction, native-coin
/// note, transfer mechanics, then the closing note.
fn educational_content(
    transaction_type: TransactionType,
    calls: &[FunctionCall],
    transfers: &[TokenTransfer],
    balances: &[BalanceChange],
) -> Vec<String> {
    let mut content = Vec::new();

    if let Some(note) = type_note(transaction_type) {
        content.push(note);
    }

    let total = net_usd(balances);
    if total > 0.0 {
        content.push(PORTFOLIO_UP);
    } else if total < 0.0 {
        content.push(PORTFOLIO_DOWN);
    }

    if calls.iter().any(|call| call.module.contains("aptos_coin")) {
        content.push(NATIVE_COIN_NOTE);
    }

    if !transfers.is_empty() {
        content.push(TRANSFER_MECHANICS_NOTE);
    }

    content.push(CLOSING_NOTE);

    content.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn call(module: &str, function: &str) -> FunctionCall {
        FunctionCall {
            module: module.to_string(),
            function: function.to_string(),
            arguments: vec![],
            type_arguments: vec![],
            description: String::new(),
            protocol: None,
        }
    }

    fn transfer() -> TokenTransfer {
        TokenTransfer {
            from: "0xa11ce".to_string(),
            to: "0xb0b".to_string(),
            amount: 1.0,
            token_type: lookup::APTOS_COIN.to_string(),
            token_name: None,
            token_symbol: None,
            decimals: 8,
            description: "APT transfer".to_string(),
        }
    }

    fn balance(account: &str, change: f64, token_type: &str) -> BalanceChange {
        BalanceChange {
            account: account.to_string(),
            pre_balance: 0.0,
            post_balance: 0.0,
            change,
            change_type: if change > 0.0 {
                BalanceDirection::Increase
            } else {
                BalanceDirection::Decrease
            },
            usd_value: String::new(),
            token_type: token_type.to_string(),
        }
    }

    #[test]
    fn test_summaries() {
        let transfers = vec![transfer(), transfer()];
        assert_eq!(
            summary(TransactionType::Swap, &[], &transfers),
            "Token swap transaction involving 2 token transfers"
        );
        assert_eq!(
            summary(TransactionType::Transfer, &[], &transfers),
            "Token transfer transaction moving 2 different tokens"
        );
        assert_eq!(
            summary(TransactionType::Unknown, &[call("0x1::code", "publish")], &[]),
            "Aptos transaction with 1 function calls"
        );
        // Reserved categories read like unknown ones
        assert_eq!(
            summary(TransactionType::Governance, &[], &[]),
            "Aptos transaction with 0 function calls"
        );
    }

    #[test]
    fn test_full_note_order() {
        let calls = vec![call("0x1::aptos_coin", "transfer")];
        let balances = vec![balance("0xb0b", 2.0, lookup::APTOS_COIN)];

        let narrative = synthesize(TransactionType::Transfer, &calls, &[transfer()], &balances);
        assert_eq!(
            narrative.educational_content,
            vec![
                TRANSFER_NOTE,
                PORTFOLIO_UP,
                NATIVE_COIN_NOTE,
                TRANSFER_MECHANICS_NOTE,
                CLOSING_NOTE
            ]
        );
    }

    #[test]
    fn test_portfolio_direction() {
        let down = vec![
            balance("0xa11ce", -2.0, lookup::APTOS_COIN),
            balance("0xb0b", 1.0, lookup::APTOS_COIN),
        ];
        let content = educational_content(TransactionType::Unknown, &[], &[], &down);
        assert_eq!(content, vec![PORTFOLIO_DOWN, CLOSING_NOTE]);

        // Unpriced tokens sum to zero, no direction note
        let unpriced = vec![balance("0xb0b", 5.0, "0xdead::fake::Coin")];
        let content = educational_content(TransactionType::Unknown, &[], &[], &unpriced);
        assert_eq!(content, vec![CLOSING_NOTE]);
    }

    #[test]
    fn test_closing_note_always_last() {
        let content = educational_content(TransactionType::Stake, &[], &[], &[]);
        assert_eq!(content.last().map(String::as_str), Some(CLOSING_NOTE));
        assert_eq!(content.len(), 2);
    }
}
