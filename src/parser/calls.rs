use tracing::warn;

use crate::lookup;
use crate::models::{FunctionCall, TransactionType};
use crate::raw_transaction::RawPayload;

/// Describe the entry function named by `payload.function` (`address::module::function`).
///
/// Only single entry-function payloads are modelled, so the result holds at most one
/// call. Script or multi-call payloads would extend this into a loop over their calls.
pub fn extract_function_calls(payload: Option<&RawPayload>) -> Vec<FunctionCall> {
    let Some(payload) = payload else {
        return Vec::new();
    };
    let Some(function_id) = payload.function.as_deref() else {
        return Vec::new();
    };

    let segments: Vec<&str> = function_id.split("::").collect();
    if segments.len() < 3 {
        warn!("Ignoring malformed function identifier {}", function_id);
        return Vec::new();
    }

    let module = format!("{}::{}", segments[0], segments[1]);
    let function = segments[2].to_string();
    let protocol = lookup::protocol_name(&module);

    vec![FunctionCall {
        description: describe_function(&function, protocol),
        protocol: Some(protocol.to_string()),
        module,
        function,
        arguments: payload.arguments.clone(),
        type_arguments: payload.type_arguments.clone(),
    }]
}

fn describe_function(function: &str, protocol: &str) -> String {
    match function {
        "transfer" => format!("Transfer tokens via {}", protocol),
        "swap" => format!("Token swap on {}", protocol),
        "stake" => format!("Stake tokens via {}", protocol),
        "unstake" => format!("Unstake tokens via {}", protocol),
        "mint" => format!("Mint new tokens via {}", protocol),
        "burn" => format!("Burn tokens via {}", protocol),
        "deposit" => format!("Deposit liquidity to {}", protocol),
        "withdraw" => format!("Withdraw liquidity from {}", protocol),
        other => format!("{} operation on {}", other, protocol),
    }
}

/// Pick the transaction category. Rules are checked in order and the first
/// one any call satisfies wins, so `swap_and_transfer` is a swap.
pub fn classify(calls: &[FunctionCall]) -> TransactionType {
    let any = |rule: fn(&FunctionCall) -> bool| calls.iter().any(rule);

    if any(|c| {
        c.function.contains("swap") || c.module.contains("liquidswap") || c.module.contains("pancake")
    }) {
        TransactionType::Swap
    } else if any(|c| c.function.contains("transfer")) {
        TransactionType::Transfer
    } else if any(|c| c.function.contains("stake") || c.function.contains("delegate")) {
        TransactionType::Stake
    } else if any(|c| c.module.contains("token") || c.function.contains("mint")) {
        TransactionType::Nft
    } else if any(|c| {
        c.module.contains("liquidity") || c.function.contains("deposit") || c.function.contains("withdraw")
    }) {
        TransactionType::Defi
    } else {
        TransactionType::Unknown
    }
}
