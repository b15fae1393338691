//! Static annotation tables: protocol names, token metadata and mock unit prices.
//!
//! The tables are read-only and built once on first use.

use std::collections::HashMap;
use std::sync::LazyLock;

pub const APTOS_COIN: &str = "0x1::aptos_coin::AptosCoin";
pub const UNKNOWN_PROTOCOL: &str = "Unknown Protocol";

/// Precision of the native coin (1 APT = 10^8 octas)
pub const NATIVE_DECIMALS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

pub const UNKNOWN_TOKEN: TokenInfo = TokenInfo {
    name: "Unknown Token",
    symbol: "UNK",
    decimals: NATIVE_DECIMALS,
};

const LIQUIDSWAP: &str = "0x190d44266241744264b964a37b8f09863167a12d3e70cda39376cfb4e3561e12";
const ARIES_MARKETS: &str = "0x48271d39d0b05bd6efca2278f22277d6fcc375504f9839fd73f74ace240861af";
const PANCAKESWAP: &str = "0x881ac202b1f1e6ad4efcff7a1d0579411533f2502417a19211cfc49751ddb5f4";
const RKGEN_PROTOCOL: &str = "0xebebfeea655b30ae5d63e932dda7755b53dad71a32bbe7a8ec616a907f491611";

const USDC: &str = "0x5e156f1207d0ebfa19a9eeff00d62a282278fb8719f4fab3a586a0a2c0fffbea::coin::T";
const USDT: &str = "0x6f986d146e4a90b828d8c12c14b6f4e003fdff11a8eec6ce2c7e0b3a6add9f96::coin::T";
const CAKE: &str = "0x881ac202b1f1e6ad4efcff7a1d0579411533f2502417a19211cfc49751ddb5f4::pancake_coin::PancakeCoin";
const LIQUIDSWAP_LP: &str =
    "0x190d44266241744264b964a37b8f09863167a12d3e70cda39376cfb4e3561e12::liquidity_pool::LiquidityPool";

/// Token type used for the rKGEN fungible asset, which has no on-chain coin type
pub const RKGEN_TOKEN: &str = "rKGEN Token";

// Event-type fragments identifying custom fungible assets
const CUSTOM_TOKEN_MARKERS: &[(&str, &str)] = &[("rKGEN::Transfer", RKGEN_TOKEN)];

static PROTOCOLS: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut protocols = HashMap::new();
    protocols.insert("0x1::coin".to_string(), "Aptos Coin");
    protocols.insert(LIQUIDSWAP.to_string(), "Liquidswap");
    protocols.insert(format!("{LIQUIDSWAP}::liquidity_pool"), "Liquidswap Pool");
    protocols.insert(ARIES_MARKETS.to_string(), "Aries Markets");
    protocols.insert(PANCAKESWAP.to_string(), "PancakeSwap");
    protocols.insert("0x1::aptos_account".to_string(), "Aptos Account");
    protocols.insert("0x1::aptos_coin".to_string(), "Aptos Coin");
    protocols.insert("0x3::token".to_string(), "Aptos Token");
    protocols.insert("0x4::collection".to_string(), "Aptos Collection");
    protocols.insert("0x1::delegation_pool".to_string(), "Delegation Pool");
    protocols.insert("0x1::stake".to_string(), "Stake");
    protocols.insert("rKGEN".to_string(), "rKGEN Token");
    protocols.insert(RKGEN_PROTOCOL.to_string(), "rKGEN Protocol");
    protocols
});

static TOKENS: LazyLock<HashMap<&'static str, TokenInfo>> = LazyLock::new(|| {
    HashMap::from([
        (APTOS_COIN, TokenInfo { name: "Aptos", symbol: "APT", decimals: 8 }),
        (USDC, TokenInfo { name: "USD Coin", symbol: "USDC", decimals: 6 }),
        (USDT, TokenInfo { name: "Tether USD", symbol: "USDT", decimals: 6 }),
        (CAKE, TokenInfo { name: "PancakeSwap Token", symbol: "CAKE", decimals: 8 }),
        (LIQUIDSWAP_LP, TokenInfo { name: "Liquidswap LP", symbol: "LP", decimals: 8 }),
        (RKGEN_TOKEN, TokenInfo { name: "rKGEN Token", symbol: "rKGEN", decimals: 8 }),
    ])
});

// Mock USD prices, there is no price feed behind these
static PRICES: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    HashMap::from([
        (APTOS_COIN, 15.00),
        (USDC, 1.00),
        (USDT, 1.00),
        (CAKE, 2.50),
        (RKGEN_TOKEN, 0.05),
    ])
});

/// Display name of the protocol behind `address::module` (or a bare address).
///
/// The full key is tried first, then the address alone. The address fallback is a
/// deliberate difference from an exact-key lookup: `0x190d…::scripts_v2` reads as
/// Liquidswap rather than Unknown Protocol.
pub fn protocol_name(module: &str) -> &'static str {
    if let Some(name) = PROTOCOLS.get(module) {
        return *name;
    }

    module
        .split("::")
        .next()
        .and_then(|address| PROTOCOLS.get(address))
        .copied()
        .unwrap_or(UNKNOWN_PROTOCOL)
}

pub fn token_info(token_type: &str) -> TokenInfo {
    TOKENS.get(token_type).copied().unwrap_or(UNKNOWN_TOKEN)
}

pub fn unit_price(token_type: &str) -> f64 {
    PRICES.get(token_type).copied().unwrap_or(0.0)
}

/// Token type of a fungible-asset event, native APT unless a custom marker matches.
pub fn fungible_asset_token(event_type: &str) -> &'static str {
    CUSTOM_TOKEN_MARKERS
        .iter()
        .find(|(marker, _)| event_type.contains(marker))
        .map(|(_, token)| *token)
        .unwrap_or(APTOS_COIN)
}

pub fn usd_value(token_type: &str, amount: f64) -> f64 {
    amount * unit_price(token_type)
}

/// Format a USD amount for display.
///
/// `< $0.01` below one cent, three decimals below $1, two below $1000,
/// thousands with a `K` suffix above that.
pub fn format_usd(value: f64) -> String {
    if value < 0.01 {
        "< $0.01".to_string()
    } else if value < 1.0 {
        format!("${:.3}", value)
    } else if value < 1000.0 {
        format!("${:.2}", value)
    } else {
        format!("${:.2}K", value / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_lookup() {
        assert_eq!(protocol_name("0x1::aptos_account"), "Aptos Account");
        assert_eq!(
            protocol_name(&format!("{LIQUIDSWAP}::liquidity_pool")),
            "Liquidswap Pool"
        );
        // Falls back to the address
        assert_eq!(protocol_name(&format!("{LIQUIDSWAP}::scripts_v2")), "Liquidswap");
        assert_eq!(protocol_name("0xdead::beef"), UNKNOWN_PROTOCOL);
    }

    #[test]
    fn test_unknown_token_fallback() {
        let info = token_info("0xdead::fake::Coin");
        assert_eq!(info.name, "Unknown Token");
        assert_eq!(info.symbol, "UNK");
        assert_eq!(info.decimals, 8);
        assert_eq!(unit_price("0xdead::fake::Coin"), 0.0);
    }

    #[test]
    fn test_known_tokens() {
        assert_eq!(token_info(APTOS_COIN).symbol, "APT");
        assert_eq!(token_info(USDC).decimals, 6);
        assert_eq!(unit_price(APTOS_COIN), 15.0);
    }

    #[test]
    fn test_fungible_asset_token() {
        assert_eq!(fungible_asset_token("0x1::fungible_asset::Deposit"), APTOS_COIN);
        assert_eq!(
            fungible_asset_token(&format!("{RKGEN_PROTOCOL}::rKGEN::Transfer")),
            RKGEN_TOKEN
        );
    }

    #[test]
    fn test_usd_formatting_tiers() {
        assert_eq!(format_usd(0.004), "< $0.01");
        assert_eq!(format_usd(0.5), "$0.500");
        assert_eq!(format_usd(50.0), "$50.00");
        assert_eq!(format_usd(5000.0), "$5.00K");
        assert_eq!(format_usd(0.0), "< $0.01");
    }
}
