use serde::{Deserialize, Serialize};
use serde_json::Value;

// What the user sends (transaction hash)
#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub hash: String,
}

// What is returned to the user
#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<TransactionExplanation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>, //Display error if the explanation could not be produced
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecentResponse {
    pub hashes: Vec<String>,
}

/// Human-readable explanation of one Aptos transaction.
///
/// Built once per fetch by [`crate::parser::parse_aptos_transaction`] and never
/// mutated afterwards. All amounts are already scaled to whole-token units.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionExplanation {
    pub hash: String,
    pub success: bool,
    pub summary: String,
    /// Milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    pub gas_used: u64,
    pub gas_unit_price: u64,
    /// Fee in APT (gas_used * gas_unit_price / 10^8)
    pub gas_fee: f64,
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    pub account_changes: Vec<AccountChange>,
    pub function_calls: Vec<FunctionCall>,
    pub token_transfers: Vec<TokenTransfer>,
    pub transaction_type: TransactionType,
    /// Stringified `vm_status`, present exactly when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub balance_changes: Vec<BalanceChange>,
    pub educational_content: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountChangeKind {
    Created,
    Modified,
    Deleted,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountChange {
    pub account: String,
    pub change_type: AccountChangeKind,
    pub balance: f64, // not computed from the write set, always 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u64>,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCall {
    /// `address::module`
    pub module: String,
    pub function: String,
    pub arguments: Vec<Value>,
    pub type_arguments: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    pub decimals: u8,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BalanceDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    pub account: String,
    pub pre_balance: f64,
    pub post_balance: f64,
    pub change: f64, //Signed, post - pre
    pub change_type: BalanceDirection,
    pub usd_value: String,
    pub token_type: String,
}

/// Category shown to the user. Only the upper-case variants and `Unknown` are
/// produced by the classifier, the rest are reserved.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "SWAP")]
    Swap,
    #[serde(rename = "TRANSFER")]
    Transfer,
    #[serde(rename = "STAKE")]
    Stake,
    #[serde(rename = "NFT")]
    Nft,
    #[serde(rename = "DEFI")]
    Defi,
    #[serde(rename = "unstake")]
    Unstake,
    #[serde(rename = "create_account")]
    CreateAccount,
    #[serde(rename = "close_account")]
    CloseAccount,
    #[serde(rename = "nft_mint")]
    NftMint,
    #[serde(rename = "nft_transfer")]
    NftTransfer,
    #[serde(rename = "program_deploy")]
    ProgramDeploy,
    #[serde(rename = "burn")]
    Burn,
    #[serde(rename = "LIQUIDITY")]
    Liquidity,
    #[serde(rename = "GOVERNANCE")]
    Governance,
    #[serde(rename = "unknown")]
    Unknown,
}
