use num_bigint::BigInt;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::serde_utils::{deserialize_big_integer, deserialize_integer};

/// Account record as returned by `get_accounts`. Fields the viewer does not
/// interpret are kept in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSnapshot {
    pub name: String,
    pub created: String,
    #[serde(default, deserialize_with = "deserialize_integer")]
    pub voting_power: i64,
    #[serde(default)]
    pub last_vote_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_big_integer")]
    pub reputation: BigInt,
    pub vesting_shares: String,
    #[serde(default)]
    pub json_metadata: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DynamicGlobalProperties {
    pub total_vesting_fund_steem: String,
    pub total_vesting_shares: String,
}

/// Display-ready account data.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountInfo {
    pub name: String,
    pub created: String,
    pub voting_power: String,
    pub reputation: String,
    pub sp: String,
    pub avatar_url: String,
    /// Every account field, sorted by key, with the derived values applied.
    pub fields: Vec<(String, String)>,
}
