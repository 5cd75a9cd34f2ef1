use num_bigint::BigInt;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::serde_utils::{deserialize_big_integer, deserialize_integer};

#[derive(Debug, Clone, Deserialize)]
pub struct Vote {
    pub voter: String,
    pub time: String,
    #[serde(default, deserialize_with = "deserialize_integer")]
    pub percent: i64,
    #[serde(default, deserialize_with = "deserialize_big_integer")]
    pub rshares: BigInt,
    #[serde(default, deserialize_with = "deserialize_big_integer")]
    pub weight: BigInt,
    #[serde(default, deserialize_with = "deserialize_big_integer")]
    pub reputation: BigInt,
}

/// Post or reply as returned by `get_content`.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub author: String,
    pub permlink: String,
    pub created: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_big_integer")]
    pub author_reputation: BigInt,
    #[serde(default, deserialize_with = "deserialize_big_integer")]
    pub total_vote_weight: BigInt,
    pub pending_payout_value: String,
    pub total_payout_value: String,
    pub curator_payout_value: String,
    #[serde(default)]
    pub active_votes: Vec<Vote>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoteInfo {
    pub time: String,
    pub voter: String,
    pub percent: String,
    pub rshares: String,
    pub weight: String,
    pub reputation: String,
}

impl VoteInfo {
    pub const COLUMNS: [&'static str; 6] =
        ["time", "voter", "percent", "rshares", "weight", "reputation"];

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.time.clone(),
            self.voter.clone(),
            self.percent.clone(),
            self.rshares.clone(),
            self.weight.clone(),
            self.reputation.clone(),
        ]
    }
}

/// Display-ready comment data.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentInfo {
    pub author: String,
    pub permlink: String,
    pub title: String,
    pub body: String,
    pub created: String,
    pub author_reputation: String,
    pub payout: String,
    /// Sorted by raw vote time, oldest first.
    pub votes: Vec<VoteInfo>,
    /// Every comment field, sorted by key, with the derived values applied.
    pub fields: Map<String, Value>,
}
