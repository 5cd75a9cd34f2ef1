use serde::Deserialize;
use serde_json::{Map, Value};

use super::serde_utils::deserialize_integer;

/// Bookkeeping keys that never carry user-relevant information.
pub const INTERNAL_FIELDS: &[&str] = &[
    "block",
    "op_in_trx",
    "required_auths",
    "trx",
    "trx_id",
    "required_posting_auths",
    "index",
    "virtual_op",
    "trx_in_block",
    "_id",
    "owner",
    "active",
    "posting",
    "memo_key",
    "timestamp",
];

/// One account history entry, flattened: transaction metadata and the
/// operation body share a single field map, next to the type tag.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOperation {
    pub index: u64,
    pub block: u64,
    pub timestamp: String,
    pub op_type: String,
    pub fields: Map<String, Value>,
}

impl RawOperation {
    /// Field map minus [`INTERNAL_FIELDS`], with the type tag included.
    pub fn visible_fields(&self) -> Map<String, Value> {
        let mut visible: Map<String, Value> = self
            .fields
            .iter()
            .filter(|(key, _)| !INTERNAL_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        visible.insert("type".to_string(), Value::String(self.op_type.clone()));
        visible
    }

    fn body<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn missing(field: &'static str) -> serde_json::Error {
        serde::de::Error::missing_field(field)
    }
}

/// Author/permlink pair. Reward operations name it `comment_author` /
/// `comment_permlink`; that pair wins when both spellings are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermlinkRef {
    pub author: String,
    pub permlink: String,
}

impl PermlinkRef {
    pub fn new(author: &str, permlink: &str) -> Self {
        Self {
            author: author.to_string(),
            permlink: permlink.to_string(),
        }
    }

    pub fn from_fields(fields: &Map<String, Value>) -> Option<Self> {
        let pair = |author: &str, permlink: &str| {
            match (
                fields.get(author).and_then(Value::as_str),
                fields.get(permlink).and_then(Value::as_str),
            ) {
                (Some(a), Some(p)) => Some(Self::new(a, p)),
                _ => None,
            }
        };
        pair("comment_author", "comment_permlink").or_else(|| pair("author", "permlink"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteOp {
    pub voter: String,
    pub author: String,
    pub permlink: String,
    #[serde(deserialize_with = "deserialize_integer")]
    pub weight: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferToVestingOp {
    pub from: String,
    pub to: String,
    pub amount: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferOp {
    pub from: String,
    pub to: String,
    pub amount: Value,
    pub memo: String,
}

/// Reward fields in display order.
pub const REWARD_FIELDS: &[&str] = &["reward", "steem_payout", "sbd_payout", "vesting_payout"];

#[derive(Debug, Clone)]
pub struct RewardOp {
    pub rewards: Vec<Value>,
    pub target: PermlinkRef,
}

#[derive(Debug, Clone)]
pub struct BenefactorRewardOp {
    pub benefactor: String,
    pub reward: RewardOp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountCreateOp {
    pub creator: String,
    pub new_account_name: String,
    pub fee: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountWitnessVoteOp {
    pub account: String,
    pub witness: String,
    pub approve: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FillVestingWithdrawOp {
    pub from_account: String,
    pub to_account: String,
    pub withdrawn: Value,
    pub deposited: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentOp {
    #[serde(default)]
    pub parent_author: String,
    #[serde(default)]
    pub parent_permlink: String,
    pub author: String,
    pub permlink: String,
}

impl CommentOp {
    pub fn is_reply(&self) -> bool {
        !self.parent_author.is_empty()
    }
}

pub const COMMENT_OPTION_KEYS: &[&str] = &[
    "max_accepted_payout",
    "allow_curation_rewards",
    "allow_votes",
    "percent_steem_dollars",
];

#[derive(Debug, Clone)]
pub struct CommentOptionsOp {
    pub target: PermlinkRef,
    pub options: Vec<(String, Value)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CustomJsonAction {
    Follow { follower: String, following: String },
    Unfollow { follower: String, following: String },
    Reblog { account: String, target: PermlinkRef },
    Unrecognized,
}

impl CustomJsonAction {
    /// Reads the `[name, payload]` pair carried in a `custom_json` operation.
    /// Payloads that are not valid JSON, or have another shape, are
    /// `Unrecognized`.
    pub fn parse(json: &Value) -> Self {
        let parsed = match json {
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(value) => value,
                Err(_) => return Self::Unrecognized,
            },
            other => other.clone(),
        };

        let (name, payload) = match parsed.as_array().map(Vec::as_slice) {
            Some([Value::String(name), Value::Object(payload)]) => (name.as_str(), payload),
            _ => return Self::Unrecognized,
        };
        let text = |key: &str| payload.get(key).and_then(Value::as_str).map(str::to_string);

        match name {
            "follow" => {
                let what: Vec<&str> = payload
                    .get("what")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().filter_map(Value::as_str).collect())
                    .unwrap_or_default();
                match (text("follower"), text("following")) {
                    (Some(follower), Some(following)) if what.contains(&"") => {
                        Self::Unfollow { follower, following }
                    }
                    (Some(follower), Some(following)) if what.contains(&"blog") => {
                        Self::Follow { follower, following }
                    }
                    _ => Self::Unrecognized,
                }
            }
            "reblog" => match (text("account"), text("author"), text("permlink")) {
                (Some(account), Some(author), Some(permlink)) => Self::Reblog {
                    account,
                    target: PermlinkRef { author, permlink },
                },
                _ => Self::Unrecognized,
            },
            _ => Self::Unrecognized,
        }
    }
}

/// Closed set of operation types with a dedicated description. Everything
/// else is `Other` and shown as a raw dump.
#[derive(Debug, Clone)]
pub enum Operation {
    Vote(VoteOp),
    TransferToVesting(TransferToVestingOp),
    Transfer(TransferOp),
    CurationReward(RewardOp),
    AuthorReward(RewardOp),
    CommentBenefactorReward(BenefactorRewardOp),
    AccountCreate(AccountCreateOp),
    AccountWitnessVote(AccountWitnessVoteOp),
    FillVestingWithdraw(FillVestingWithdrawOp),
    Comment(CommentOp),
    CommentOptions(CommentOptionsOp),
    CustomJson(CustomJsonAction),
    Other,
}

impl Operation {
    /// Builds the typed record for `raw`. Fails only when a field that the
    /// matched type requires is missing or has the wrong shape.
    pub fn parse(raw: &RawOperation) -> Result<Self, serde_json::Error> {
        let op = match raw.op_type.as_str() {
            "vote" => Self::Vote(raw.body()?),
            "transfer_to_vesting" => Self::TransferToVesting(raw.body()?),
            "transfer" => Self::Transfer(raw.body()?),
            "curation_reward" => Self::CurationReward(Self::reward(raw)?),
            "author_reward" => Self::AuthorReward(Self::reward(raw)?),
            "comment_benefactor_reward" => {
                Self::CommentBenefactorReward(BenefactorRewardOp {
                    benefactor: raw
                        .str_field("benefactor")
                        .ok_or_else(|| RawOperation::missing("benefactor"))?
                        .to_string(),
                    reward: Self::reward(raw)?,
                })
            }
            "account_create" => Self::AccountCreate(raw.body()?),
            "account_witness_vote" => Self::AccountWitnessVote(raw.body()?),
            "fill_vesting_withdraw" => Self::FillVestingWithdraw(raw.body()?),
            "comment" => Self::Comment(raw.body()?),
            "comment_options" => Self::CommentOptions(CommentOptionsOp {
                target: Self::target(raw)?,
                options: COMMENT_OPTION_KEYS
                    .iter()
                    .filter_map(|key| raw.fields.get(*key).map(|v| (key.to_string(), v.clone())))
                    .collect(),
            }),
            "custom_json" => Self::CustomJson(CustomJsonAction::parse(
                raw.fields
                    .get("json")
                    .ok_or_else(|| RawOperation::missing("json"))?,
            )),
            _ => Self::Other,
        };
        Ok(op)
    }

    fn target(raw: &RawOperation) -> Result<PermlinkRef, serde_json::Error> {
        PermlinkRef::from_fields(&raw.fields).ok_or_else(|| RawOperation::missing("permlink"))
    }

    fn reward(raw: &RawOperation) -> Result<RewardOp, serde_json::Error> {
        Ok(RewardOp {
            rewards: REWARD_FIELDS
                .iter()
                .filter_map(|key| raw.fields.get(*key).cloned())
                .collect(),
            target: Self::target(raw)?,
        })
    }
}
