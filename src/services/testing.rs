use crate::error::{Result, ViewerError};
use crate::models::{AccountSnapshot, Comment, DynamicGlobalProperties, RawOperation};
use crate::services::blockchain::{select_window, BlockchainNode};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

/// In-memory node that records which queries were made.
#[derive(Default)]
pub struct FakeNode {
    pub account: Option<Value>,
    pub history: Vec<RawOperation>,
    pub comment: Option<Value>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeNode {
    pub fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn with_history(count: u64) -> Self {
        let history = (0..count)
            .map(|index| RawOperation {
                index,
                block: 1000 + index,
                timestamp: "2019-01-01T00:00:00".to_string(),
                op_type: "vote".to_string(),
                fields: json!({
                    "voter": "alice",
                    "author": "bob",
                    "permlink": format!("post-{}", index),
                    "weight": 10000,
                    "trx_id": "00ff"
                })
                .as_object()
                .cloned()
                .unwrap_or_default(),
            })
            .collect();
        Self {
            account: Some(json!({
                "name": "alice",
                "created": "2017-10-01T08:00:00",
                "voting_power": 10000,
                "reputation": 0,
                "vesting_shares": "1000.000000 GESTS",
                "json_metadata": ""
            })),
            history,
            ..Self::default()
        }
    }
}

#[async_trait]
impl BlockchainNode for FakeNode {
    async fn get_account(&self, username: &str) -> Result<AccountSnapshot> {
        self.record(format!("get_account {}", username));
        match &self.account {
            Some(account) => Ok(serde_json::from_value(account.clone())?),
            None => Err(ViewerError::AccountNotFound(username.to_string())),
        }
    }

    async fn get_dynamic_global_properties(&self) -> Result<DynamicGlobalProperties> {
        self.record("get_dynamic_global_properties".to_string());
        Ok(serde_json::from_value(json!({
            "total_vesting_fund_steem": "100.000 GOLOS",
            "total_vesting_shares": "1000.000000 GESTS"
        }))?)
    }

    async fn get_operation_count(&self, account: &str) -> Result<u64> {
        self.record(format!("get_operation_count {}", account));
        Ok(self.history.len() as u64)
    }

    async fn get_operations_window(
        &self,
        account: &str,
        newest: u64,
        oldest: u64,
    ) -> Result<Vec<RawOperation>> {
        self.record(format!("get_operations_window {} {} {}", account, newest, oldest));
        Ok(select_window(self.history.clone(), newest, oldest))
    }

    async fn get_comment(&self, author: &str, permlink: &str) -> Result<Comment> {
        self.record(format!("get_comment {}/{}", author, permlink));
        match &self.comment {
            Some(comment) => Ok(serde_json::from_value(comment.clone())?),
            None => Err(ViewerError::CommentNotFound(format!("@{}/{}", author, permlink))),
        }
    }
}
