use crate::config::Config;
use crate::error::{Result, ViewerError};
use crate::models::{AccountSnapshot, Comment, DynamicGlobalProperties, RawOperation, Vote};
use crate::services::node_rpc::{create_node_connections, NodeConnections};
use async_trait::async_trait;
use log::{info, warn};
use serde_json::{json, Map, Value};

/// Read-only queries the viewer needs from a blockchain node.
#[async_trait]
pub trait BlockchainNode: Send + Sync {
    async fn get_account(&self, username: &str) -> Result<AccountSnapshot>;

    async fn get_dynamic_global_properties(&self) -> Result<DynamicGlobalProperties>;

    /// Number of entries in the account history.
    async fn get_operation_count(&self, account: &str) -> Result<u64>;

    /// History entries with indices `oldest..=newest`, newest first.
    async fn get_operations_window(
        &self,
        account: &str,
        newest: u64,
        oldest: u64,
    ) -> Result<Vec<RawOperation>>;

    async fn get_comment(&self, author: &str, permlink: &str) -> Result<Comment>;
}

pub struct GolosNode {
    rpc: NodeConnections,
}

impl GolosNode {
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self {
            rpc: create_node_connections(config)?,
        })
    }

    async fn get_account_history(
        &self,
        account: &str,
        from: i64,
        limit: u64,
    ) -> Result<Vec<RawOperation>> {
        let history = self
            .rpc
            .query_rpc("account_history", "get_account_history", json!([account, from, limit]))
            .await?;
        Ok(parse_history(history))
    }
}

#[async_trait]
impl BlockchainNode for GolosNode {
    async fn get_account(&self, username: &str) -> Result<AccountSnapshot> {
        let accounts = self
            .rpc
            .query_rpc("database_api", "get_accounts", json!([[username]]))
            .await?;
        let account = serde_json::from_value::<Vec<Value>>(accounts)?
            .into_iter()
            .next()
            .ok_or_else(|| ViewerError::AccountNotFound(username.to_string()))?;
        Ok(serde_json::from_value(account)?)
    }

    async fn get_dynamic_global_properties(&self) -> Result<DynamicGlobalProperties> {
        let props = self
            .rpc
            .query_rpc("database_api", "get_dynamic_global_properties", json!([]))
            .await?;
        Ok(serde_json::from_value(props)?)
    }

    async fn get_operation_count(&self, account: &str) -> Result<u64> {
        let latest = self.get_account_history(account, -1, 0).await?;
        let count = latest.iter().map(|op| op.index + 1).max().unwrap_or(0);
        info!("Account {} has {} history entries", account, count);
        Ok(count)
    }

    async fn get_operations_window(
        &self,
        account: &str,
        newest: u64,
        oldest: u64,
    ) -> Result<Vec<RawOperation>> {
        info!(
            "Fetching history of {} from index {} down to {}",
            account, newest, oldest
        );
        let from = i64::try_from(newest).map_err(|_| ViewerError::InvalidPage)?;
        let history = self
            .get_account_history(account, from, newest.saturating_sub(oldest))
            .await?;
        Ok(select_window(history, newest, oldest))
    }

    async fn get_comment(&self, author: &str, permlink: &str) -> Result<Comment> {
        let content = self
            .rpc
            .query_rpc("social_network", "get_content", json!([author, permlink]))
            .await?;
        let found = content
            .get("author")
            .and_then(Value::as_str)
            .map_or(false, |a| !a.is_empty());
        if !found {
            return Err(ViewerError::CommentNotFound(format!("@{}/{}", author, permlink)));
        }

        let mut comment: Comment = serde_json::from_value(content)?;
        if comment.active_votes.is_empty() {
            let votes = self
                .rpc
                .query_rpc("social_network", "get_active_votes", json!([author, permlink]))
                .await?;
            comment.active_votes = serde_json::from_value::<Vec<Vote>>(votes)?;
        }
        Ok(comment)
    }
}

/// Keeps `oldest..=newest` and orders the result newest first.
pub fn select_window(mut history: Vec<RawOperation>, newest: u64, oldest: u64) -> Vec<RawOperation> {
    history.retain(|op| op.index >= oldest && op.index <= newest);
    history.sort_by(|a, b| b.index.cmp(&a.index));
    history
}

/// Entries that do not have the `[index, {..., op}]` shape are skipped.
pub fn parse_history(history: Value) -> Vec<RawOperation> {
    let entries = match history {
        Value::Array(entries) => entries,
        other => {
            warn!("Account history is not a list: {}", other);
            return Vec::new();
        }
    };
    entries
        .iter()
        .filter_map(|entry| {
            let parsed = parse_history_entry(entry);
            if parsed.is_none() {
                warn!("Skipping malformed history entry: {}", entry);
            }
            parsed
        })
        .collect()
}

/// Flattens `[index, {block, trx_id, timestamp, op}]` into a
/// [`RawOperation`]. `op` is either `[type, body]` or
/// `{"type": "<type>_operation", "value": body}`; body fields take
/// precedence over transaction metadata.
pub fn parse_history_entry(entry: &Value) -> Option<RawOperation> {
    let [index, meta] = entry.as_array()?.as_slice() else {
        return None;
    };
    let index = index.as_u64()?;
    let meta = meta.as_object()?;

    let (op_type, body) = match meta.get("op")? {
        Value::Array(pair) => match pair.as_slice() {
            [Value::String(op_type), Value::Object(body)] => (op_type.clone(), body.clone()),
            _ => return None,
        },
        Value::Object(op) => {
            let op_type = op.get("type")?.as_str()?;
            let op_type = op_type.strip_suffix("_operation").unwrap_or(op_type);
            (op_type.to_string(), op.get("value")?.as_object()?.clone())
        }
        _ => return None,
    };

    let mut fields: Map<String, Value> = meta
        .iter()
        .filter(|(key, _)| key.as_str() != "op")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    fields.extend(body);

    Some(RawOperation {
        index,
        block: meta.get("block").and_then(Value::as_u64).unwrap_or(0),
        timestamp: meta
            .get("timestamp")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        op_type,
        fields,
    })
}
