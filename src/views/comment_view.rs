use askama::Template;
use log::info;
use serde_json::{Map, Value};

use super::templates::{CommentTemplate, RowTemplate, TableHeaderTemplate};
use crate::config::Config;
use crate::error::Result;
use crate::formatters::parse_comment;
use crate::models::serde_utils::display_value;
use crate::models::{CommentInfo, VoteInfo};
use crate::services::BlockchainNode;
use crate::utils::helpers::strip_at;

/// Keys that are shown elsewhere on the page or are not meaningful alone.
const EXCLUDED_COMMENT_KEYS: &[&str] = &[
    "author",
    "permlink",
    "active_votes",
    "url",
    "body_length",
    "body",
    "replies",
    "authorperm",
    "payout",
];

/// Keys rendered as a pretty-printed block.
const CODE_KEYS: &[&str] = &["json_metadata", "beneficiaries"];

#[derive(Debug, Clone, PartialEq)]
pub struct OptionRow {
    pub label: String,
    pub value: String,
    pub code: bool,
}

#[derive(Debug, Clone)]
pub struct CommentPage {
    pub comment: CommentInfo,
    pub comment_options: String,
    pub comment_votes: String,
}

pub async fn load_comment_page<N: BlockchainNode + ?Sized>(
    node: &N,
    config: &Config,
    author: &str,
    permlink: &str,
) -> Result<CommentPage> {
    let author = strip_at(author);
    let comment = node.get_comment(author, permlink).await?;
    let comment = parse_comment(&comment, &config.date_format)?;
    info!(
        "Rendering @{}/{} with {} votes",
        author,
        permlink,
        comment.votes.len()
    );

    Ok(CommentPage {
        comment_options: format_comment_options(&comment.fields)?,
        comment_votes: format_active_votes(&comment.votes)?,
        comment,
    })
}

fn pretty(value: &Value) -> String {
    let parsed = match value {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => parsed,
            Err(_) => return raw.clone(),
        },
        other => other.clone(),
    };
    serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| parsed.to_string())
}

pub fn comment_option_rows(fields: &Map<String, Value>) -> Vec<OptionRow> {
    let mut keys: Vec<&String> = fields.keys().collect();
    keys.sort();

    keys.into_iter()
        .filter(|key| !EXCLUDED_COMMENT_KEYS.contains(&key.as_str()))
        .map(|key| {
            let value = &fields[key.as_str()];
            let code = CODE_KEYS.contains(&key.as_str());
            let value = match value {
                _ if code => pretty(value),
                Value::Array(items) => items
                    .iter()
                    .map(display_value)
                    .collect::<Vec<_>>()
                    .join(", "),
                other => display_value(other),
            };
            OptionRow {
                label: key.clone(),
                value,
                code,
            }
        })
        .collect()
}

pub fn format_comment_options(fields: &Map<String, Value>) -> Result<String> {
    let mut rows = String::new();
    for row in comment_option_rows(fields) {
        rows += &RowTemplate {
            cols: &[row.label, row.value],
            code: row.code,
        }
        .render()?;
    }
    Ok(rows)
}

/// Header plus one row per vote, in the order given.
pub fn format_active_votes(votes: &[VoteInfo]) -> Result<String> {
    let labels: Vec<String> = VoteInfo::COLUMNS.iter().map(|key| capitalize(key)).collect();
    let mut table = TableHeaderTemplate { cols: &labels }.render()?;
    for vote in votes {
        table += &RowTemplate {
            cols: &vote.cells(),
            code: false,
        }
        .render()?;
    }
    Ok(table)
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_comment_page(page: Result<CommentPage>) -> Result<String> {
    let template = match page {
        Ok(page) => CommentTemplate {
            error: String::new(),
            comment: Some(page.comment),
            comment_options: page.comment_options,
            comment_votes: page.comment_votes,
        },
        Err(e) => CommentTemplate {
            error: e.to_string(),
            comment: None,
            comment_options: String::new(),
            comment_votes: String::new(),
        },
    };
    Ok(template.render()?)
}
