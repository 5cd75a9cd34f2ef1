use askama::Template;
use chrono::NaiveDateTime;
use log::info;

use super::templates::{OpTemplate, ProfileTemplate};
use crate::config::Config;
use crate::error::{Result, ViewerError};
use crate::formatters::{format_operation, parse_account, FormattedOperation};
use crate::models::{AccountInfo, PageContext};
use crate::services::BlockchainNode;
use crate::utils::helpers::validate_username;

#[derive(Debug, Clone)]
pub struct AccountPage {
    pub account: AccountInfo,
    pub operations: Vec<FormattedOperation>,
    pub page: PageContext,
}

/// Fetches the account and one page of its history, newest first.
/// Username and lower page bound are checked before the node is queried.
pub async fn load_account_page<N: BlockchainNode + ?Sized>(
    node: &N,
    config: &Config,
    raw_username: &str,
    page: i64,
    now: NaiveDateTime,
) -> Result<AccountPage> {
    let username = validate_username(raw_username)?;
    if page < 1 {
        return Err(ViewerError::InvalidPage);
    }

    let account = node.get_account(username).await?;
    let (props, operation_count) = futures::try_join!(
        node.get_dynamic_global_properties(),
        node.get_operation_count(username)
    )?;
    let context = PageContext::new(page as u64, operation_count, config.ops_per_page)?;
    let account = parse_account(&account, &props, config, now)?;

    let (newest, oldest) = context.window();
    let operations: Vec<FormattedOperation> = node
        .get_operations_window(username, newest, oldest)
        .await?
        .iter()
        .map(|op| format_operation(op, Some(username), &config.date_format))
        .collect();
    info!(
        "Rendering {} operations of {} (page {}/{})",
        operations.len(),
        username,
        context.page,
        context.total_pages
    );

    Ok(AccountPage {
        account,
        operations,
        page: context,
    })
}

pub fn render_operations(operations: &[FormattedOperation]) -> Result<String> {
    let mut optable = String::new();
    for op in operations {
        optable += &OpTemplate {
            timestamp: &op.timestamp,
            block: op.block,
            id: op.index,
            opstr: &op.text,
        }
        .render()?;
    }
    Ok(optable)
}

pub fn render_account_page(username: &str, page: Result<AccountPage>) -> Result<String> {
    let template = match page {
        Ok(page) => ProfileTemplate {
            error: String::new(),
            username: page.account.name.clone(),
            optable: render_operations(&page.operations)?,
            page: page.page.page,
            total_pages: page.page.total_pages,
            previous: page.page.previous(),
            next: page.page.next(),
            account: Some(page.account),
        },
        Err(e) => ProfileTemplate {
            error: e.to_string(),
            username: username.to_string(),
            account: None,
            optable: String::new(),
            page: 0,
            total_pages: 0,
            previous: None,
            next: None,
        },
    };
    Ok(template.render()?)
}
