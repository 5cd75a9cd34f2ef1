use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use super::values::{format_date, format_reputation, parse_node_time};
use crate::config::Config;
use crate::error::Result;
use crate::models::serde_utils::display_value;
use crate::models::{AccountInfo, AccountSnapshot, Amount, DynamicGlobalProperties};

/// Full regeneration of voting power takes five days.
const VOTE_REGENERATION_SECONDS: f64 = 432_000.0;

/// Voting power in percent, including what regenerated since the last vote.
pub fn current_voting_power(account: &AccountSnapshot, now: NaiveDateTime) -> f64 {
    let stored = account.voting_power as f64 / 100.0;
    let regenerated = account
        .last_vote_time
        .as_deref()
        .and_then(|time| parse_node_time(time).ok())
        .map(|last_vote| {
            let elapsed = (now - last_vote).num_seconds().max(0) as f64;
            elapsed * 100.0 / VOTE_REGENERATION_SECONDS
        })
        .unwrap_or(0.0);
    (stored + regenerated).clamp(0.0, 100.0)
}

/// Liquid-currency value of the account's own vesting shares.
pub fn own_stake(account: &AccountSnapshot, props: &DynamicGlobalProperties) -> Result<f64> {
    let vests = Amount::parse(&account.vesting_shares)?.to_f64();
    let fund = Amount::parse(&props.total_vesting_fund_steem)?.to_f64();
    let shares = Amount::parse(&props.total_vesting_shares)?.to_f64();
    if shares == 0.0 {
        return Ok(0.0);
    }
    Ok(vests * fund / shares)
}

pub fn avatar_url(account: &AccountSnapshot, config: &Config) -> String {
    let image = serde_json::from_str::<Value>(&account.json_metadata)
        .ok()
        .and_then(|metadata| {
            metadata
                .get("profile")?
                .get("profile_image")?
                .as_str()
                .map(str::to_string)
        })
        .filter(|image| !image.is_empty());

    match image {
        Some(image) => format!("{}{}", config.avatar_cdn, image),
        None => config.avatar_fallback.replace("{}", &account.name),
    }
}

pub fn parse_account(
    account: &AccountSnapshot,
    props: &DynamicGlobalProperties,
    config: &Config,
    now: NaiveDateTime,
) -> Result<AccountInfo> {
    let voting_power = format!("{:.2}%", current_voting_power(account, now));
    let reputation = format_reputation(&account.reputation);
    let sp = format!("{:.1} {}", own_stake(account, props)?, config.currency_symbol);
    let avatar_url = avatar_url(account, config);
    let created = format_date(&account.created, &config.date_format);

    let mut fields: Map<String, Value> = account.extra.clone();
    for (key, value) in [
        ("name", account.name.clone()),
        ("created", created.clone()),
        ("voting_power", voting_power.clone()),
        ("reputation", reputation.clone()),
        ("vesting_shares", account.vesting_shares.clone()),
        ("json_metadata", account.json_metadata.clone()),
        ("sp", sp.clone()),
        ("avatar_url", avatar_url.clone()),
    ] {
        fields.insert(key.to_string(), Value::String(value));
    }
    if let Some(last_vote_time) = &account.last_vote_time {
        fields.insert(
            "last_vote_time".to_string(),
            Value::String(format_date(last_vote_time, &config.date_format)),
        );
    }

    let mut fields: Vec<(String, String)> = fields
        .iter()
        .map(|(key, value)| (key.clone(), display_value(value)))
        .collect();
    fields.sort();

    Ok(AccountInfo {
        name: account.name.clone(),
        created,
        voting_power,
        reputation,
        sp,
        avatar_url,
        fields,
    })
}
