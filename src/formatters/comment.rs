use serde_json::Value;

use super::values::{
    format_currency, format_date, format_percent, format_reputation_with_raw, format_rshares,
    format_vote_weight,
};
use crate::error::Result;
use crate::models::{Amount, Comment, CommentInfo, VoteInfo};

pub fn parse_comment(comment: &Comment, date_format: &str) -> Result<CommentInfo> {
    let author_reputation = format_reputation_with_raw(&comment.author_reputation);
    let created = format_date(&comment.created, date_format);
    let payout = format_currency(&[
        Amount::parse(&comment.pending_payout_value)?,
        Amount::parse(&comment.total_payout_value)?,
        Amount::parse(&comment.curator_payout_value)?,
    ])?;

    let mut active_votes: Vec<_> = comment.active_votes.iter().collect();
    active_votes.sort_by(|a, b| a.time.cmp(&b.time));
    let votes = active_votes
        .into_iter()
        .map(|vote| VoteInfo {
            time: format_date(&vote.time, date_format),
            voter: vote.voter.clone(),
            percent: format_percent(&vote.percent),
            rshares: format_rshares(&vote.rshares),
            weight: format_vote_weight(&vote.weight, &comment.total_vote_weight),
            reputation: format_reputation_with_raw(&vote.reputation),
        })
        .collect();

    let mut fields = comment.extra.clone();
    for (key, value) in [
        ("author", comment.author.clone()),
        ("permlink", comment.permlink.clone()),
        ("title", comment.title.clone()),
        ("body", comment.body.clone()),
        ("created", created.clone()),
        ("author_reputation", author_reputation.clone()),
        ("total_vote_weight", comment.total_vote_weight.to_string()),
        ("pending_payout_value", comment.pending_payout_value.clone()),
        ("total_payout_value", comment.total_payout_value.clone()),
        ("curator_payout_value", comment.curator_payout_value.clone()),
        ("payout", payout.clone()),
    ] {
        fields.insert(key.to_string(), Value::String(value));
    }

    Ok(CommentInfo {
        author: comment.author.clone(),
        permlink: comment.permlink.clone(),
        title: comment.title.clone(),
        body: comment.body.clone(),
        created,
        author_reputation,
        payout,
        votes,
        fields,
    })
}
