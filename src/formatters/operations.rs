use html_escape::encode_text;
use log::warn;
use serde_json::Value;

use super::links::{author_link, permlink_link};
use super::values::{format_date, vote_action};
use crate::models::serde_utils::display_value;
use crate::models::{CustomJsonAction, Operation, PermlinkRef, RawOperation};

/// One row of the account history table.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedOperation {
    pub timestamp: String,
    pub block: u64,
    pub index: u64,
    pub text: String,
}

/// Pretty-printed field dump without bookkeeping fields.
pub fn raw_dump(op: &RawOperation) -> String {
    let visible = Value::Object(op.visible_fields());
    let pretty = serde_json::to_string_pretty(&visible).unwrap_or_else(|_| visible.to_string());
    format!("<code><pre>{}</pre></code>", encode_text(&pretty))
}

/// Comma separated reward amounts.
pub fn get_rewards(rewards: &[Value]) -> String {
    rewards
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_operation(
    op: &RawOperation,
    viewer: Option<&str>,
    date_format: &str,
) -> FormattedOperation {
    let text = match Operation::parse(op) {
        Ok(parsed) => describe(&parsed, viewer).unwrap_or_else(|| raw_dump(op)),
        Err(e) => {
            warn!(
                "Cannot read {} operation #{} in block {}: {}",
                op.op_type, op.index, op.block, e
            );
            format!(
                "Unparsable {} operation ({}): {}",
                encode_text(&op.op_type),
                encode_text(&e.to_string()),
                raw_dump(op)
            )
        }
    };

    FormattedOperation {
        timestamp: format_date(&op.timestamp, date_format),
        block: op.block,
        index: op.index,
        text,
    }
}

/// One-line description for operation types that have one.
fn describe(op: &Operation, viewer: Option<&str>) -> Option<String> {
    let user = |name: &str| author_link(name, viewer);

    let text = match op {
        Operation::Vote(vote) => {
            let weight = vote.weight as f64 / 100.0;
            format!(
                "{} {} {} ({:.2}%)",
                user(&vote.voter),
                vote_action(vote.weight),
                permlink_link(&PermlinkRef::new(&vote.author, &vote.permlink)),
                weight
            )
        }
        Operation::TransferToVesting(transfer) => format!(
            "{} vests {} to {}",
            user(&transfer.from),
            display_value(&transfer.amount),
            user(&transfer.to)
        ),
        // memo is shown verbatim
        Operation::Transfer(transfer) => format!(
            "{} transfers {} to {}: <code>{}</code>",
            user(&transfer.from),
            display_value(&transfer.amount),
            user(&transfer.to),
            transfer.memo
        ),
        Operation::CurationReward(reward) => format!(
            "Curation reward: {} for {}",
            get_rewards(&reward.rewards),
            permlink_link(&reward.target)
        ),
        Operation::AuthorReward(reward) => format!(
            "Author reward: {} for {}",
            get_rewards(&reward.rewards),
            permlink_link(&reward.target)
        ),
        Operation::CommentBenefactorReward(benefactor) => format!(
            "Benefactor reward for {}: {} for {}",
            user(&benefactor.benefactor),
            get_rewards(&benefactor.reward.rewards),
            permlink_link(&benefactor.reward.target)
        ),
        Operation::AccountCreate(create) => format!(
            "{} creates account {} (fee: {})",
            user(&create.creator),
            user(&create.new_account_name),
            display_value(&create.fee)
        ),
        Operation::AccountWitnessVote(witness_vote) => format!(
            "{} {} {} as witness",
            user(&witness_vote.account),
            if witness_vote.approve {
                "votes for"
            } else {
                "unvotes for"
            },
            user(&witness_vote.witness)
        ),
        Operation::FillVestingWithdraw(withdraw) => format!(
            "{} withdraws {} as {} to {}",
            user(&withdraw.from_account),
            display_value(&withdraw.withdrawn),
            display_value(&withdraw.deposited),
            user(&withdraw.to_account)
        ),
        Operation::Comment(comment) if comment.is_reply() => format!(
            "{} replies to {}",
            user(&comment.author),
            permlink_link(&PermlinkRef::new(
                &comment.parent_author,
                &comment.parent_permlink
            ))
        ),
        Operation::Comment(comment) => format!(
            "{} authors a post: {}",
            user(&comment.author),
            permlink_link(&PermlinkRef::new(&comment.author, &comment.permlink))
        ),
        Operation::CommentOptions(options) => {
            let lines: Vec<String> = options
                .options
                .iter()
                .map(|(key, value)| format!("{}: {}", key, encode_text(&display_value(value))))
                .collect();
            format!(
                "Comment options for {}: <pre>{}</pre>",
                permlink_link(&options.target),
                lines.join("\n")
            )
        }
        Operation::CustomJson(CustomJsonAction::Follow {
            follower,
            following,
        }) => format!("{} follows {}", user(follower), user(following)),
        Operation::CustomJson(CustomJsonAction::Unfollow {
            follower,
            following,
        }) => format!("{} unfollows {}", user(follower), user(following)),
        Operation::CustomJson(CustomJsonAction::Reblog { account, target }) => {
            format!("{} reblogs {}", user(account), permlink_link(target))
        }
        Operation::CustomJson(CustomJsonAction::Unrecognized) | Operation::Other => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    fn raw(op_type: &str, fields: Value) -> RawOperation {
        let mut fields = fields.as_object().cloned().unwrap_or_default();
        fields.insert("trx_id".into(), json!("0123abcd"));
        fields.insert("block".into(), json!(25000000));
        fields.insert("op_in_trx".into(), json!(0));
        fields.insert("virtual_op".into(), json!(0));
        fields.insert("timestamp".into(), json!("2019-05-01T12:30:00"));
        RawOperation {
            index: 41,
            block: 25000000,
            timestamp: "2019-05-01T12:30:00".to_string(),
            op_type: op_type.to_string(),
            fields,
        }
    }

    fn text(op_type: &str, fields: Value, viewer: Option<&str>) -> String {
        format_operation(&raw(op_type, fields), viewer, DATE_FORMAT).text
    }

    #[test]
    fn row_metadata() {
        let formatted = format_operation(&raw("some_future_op", json!({})), None, DATE_FORMAT);
        assert_eq!(formatted.timestamp, "2019-05-01 12:30:00");
        assert_eq!(formatted.block, 25000000);
        assert_eq!(formatted.index, 41);
    }

    #[test]
    fn votes() {
        let up = text(
            "vote",
            json!({"voter": "alice", "author": "bob", "permlink": "p", "weight": 10000}),
            Some("alice"),
        );
        assert_eq!(
            up,
            "<b>alice</b> upvotes <a href=\"/bob/p\">bob/p</a> (100.00%)"
        );

        let down = text(
            "vote",
            json!({"voter": "alice", "author": "bob", "permlink": "p", "weight": -550}),
            Some("bob"),
        );
        assert!(down.contains("downvotes"));
        assert!(down.ends_with("(-5.50%)"));

        let zero = text(
            "vote",
            json!({"voter": "alice", "author": "bob", "permlink": "p", "weight": 0}),
            None,
        );
        assert!(zero.contains("unvotes"));
        assert!(zero.ends_with("(0.00%)"));
    }

    #[test]
    fn transfers() {
        let vest = text(
            "transfer_to_vesting",
            json!({"from": "alice", "to": "bob", "amount": "10.000 GOLOS"}),
            Some("bob"),
        );
        assert_eq!(
            vest,
            "<a href=\"/@alice\">alice</a> vests 10.000 GOLOS to <b>bob</b>"
        );

        let transfer = text(
            "transfer",
            json!({"from": "alice", "to": "bob", "amount": "1.000 GBG", "memo": "<i>thanks</i>"}),
            Some("alice"),
        );
        assert_eq!(
            transfer,
            "<b>alice</b> transfers 1.000 GBG to <a href=\"/@bob\">bob</a>: <code><i>thanks</i></code>"
        );
    }

    #[test]
    fn rewards() {
        let curation = text(
            "curation_reward",
            json!({
                "curator": "alice",
                "reward": "12.000000 GESTS",
                "comment_author": "bob",
                "comment_permlink": "post"
            }),
            Some("alice"),
        );
        assert_eq!(
            curation,
            "Curation reward: 12.000000 GESTS for <a href=\"/bob/post\">bob/post</a>"
        );

        let author = text(
            "author_reward",
            json!({
                "author": "bob",
                "permlink": "post",
                "sbd_payout": "1.000 GBG",
                "steem_payout": "0.000 GOLOS",
                "vesting_payout": "5.000000 GESTS"
            }),
            Some("bob"),
        );
        assert_eq!(
            author,
            "Author reward: 0.000 GOLOS, 1.000 GBG, 5.000000 GESTS for <a href=\"/bob/post\">bob/post</a>"
        );

        let benefactor = text(
            "comment_benefactor_reward",
            json!({
                "benefactor": "carol",
                "author": "bob",
                "permlink": "post",
                "reward": "2.000000 GESTS"
            }),
            Some("carol"),
        );
        assert_eq!(
            benefactor,
            "Benefactor reward for <b>carol</b>: 2.000000 GESTS for <a href=\"/bob/post\">bob/post</a>"
        );
    }

    #[test]
    fn account_operations() {
        let create = text(
            "account_create",
            json!({
                "creator": "alice",
                "new_account_name": "newbie",
                "fee": "3.000 GOLOS",
                "owner": {"key_auths": [["GLS5abc", 1]]},
                "memo_key": "GLS5abc"
            }),
            Some("alice"),
        );
        assert_eq!(
            create,
            "<b>alice</b> creates account <a href=\"/@newbie\">newbie</a> (fee: 3.000 GOLOS)"
        );

        let approve = text(
            "account_witness_vote",
            json!({"account": "alice", "witness": "w", "approve": true}),
            Some("alice"),
        );
        assert_eq!(
            approve,
            "<b>alice</b> votes for <a href=\"/@w\">w</a> as witness"
        );

        let revoke = text(
            "account_witness_vote",
            json!({"account": "alice", "witness": "w", "approve": false}),
            None,
        );
        assert!(revoke.contains(" unvotes for "));

        let withdraw = text(
            "fill_vesting_withdraw",
            json!({
                "from_account": "alice",
                "to_account": "alice",
                "withdrawn": "100.000000 GESTS",
                "deposited": "0.050 GOLOS"
            }),
            Some("alice"),
        );
        assert_eq!(
            withdraw,
            "<b>alice</b> withdraws 100.000000 GESTS as 0.050 GOLOS to <b>alice</b>"
        );
    }

    #[test]
    fn comments() {
        let post = text(
            "comment",
            json!({
                "parent_author": "",
                "parent_permlink": "golos",
                "author": "alice",
                "permlink": "hello",
                "body": "..."
            }),
            Some("alice"),
        );
        assert_eq!(
            post,
            "<b>alice</b> authors a post: <a href=\"/alice/hello\">alice/hello</a>"
        );

        let reply = text(
            "comment",
            json!({
                "parent_author": "bob",
                "parent_permlink": "topic",
                "author": "alice",
                "permlink": "re-topic",
                "body": "..."
            }),
            Some("alice"),
        );
        assert_eq!(
            reply,
            "<b>alice</b> replies to <a href=\"/bob/topic\">bob/topic</a>"
        );
    }

    #[test]
    fn comment_options_list_present_keys_only() {
        let options = text(
            "comment_options",
            json!({
                "author": "alice",
                "permlink": "hello",
                "max_accepted_payout": "1000000.000 GBG",
                "allow_votes": true,
                "extensions": []
            }),
            None,
        );
        assert_eq!(
            options,
            "Comment options for <a href=\"/alice/hello\">alice/hello</a>: \
             <pre>max_accepted_payout: 1000000.000 GBG\nallow_votes: true</pre>"
        );
    }

    #[test]
    fn custom_json_follow_unfollow_reblog() {
        let follow = text(
            "custom_json",
            json!({
                "id": "follow",
                "json": r#"["follow",{"follower":"a","following":"b","what":["blog"]}]"#
            }),
            None,
        );
        assert!(follow.contains("<a href=\"/@a\">a</a> follows <a href=\"/@b\">b</a>"));

        let unfollow = text(
            "custom_json",
            json!({
                "id": "follow",
                "json": r#"["follow",{"follower":"a","following":"b","what":[""]}]"#
            }),
            Some("a"),
        );
        assert_eq!(unfollow, "<b>a</b> unfollows <a href=\"/@b\">b</a>");

        let reblog = text(
            "custom_json",
            json!({
                "id": "follow",
                "json": r#"["reblog",{"account":"c","author":"a","permlink":"p"}]"#
            }),
            Some("c"),
        );
        assert_eq!(reblog, "<b>c</b> reblogs <a href=\"/a/p\">a/p</a>");
    }

    #[test]
    fn malformed_custom_json_falls_back_to_dump() {
        let malformed = text(
            "custom_json",
            json!({"id": "follow", "json": "[\"follow\", {broken"}),
            None,
        );
        assert!(malformed.starts_with("<code><pre>"));
        assert!(malformed.contains("{broken"));
    }

    #[test]
    fn unknown_type_dumps_visible_fields() {
        let dump = text("some_future_op", json!({"foo": "bar", "required_auths": ["x"]}), None);
        assert!(dump.starts_with("<code><pre>"));
        assert!(dump.contains("foo"));
        assert!(dump.contains("some_future_op"));
        assert!(!dump.contains("trx_id"));
        assert!(!dump.contains("required_auths"));
        assert!(!dump.contains("25000000"));
    }

    #[test]
    fn missing_required_field_only_affects_that_row() {
        let broken = text("vote", json!({"voter": "alice"}), None);
        assert!(broken.starts_with("Unparsable vote operation"));
        assert!(broken.contains("<code><pre>"));
    }

    #[test]
    fn formatting_is_pure() {
        let op = raw(
            "comment_benefactor_reward",
            json!({
                "benefactor": "carol",
                "comment_author": "bob",
                "comment_permlink": "post",
                "reward": "2.000000 GESTS"
            }),
        );
        let before = op.clone();
        let first = format_operation(&op, Some("carol"), DATE_FORMAT);
        let second = format_operation(&op, Some("carol"), DATE_FORMAT);
        assert_eq!(op, before);
        assert_eq!(first, second);
    }
}
