use askama::Template;

use crate::models::{AccountInfo, CommentInfo};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub error: String,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub error: String,
    pub username: String,
    pub account: Option<AccountInfo>,
    pub optable: String,
    pub page: u64,
    pub total_pages: u64,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

#[derive(Template)]
#[template(path = "comment.html")]
pub struct CommentTemplate {
    pub error: String,
    pub comment: Option<CommentInfo>,
    pub comment_options: String,
    pub comment_votes: String,
}

#[derive(Template)]
#[template(path = "op.html")]
pub struct OpTemplate<'a> {
    pub timestamp: &'a str,
    pub block: u64,
    pub id: u64,
    pub opstr: &'a str,
}

#[derive(Template)]
#[template(path = "row.html")]
pub struct RowTemplate<'a> {
    pub cols: &'a [String],
    pub code: bool,
}

#[derive(Template)]
#[template(path = "table_header.html")]
pub struct TableHeaderTemplate<'a> {
    pub cols: &'a [String],
}
