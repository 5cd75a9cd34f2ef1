use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::PermlinkRef;

/// Link to an account page. The viewed account itself is shown in bold
/// without a link.
pub fn author_link(username: &str, viewer: Option<&str>) -> String {
    if viewer == Some(username) {
        format!("<b>{}</b>", encode_text(username))
    } else {
        format!(
            "<a href=\"/@{}\">{}</a>",
            encode_double_quoted_attribute(username),
            encode_text(username)
        )
    }
}

pub fn construct_authorperm(target: &PermlinkRef) -> String {
    format!("{}/{}", target.author, target.permlink)
}

pub fn permlink_link(target: &PermlinkRef) -> String {
    let authorperm = construct_authorperm(target);
    format!(
        "<a href=\"/{}\">{}</a>",
        encode_double_quoted_attribute(&authorperm),
        encode_text(&authorperm)
    )
}
