pub mod account_view;
pub mod comment_view;
pub mod templates;

pub use account_view::{load_account_page, render_account_page};
pub use comment_view::{load_comment_page, render_comment_page};
