pub mod account;
pub mod comment;
pub mod links;
pub mod operations;
pub mod values;

pub use account::parse_account;
pub use comment::parse_comment;
pub use operations::{format_operation, FormattedOperation};
