mod account;
mod amount;
mod comment;
mod operation;
mod page;
pub mod serde_utils;

pub use account::{AccountInfo, AccountSnapshot, DynamicGlobalProperties};
pub use amount::Amount;
pub use comment::{Comment, CommentInfo, Vote, VoteInfo};
pub use operation::{CustomJsonAction, Operation, PermlinkRef, RawOperation};
pub use page::PageContext;
