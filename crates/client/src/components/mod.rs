pub mod chat;
pub mod comment_item;
pub mod header;
pub mod post_summary;
pub mod ui;

pub use chat::GlobalChat;
pub use comment_item::CommentItem;
pub use header::Header;
pub use post_summary::PostSummary;
