mod article;
mod comment;
mod topic;
mod user;
pub use article::{Article, ArticleSummary};
pub use comment::Comment;
pub use topic::Topic;
pub use user::User;
