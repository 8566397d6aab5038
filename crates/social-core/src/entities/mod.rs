//! Domain entities - core business objects

mod comment;
mod like;
mod notification;
mod post;
mod user;

pub use comment::Comment;
pub use like::Like;
pub use notification::{Notification, NotificationType};
pub use post::Post;
pub use user::{User, UserDetails};
