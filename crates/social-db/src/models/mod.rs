//! Document models - serde structs for the stored JSON of each collection
//!
//! Field names are camelCase on the wire. [`field`] holds the names used in
//! queries and partial updates.

mod comment;
mod like;
mod notification;
mod post;
mod row;
mod user;

pub use comment::CommentDocument;
pub use like::LikeDocument;
pub use notification::NotificationDocument;
pub use post::PostDocument;
pub use row::DocumentRow;
pub use user::{CredentialsDocument, UserDocument};

/// Stored field names
pub mod field {
    pub const BODY: &str = "body";
    pub const COMMENTS: &str = "comments";
    pub const CREATED_AT: &str = "createdAt";
    pub const EMAIL: &str = "email";
    pub const IMAGE_URL: &str = "imageUrl";
    pub const LIKES: &str = "likes";
    pub const POST_ID: &str = "postId";
    pub const READ: &str = "read";
    pub const RECIPIENT: &str = "recipient";
    pub const USER_HANDLE: &str = "userHandle";
    pub const USER_IMAGE: &str = "userImage";
    pub const BIO: &str = "bio";
    pub const WEBSITE: &str = "website";
    pub const LOCATION: &str = "location";
}
