//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and orchestrate repository calls.
//! Side effects on other documents (notifications, cascades, image
//! propagation) are left to the trigger worker.

pub mod context;
pub mod error;
pub mod post;
pub mod user;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use user::UserService;
