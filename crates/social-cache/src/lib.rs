//! # social-cache
//!
//! Redis-backed messaging for document change events.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Pub/Sub**: document changes published per collection
//!   (`documents:{collection}`) and consumed by the trigger worker
//! - **Local feed**: in-process queues of changes for embedded triggers
//!
//! ## Example
//!
//! ```ignore
//! use social_cache::{RedisPool, RedisPoolConfig, Publisher, SubscriberBuilder, PubSubChannel};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = Arc::new(Publisher::new(pool));
//! let store = MemoryDocumentStore::new().with_publisher(publisher);
//!
//! let mut subscriber = SubscriberBuilder::new()
//!     .redis_url("redis://127.0.0.1:6379")
//!     .subscribe_all(PubSubChannel::all_documents())
//!     .build()
//!     .await?;
//! let rx = subscriber.take_receiver();
//! ```

pub mod local;
pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export feed types
pub use local::LocalChangeFeed;

// Re-export pubsub types
pub use pubsub::{
    PubSubChannel, PubSubEvent, Publisher, ReceivedMessage, Subscriber, SubscriberBuilder,
    SubscriberConfig, SubscriberError, SubscriberResult, DOCUMENTS_CHANNEL_PREFIX,
};
