//! Type definitions for the Chaster API.
//!
//! Closed enumerations for the status filters the API accepts, and typed
//! builders for the request bodies that have a fixed shape.

pub mod common;
pub mod conversations;
pub mod files;
pub mod keyholder;
pub mod locks;
pub mod shared_locks;

pub use conversations::{ConversationStatus, ConversationsQuery};
pub use files::{StorageFileType, UploadFile, UploadFiles};
pub use keyholder::{Criteria, SearchLocks, SharedLocksCriteria};
pub use locks::{LockHistory, LockListStatus, LockState};
pub use shared_locks::{CreateSharedLock, SharedLockStatus};
