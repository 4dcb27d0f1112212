//! # blockcache
//!
//! Fixed-capacity LRU cache of block ids.
//!
//! ## Architecture
//! - **Arena**: owns every entry; released slots are recycled
//! - **Hash Index**: `id % capacity` buckets with chained collisions (O(1) average lookup)
//! - **Recency List**: circular doubly-linked list with a sentinel (O(1) promotion and eviction)
//!
//! Both structures hold slot handles into the same arena, so an entry is
//! either present in both or in neither.
//!
//! ```
//! use blockcache::{Access, BlockId, LruStore};
//!
//! let mut store = LruStore::new(2)?;
//! assert_eq!(store.access(BlockId::new(1))?, Access::Miss);
//! assert_eq!(store.access(BlockId::new(1))?, Access::Hit);
//! # Ok::<(), blockcache::Error>(())
//! ```

#![warn(missing_docs)]

mod entry;
mod error;
mod index;
mod list;
mod store;

pub use entry::BlockId;
pub use error::{Error, Result};
pub use list::Iter;
pub use store::{Access, LruStore};
