// Service exports
pub mod appwrite;
pub mod cache;
pub mod preferences;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use cache::{CacheError, CacheKey, CacheManager};
pub use preferences::{PreferenceStore, PreferenceStoreError};
