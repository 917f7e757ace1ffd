pub mod api;
pub mod error;
pub mod store;
pub mod types;

pub use api::{CommandTransport, EndpointOptions, FanApi};
pub use error::{ApiError, ApiResult, StoreError, StoreResult};
pub use store::{FileKeyStore, KeyStore, MemoryKeyStore, API_KEY_STORAGE_KEY};
pub use types::*;
