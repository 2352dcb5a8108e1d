pub mod error;
pub mod pairing;
pub mod service;
pub mod store;

pub use error::ChatError;
pub use service::SingleChatService;
pub use store::{SingleChatStore, StoreError};
