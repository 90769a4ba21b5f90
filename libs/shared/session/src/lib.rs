pub mod backend;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, SessionBackend};
pub use store::{Session, SessionError, SessionStore};

/// Storage keys, kept identical to the browser client this replaces.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";
