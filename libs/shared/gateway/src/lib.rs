pub mod client;
pub mod normalize;

pub use client::BackendClient;
pub use normalize::{normalize_page, Page};
