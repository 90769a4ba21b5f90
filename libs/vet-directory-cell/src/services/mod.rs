pub mod coordinator;
pub mod geo;
pub mod refine;
pub mod search;
