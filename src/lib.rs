// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod error;
pub mod notify;
pub mod reducer;
pub mod runtime;
pub mod score;
pub mod session;
pub mod store;
pub mod text;
pub mod words;
