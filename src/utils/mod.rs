//! Shared helpers

pub mod files;
pub mod paths;
pub mod secrets;

pub use files::read_if_exists;
pub use paths::resolve_against;
pub use secrets::mask_secret;
