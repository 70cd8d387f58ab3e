pub mod config;
pub mod dates;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod slug;
pub mod source;
