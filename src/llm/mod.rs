pub mod client;
pub mod fallback;
pub mod prompts;

pub use client::*;
pub use fallback::*;
pub use prompts::*;
