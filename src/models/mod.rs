pub mod annotation;
pub mod record;
pub mod transcribe;
pub mod transcript;

pub use annotation::*;
pub use record::*;
pub use transcribe::*;
pub use transcript::*;
