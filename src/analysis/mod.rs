pub mod demeanor;
pub mod intent;
pub mod resolver;
pub mod tone;

pub use demeanor::*;
pub use intent::*;
pub use resolver::*;
pub use tone::*;
