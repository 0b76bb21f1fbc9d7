pub mod stage0_resolve;
pub mod stage1_detect;
pub mod stage2_demeanor;
pub mod stage3_persist;

pub use stage0_resolve::*;
pub use stage1_detect::*;
pub use stage2_demeanor::*;
pub use stage3_persist::*;
