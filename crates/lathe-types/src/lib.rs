pub mod assembly;
pub mod blueprint;
pub mod disassembly;
pub mod domain;
pub mod polar;

pub use assembly::*;
pub use blueprint::*;
pub use disassembly::*;
pub use domain::*;
pub use polar::*;
