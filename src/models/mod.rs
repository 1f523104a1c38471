pub mod roster;
pub mod session;
pub mod table;

pub use roster::*;
pub use session::*;
pub use table::*;
