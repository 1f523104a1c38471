pub mod classify;
pub mod names_list;

pub use classify::*;
pub use names_list::*;
