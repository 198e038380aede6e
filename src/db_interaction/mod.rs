mod user;
mod catalog;
mod data_warehouse;
mod character;

pub use user::*;
pub use catalog::*;
pub use data_warehouse::*;
pub use character::*;
