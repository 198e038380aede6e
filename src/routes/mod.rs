mod health_check;
mod errors;
mod users;
mod product;
mod inventory;
mod sales;
mod data_warehouse;
mod character;

pub use health_check::*;
pub use errors::*;
pub use users::*;
pub use product::*;
pub use inventory::*;
pub use sales::*;
pub use data_warehouse::*;
pub use character::*;
