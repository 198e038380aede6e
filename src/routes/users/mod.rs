mod get;
mod post;
mod update;
mod delete;

pub use get::*;
pub use post::*;
pub use update::*;
pub use delete::*;
