mod scrape;
mod manual;

pub use scrape::*;
pub use manual::*;
