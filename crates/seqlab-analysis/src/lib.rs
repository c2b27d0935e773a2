pub mod analysis;
pub mod annotate;

pub use analysis::*;
pub use annotate::*;
