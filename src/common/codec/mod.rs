mod charset;
mod encoder;
mod types;

pub use charset::*;
pub use encoder::*;
pub use types::*;
