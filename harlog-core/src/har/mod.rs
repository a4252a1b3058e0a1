mod creator;
#[cfg(test)]
mod tests;
pub(crate) mod timestamp;
mod types;

pub use creator::*;
pub use types::*;
