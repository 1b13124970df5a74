pub mod banks;
pub mod constants;
pub mod errors;
pub mod types;

pub use banks::*;
pub use constants::*;
pub use types::*;
