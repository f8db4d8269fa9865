mod instantiate_contracts;
mod read_input;
mod store_codes;

pub use instantiate_contracts::*;
pub use read_input::*;
pub use store_codes::*;
