pub mod numeric;

pub use numeric::{extract_numbers, DEFAULT_CONTEXT_SIZE};
