mod reader;
pub mod unformatted;

pub use mrconee_core::error::{Error, FormatError};
pub use mrconee_core::types::{Dataset, GroupArithmetic, IntWidth};
pub use reader::{probe_integer_width, read_mrconee};
