pub mod dates;

pub use dates::{format_typed_date, is_canonical_date, normalize_date};
