pub mod markdown;

pub use markdown::{splice_region, table_body};
