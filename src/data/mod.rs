pub mod table;

pub use table::{parse_table, partition, read_table, Table};
