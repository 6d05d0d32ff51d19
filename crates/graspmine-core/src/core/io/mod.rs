pub mod records;

pub use records::{RecordIoError, load_records, save_records};
