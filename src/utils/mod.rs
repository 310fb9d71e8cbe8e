pub mod fs;
pub mod path;
pub mod timestamp;

pub use timestamp::get_timestamp;
