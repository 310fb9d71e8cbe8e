pub mod checkbox;
pub mod entry;

pub use entry::{Entry, Record};
