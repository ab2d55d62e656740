//! Domain records produced by the parsers.

pub mod book;

pub use book::{Book, Books};
