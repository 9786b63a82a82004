//! Data models for the Book API

pub mod book;

pub use book::Book;
