pub mod config;
pub mod error;
pub mod router;
pub mod tools;
pub mod www;

pub use error::{ Error, ErrorKind, Result };
