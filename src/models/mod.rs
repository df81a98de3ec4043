pub mod common;
pub mod image;
pub mod options;
pub mod request;

pub use common::*;
pub use options::*;
pub use request::*;
