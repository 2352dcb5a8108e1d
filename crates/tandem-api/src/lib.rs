pub mod error;
pub mod single;
pub mod state;
pub mod validate;
