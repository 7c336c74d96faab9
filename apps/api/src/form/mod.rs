pub mod handlers;
pub mod validation;

pub use validation::{validate, ValidationError};
