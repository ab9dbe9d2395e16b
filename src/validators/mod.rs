pub mod email;

pub use email::{validate_email, ValidationError};
