pub mod purpose;
pub mod validation;
