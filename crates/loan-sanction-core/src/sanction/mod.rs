pub mod fees;
pub mod letter;
pub mod share;
