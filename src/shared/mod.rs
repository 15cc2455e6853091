pub mod attributes;
pub mod validation;
