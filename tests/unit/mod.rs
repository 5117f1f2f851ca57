pub mod errors;
pub mod scenarios;
