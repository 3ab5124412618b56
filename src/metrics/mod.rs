//! Stateless derived-metric functions, one module per table family.
//!
//! Missing inputs and zero denominators produce `None` instead of an error;
//! rankings skip those rows and ties go to the earliest row.

pub mod gender;
pub mod places;
pub mod visitors;
