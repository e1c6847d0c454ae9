//! Accessibility reference datasets: WCAG success criteria, PDF/UA errors
//! and terminology, readability metrics.

pub mod schema;
pub mod specs;
pub mod library;

pub use schema::*;
pub use library::*;
