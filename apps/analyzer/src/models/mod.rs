pub mod analysis;
pub mod lenient;
pub mod resume;
