pub mod generation;
pub mod encoding;
pub mod composition;
