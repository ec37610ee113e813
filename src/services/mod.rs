pub mod blog_api;
pub mod console;
pub mod payload;
pub mod render;
pub mod submission;
