pub mod blogs;
pub mod console;
pub mod health;
pub mod status;
