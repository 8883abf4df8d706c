mod auth;
pub mod client;
pub mod teachers;
pub mod types;

pub use client::*;
pub use teachers::TeacherService;
pub use types::*;
