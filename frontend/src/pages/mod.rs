pub mod login;
pub mod teachers;

pub use login::LoginPage;
pub use teachers::TeachersPage;
