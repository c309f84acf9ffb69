//! Page components for the portal.

pub mod field;
pub mod home;
pub mod login;
pub mod register;
pub mod section;
pub mod status;

pub use home::HomePage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use section::{ProfilePage, SectionPage};
pub use status::{NotFoundPage, UnauthorizedPage};
