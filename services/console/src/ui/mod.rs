pub mod auth;
pub mod detail;
pub mod gallery;
pub mod generate;
pub mod session;

pub use auth::{LoginController, SignupController};
pub use detail::DetailController;
pub use gallery::GalleryController;
pub use generate::{GenerateController, GeneratePhase};
pub use session::SessionAccessor;

/// Navigation targets a screen can ask for. The loop in the binary owns the
/// actual transitions; controllers only ever name a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Gallery,
    Detail(i64),
    Login,
    Signup,
}
