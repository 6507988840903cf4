//! Pages
//!
//! One component per route.

mod dashboard;
mod home;
mod list_detail;
mod login;
mod new_list;
mod not_found;
mod public_list;
mod sign_up;
mod sign_up_success;

pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use list_detail::ListDetailPage;
pub use login::LoginPage;
pub use new_list::NewListPage;
pub use not_found::NotFoundPage;
pub use public_list::PublicListPage;
pub use sign_up::SignUpPage;
pub use sign_up_success::SignUpSuccessPage;
