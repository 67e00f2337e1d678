pub mod assessments;

pub mod auth;

pub mod questions;

pub mod submissions;

pub mod users;

pub use assessments::configure_assessments_routes;
pub use auth::configure_auth_routes;
pub use questions::configure_questions_routes;
pub use submissions::configure_submissions_routes;
pub use users::configure_user_routes;
