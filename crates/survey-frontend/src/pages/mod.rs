//! Page components.

pub mod admin_dashboard;
pub mod auth;
pub mod instructions;
pub mod registration;
pub mod survey_form;

pub use admin_dashboard::AdminDashboard;
pub use auth::AuthPage;
pub use instructions::Instructions;
pub use registration::SurveyorRegistration;
pub use survey_form::SurveyForm;
