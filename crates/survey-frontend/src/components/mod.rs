//! Reusable view components.

pub mod chrome;
pub mod detail_modal;
pub mod field;
pub mod pagination;
pub mod protected_route;
pub mod toast;

pub use chrome::{Footer, Header};
pub use detail_modal::DetailModal;
pub use field::{ChoiceField, TextField};
pub use pagination::Pagination;
pub use protected_route::ProtectedRoute;
pub use toast::ToastContainer;
