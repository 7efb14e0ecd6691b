pub mod token;
pub use token::{Claims, TokenError, TokenService};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, Identity, LoginResult};
pub use auth_service_impl::DefaultAuthService;

pub mod gadget_service;
pub mod gadget_service_impl;
pub use gadget_service::{GadgetError, GadgetService, GadgetUpdate};
pub use gadget_service_impl::SeaOrmGadgetService;
