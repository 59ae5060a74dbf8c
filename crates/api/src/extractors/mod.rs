//! Request extractors.

pub mod wizard_session;

pub use wizard_session::WizardSessionToken;
