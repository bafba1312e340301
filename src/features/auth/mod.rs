pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod verifier;

pub use verifier::TokenVerifier;
