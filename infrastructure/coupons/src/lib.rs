pub mod client;
pub mod verifier;
