//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the pipeline's external collaborators: the
//! network, token persistence, audit delivery and sign-in navigation.

pub mod audit;
pub mod navigation;
pub mod token;
pub mod transport;
