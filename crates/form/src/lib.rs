//! Client side of the contact form: field state, submission status and the
//! transport that posts a submission to the relay endpoint.

mod controller;
mod state;
mod transport;

pub use controller::*;
pub use mervolt_contact::ContactSubmission;
pub use state::*;
pub use transport::*;
