mod email;
mod sender;
mod submission;

pub use email::*;
pub use sender::*;
pub use submission::*;
