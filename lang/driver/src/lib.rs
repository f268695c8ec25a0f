//! Running tactics end to end: a session owns the signature and the exception
//! registry, runs computations and has the kernel recheck what they return.

pub mod conf;
pub mod err;
pub mod session;
/// Tactics bundled with the driver, runnable by name.
pub mod demos;

pub use conf::Conf;
pub use demos::{DEMOS, Demo};
pub use err::*;
pub use session::Session;

#[cfg(test)]
mod tests;
