//! Domain ports
//!
//! Trait contracts the domain core needs from the outside world.

pub mod session;

pub use session::{SessionProvider, UnitOfWork};
