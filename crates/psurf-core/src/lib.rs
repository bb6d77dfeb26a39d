pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{KernelError, Result};
pub use tolerance::{Tolerance, EPSILON};
