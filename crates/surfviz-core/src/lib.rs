pub mod error;
pub mod id;
pub mod tolerance;
pub mod traits;

pub use error::{Result, SurfvizError};
pub use id::EquationId;
pub use tolerance::Tolerance;
pub use traits::Validate;
