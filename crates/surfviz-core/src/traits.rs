use crate::error::Result;

/// Validate structural integrity of a generated entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
