use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfvizError {
    #[error("Invalid resolution: {segments} segments (expected 1..={max})")]
    InvalidResolution { segments: i64, max: i64 },

    #[error("Non-finite vertex at grid ({i}, {j}) for (u, v) = ({u}, {v})")]
    NonFiniteVertex { i: usize, j: usize, u: f64, v: f64 },

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SurfvizError>;

// `std::io::Error` is not Clone; an IO error is rebuilt from its kind and message.
impl Clone for SurfvizError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidResolution { segments, max } => Self::InvalidResolution {
                segments: *segments,
                max: *max,
            },
            Self::NonFiniteVertex { i, j, u, v } => Self::NonFiniteVertex {
                i: *i,
                j: *j,
                u: *u,
                v: *v,
            },
            Self::InvalidMesh(msg) => Self::InvalidMesh(msg.clone()),
            Self::InvalidSetting(msg) => Self::InvalidSetting(msg.clone()),
            Self::NotFound(msg) => Self::NotFound(msg.clone()),
            Self::Serialization(msg) => Self::Serialization(msg.clone()),
            Self::Io(e) => Self::Io(std::io::Error::new(e.kind(), e.to_string())),
        }
    }
}
