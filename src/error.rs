use std::path::PathBuf;

use crate::{shader::ShaderStage, uniform::UniformType};

pub type Result<T> = std::result::Result<T, ShaderError>;

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("could not read shader source {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program failed to link:\n{log}")]
    Link { log: String },
    #[error("driver returned a null {0} handle, is a context current?")]
    CreateFailed(&'static str),
    #[error("uniform `{name}` is not an active uniform of this program")]
    UniformNotFound { name: String },
    #[error("uniform `{name}` is declared as {found}, not {expected}")]
    UniformTypeMismatch {
        name: String,
        expected: UniformType,
        found: UniformType,
    },
}
