use gl::types::{GLenum, GLuint};
use std::fmt;
use tracing::{debug, error, warn};

use crate::{
    backend::Backend,
    context::RenderContext,
    error::{Result, ShaderError},
};

/// Placeholder used when the driver fails without saying why.
pub(crate) const EMPTY_LOG: &str = "<driver returned no log>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn to_gl(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// One compiled stage. The stage object is deleted when this is dropped,
/// which after linking is right away.
pub struct Shader<'ctx, B: Backend> {
    ctx: &'ctx RenderContext<B>,
    id: GLuint,
    stage: ShaderStage,
}

impl<'ctx, B: Backend> Shader<'ctx, B> {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<B: Backend> Drop for Shader<'_, B> {
    fn drop(&mut self) {
        self.ctx.backend().delete_shader(self.id);
    }
}

pub(crate) fn non_empty(log: String) -> String {
    if log.trim().is_empty() {
        EMPTY_LOG.to_owned()
    } else {
        log
    }
}

pub fn compile<'ctx, B: Backend>(
    ctx: &'ctx RenderContext<B>,
    stage: ShaderStage,
    source: &str,
) -> Result<Shader<'ctx, B>> {
    let gl = ctx.backend();
    let id = gl.create_shader(stage.to_gl());
    if id == 0 {
        return Err(ShaderError::CreateFailed("shader"));
    }
    let shader = Shader { ctx, id, stage };

    gl.shader_source(id, source);
    gl.compile_shader(id);

    let log = gl.shader_info_log(id);
    if !gl.shader_compile_status(id) {
        let log = non_empty(log);
        error!(%stage, "shader compilation failed:\n{}", log);
        return Err(ShaderError::Compile { stage, log });
    }

    if !log.trim().is_empty() {
        warn!(%stage, "{}", log.trim_end());
    }
    debug!(%stage, id, "compiled shader");

    Ok(shader)
}
