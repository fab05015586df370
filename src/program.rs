use gl::types::{GLint, GLuint};
use std::{ffi::CString, fs, path::Path};
use tracing::{debug, error, trace, warn};

use crate::{
    backend::Backend,
    context::RenderContext,
    error::{Result, ShaderError},
    shader::{self, non_empty, ShaderStage},
    uniform::{ActiveUniforms, UniformType},
};

/// A linked vertex + fragment program.
///
/// Uniform setters follow the driver: writing a name the program does not
/// declare is silently ignored. Getters are stricter and report unknown names
/// and type mismatches as errors.
///
/// The program is deleted when this is dropped. It is not `Clone`, so that
/// happens exactly once.
pub struct ShaderProgram<'ctx, B: Backend> {
    ctx: &'ctx RenderContext<B>,
    id: GLuint,
    uniforms: ActiveUniforms,
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_owned(),
        source,
    })
}

impl<'ctx, B: Backend> ShaderProgram<'ctx, B> {
    pub fn from_files(
        ctx: &'ctx RenderContext<B>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let vert = read_source(vertex_path.as_ref())?;
        let frag = read_source(fragment_path.as_ref())?;
        Self::from_strings(ctx, &vert, &frag)
    }

    pub fn from_strings(
        ctx: &'ctx RenderContext<B>,
        vert: &str,
        frag: &str,
    ) -> Result<Self> {
        let vertex = shader::compile(ctx, ShaderStage::Vertex, vert)?;
        let fragment = shader::compile(ctx, ShaderStage::Fragment, frag)?;

        let gl = ctx.backend();
        let id = gl.create_program();
        if id == 0 {
            return Err(ShaderError::CreateFailed("program"));
        }

        gl.attach_shader(id, vertex.id());
        gl.attach_shader(id, fragment.id());
        gl.link_program(id);

        let log = gl.program_info_log(id);
        if !gl.program_link_status(id) {
            gl.delete_program(id);
            let log = non_empty(log);
            error!("program link failed:\n{}", log);
            return Err(ShaderError::Link { log });
        }
        if !log.trim().is_empty() {
            warn!(program = id, "{}", log.trim_end());
        }

        let mut uniforms = ActiveUniforms::default();
        for index in 0..gl.active_uniform_count(id) {
            let (name, ty) = gl.active_uniform(id, index);
            uniforms.insert(&name, UniformType::from_gl(ty));
        }
        debug!(program = id, uniforms = uniforms.len(), "linked program");

        // `vertex` and `fragment` drop here and delete the stage objects.
        Ok(Self { ctx, id, uniforms })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn active_uniforms(&self) -> impl Iterator<Item = (&str, UniformType)> {
        self.uniforms.iter()
    }

    pub fn use_program(&self) {
        self.ctx.bind(self.id);
    }

    fn location(&self, name: &str) -> Option<GLint> {
        let cname = CString::new(name).ok()?;
        let location = self.ctx.backend().uniform_location(self.id, &cname);
        if location < 0 {
            None
        } else {
            Some(location)
        }
    }

    /// Location for a write, with this program bound. `None` means the name
    /// is unknown and the write is dropped.
    fn location_for_write(&self, name: &str) -> Option<GLint> {
        match self.location(name) {
            Some(location) => {
                self.use_program();
                Some(location)
            }
            None => {
                trace!(
                    program = self.id,
                    uniform = name,
                    "ignoring write to unknown uniform"
                );
                None
            }
        }
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        if let Some(location) = self.location_for_write(name) {
            self.ctx.backend().uniform_1i(location, value as GLint);
        }
    }

    pub fn set_int(&self, name: &str, value: i32) {
        if let Some(location) = self.location_for_write(name) {
            self.ctx.backend().uniform_1i(location, value);
        }
    }

    pub fn set_float(&self, name: &str, value: f32) {
        if let Some(location) = self.location_for_write(name) {
            self.ctx.backend().uniform_1f(location, value);
        }
    }

    pub fn set_mat4(&self, name: &str, value: &glm::Mat4) {
        if let Some(location) = self.location_for_write(name) {
            let mut columns = [0.0; 16];
            columns.copy_from_slice(value.as_slice());
            self.ctx.backend().uniform_matrix_4fv(location, &columns);
        }
    }

    /// Location for a read of a uniform that can be read as `expected`.
    fn location_for_read(
        &self,
        name: &str,
        expected: UniformType,
    ) -> Result<GLint> {
        let not_found = || ShaderError::UniformNotFound {
            name: name.to_owned(),
        };
        let location = self.location(name).ok_or_else(not_found)?;
        let found = self.uniforms.get(name).ok_or_else(not_found)?;
        if !found.reads_as(expected) {
            return Err(ShaderError::UniformTypeMismatch {
                name: name.to_owned(),
                expected,
                found,
            });
        }
        Ok(location)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let location = self.location_for_read(name, UniformType::Bool)?;
        Ok(self.ctx.backend().get_uniform_i(self.id, location) != 0)
    }

    pub fn get_int(&self, name: &str) -> Result<i32> {
        let location = self.location_for_read(name, UniformType::Int)?;
        Ok(self.ctx.backend().get_uniform_i(self.id, location))
    }

    pub fn get_float(&self, name: &str) -> Result<f32> {
        let location = self.location_for_read(name, UniformType::Float)?;
        Ok(self.ctx.backend().get_uniform_f(self.id, location))
    }
}

impl<B: Backend> Drop for ShaderProgram<'_, B> {
    fn drop(&mut self) {
        self.ctx.backend().delete_program(self.id);
        debug!(program = self.id, "deleted program");
    }
}
