//! The boundary with the native driver.
//!
//! Everything the crate asks of the GPU goes through [`Backend`]; handles are
//! plain `GLuint`s and uniform locations plain `GLint`s, with `-1` meaning
//! "no such uniform" exactly as the driver reports it.

use gl::types::{GLchar, GLenum, GLfloat, GLint, GLsizei, GLuint};
use std::{ffi::CStr, marker::PhantomData, os::raw::c_void};

pub trait Backend {
    fn create_shader(&self, stage: GLenum) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &str);
    fn compile_shader(&self, shader: GLuint);
    fn shader_compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn program_link_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);
    fn use_program(&self, program: GLuint);
    /// The program in use on the native context, `0` for none.
    fn current_program(&self) -> GLuint;

    fn active_uniform_count(&self, program: GLuint) -> GLuint;
    /// Name and type enum of the active uniform at `index`.
    fn active_uniform(&self, program: GLuint, index: GLuint) -> (String, GLenum);
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;

    // Writes go to the currently bound program.
    fn uniform_1i(&self, location: GLint, value: GLint);
    fn uniform_1f(&self, location: GLint, value: GLfloat);
    fn uniform_matrix_4fv(&self, location: GLint, value: &[GLfloat; 16]);

    fn get_uniform_i(&self, program: GLuint, location: GLint) -> GLint;
    fn get_uniform_f(&self, program: GLuint, location: GLint) -> GLfloat;
}

/// [`Backend`] over the global `gl` function pointers.
///
/// Not `Send` or `Sync`: the driver state it talks to belongs to the thread
/// the context is current on.
pub struct GlBackend {
    _not_send: PhantomData<*const ()>,
}

impl GlBackend {
    /// Loads the GL function pointers through `loader`.
    ///
    /// # Safety
    ///
    /// A GL context must be current on the calling thread, and stay current
    /// for as long as the returned backend is used. Other code may bind
    /// programs on that context too: the bound program is queried from the
    /// driver before every bind, not remembered.
    pub unsafe fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self {
            _not_send: PhantomData,
        }
    }
}

fn log_to_string(mut log: Vec<u8>) -> String {
    while log.last() == Some(&0) {
        log.pop();
    }
    String::from_utf8_lossy(&log).into_owned()
}

impl Backend for GlBackend {
    fn create_shader(&self, stage: GLenum) -> GLuint {
        unsafe { gl::CreateShader(stage) }
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe { gl::ShaderSource(shader, 1, &ptr, &len) };
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status) };
        status == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        unsafe {
            let mut log_len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut log_len);
            let mut log = vec![0u8; log_len.max(0) as usize];
            let mut written: GLsizei = 0;
            gl::GetShaderInfoLog(
                shader,
                log_len,
                &mut written,
                log.as_mut_ptr() as *mut GLchar,
            );
            log.truncate(written.max(0) as usize);
            log_to_string(log)
        }
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) };
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut status) };
        status == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: GLuint) -> String {
        unsafe {
            let mut log_len = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut log_len);
            let mut log = vec![0u8; log_len.max(0) as usize];
            let mut written: GLsizei = 0;
            gl::GetProgramInfoLog(
                program,
                log_len,
                &mut written,
                log.as_mut_ptr() as *mut GLchar,
            );
            log.truncate(written.max(0) as usize);
            log_to_string(log)
        }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) };
    }

    fn current_program(&self) -> GLuint {
        let mut program = 0;
        unsafe { gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut program) };
        program.max(0) as GLuint
    }

    fn active_uniform_count(&self, program: GLuint) -> GLuint {
        let mut count = 0;
        unsafe { gl::GetProgramiv(program, gl::ACTIVE_UNIFORMS, &mut count) };
        count.max(0) as GLuint
    }

    fn active_uniform(&self, program: GLuint, index: GLuint) -> (String, GLenum) {
        unsafe {
            let mut max_len = 0;
            gl::GetProgramiv(
                program,
                gl::ACTIVE_UNIFORM_MAX_LENGTH,
                &mut max_len,
            );
            let mut name = vec![0u8; max_len.max(1) as usize];
            let mut written: GLsizei = 0;
            let mut size: GLint = 0;
            let mut ty: GLenum = 0;
            gl::GetActiveUniform(
                program,
                index,
                name.len() as GLsizei,
                &mut written,
                &mut size,
                &mut ty,
                name.as_mut_ptr() as *mut GLchar,
            );
            name.truncate(written.max(0) as usize);
            (log_to_string(name), ty)
        }
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn uniform_1i(&self, location: GLint, value: GLint) {
        unsafe { gl::Uniform1i(location, value) };
    }

    fn uniform_1f(&self, location: GLint, value: GLfloat) {
        unsafe { gl::Uniform1f(location, value) };
    }

    fn uniform_matrix_4fv(&self, location: GLint, value: &[GLfloat; 16]) {
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr())
        };
    }

    fn get_uniform_i(&self, program: GLuint, location: GLint) -> GLint {
        let mut value = 0;
        unsafe { gl::GetUniformiv(program, location, &mut value) };
        value
    }

    fn get_uniform_f(&self, program: GLuint, location: GLint) -> GLfloat {
        let mut value = 0.0;
        unsafe { gl::GetUniformfv(program, location, &mut value) };
        value
    }
}
