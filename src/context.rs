use gl::types::GLuint;
use tracing::trace;

use crate::backend::Backend;

/// Explicit handle to the native context a program lives in.
///
/// Binding goes through here instead of through ambient driver state. The
/// bound program is always read back from the driver, never cached, so binds
/// made elsewhere on the same native context (raw `gl::UseProgram`, another
/// `RenderContext`) cannot make a program write into the wrong one. A context
/// is tied to the thread its backend is: `GlBackend` is neither `Send` nor
/// `Sync`.
pub struct RenderContext<B> {
    backend: B,
}

impl<B: Backend> RenderContext<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn bound_program(&self) -> Option<GLuint> {
        match self.backend.current_program() {
            0 => None,
            program => Some(program),
        }
    }

    /// Makes `program` the active one, skipping the driver call when it
    /// already is.
    pub fn bind(&self, program: GLuint) {
        if self.backend.current_program() == program {
            return;
        }
        trace!(program, "binding program");
        self.backend.use_program(program);
    }
}
