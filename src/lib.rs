//! Owned OpenGL shader programs with typed uniform access.
//!
//! ```no_run
//! use glsl_program::{GlBackend, RenderContext, ShaderProgram};
//!
//! # fn run(loader: impl FnMut(&'static str) -> *const std::os::raw::c_void) -> glsl_program::Result<()> {
//! // A GL context must be current on this thread.
//! let ctx = RenderContext::new(unsafe { GlBackend::load_with(loader) });
//! let program = ShaderProgram::from_files(&ctx, "shaders/triangle.vert", "shaders/triangle.frag")?;
//! program.use_program();
//! program.set_float("intensity", 0.5);
//! assert_eq!(program.get_float("intensity")?, 0.5);
//! # Ok(())
//! # }
//! ```
extern crate nalgebra_glm as glm;

pub mod backend;
pub mod context;
pub mod error;
pub mod program;
pub mod shader;
pub mod uniform;

pub use backend::{Backend, GlBackend};
pub use context::RenderContext;
pub use error::{Result, ShaderError};
pub use program::ShaderProgram;
pub use shader::ShaderStage;
pub use uniform::UniformType;
