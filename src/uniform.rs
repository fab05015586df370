use gl::types::GLenum;
use std::{collections::HashMap, fmt};

/// Declared type of an active uniform, as reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformType {
    Bool,
    Int,
    Float,
    Mat4,
    /// Any other native type enum (vectors, samplers...).
    Other(GLenum),
}

impl UniformType {
    pub fn from_gl(ty: GLenum) -> Self {
        match ty {
            gl::BOOL => UniformType::Bool,
            gl::INT => UniformType::Int,
            gl::FLOAT => UniformType::Float,
            gl::FLOAT_MAT4 => UniformType::Mat4,
            other => UniformType::Other(other),
        }
    }

    pub fn to_gl(self) -> GLenum {
        match self {
            UniformType::Bool => gl::BOOL,
            UniformType::Int => gl::INT,
            UniformType::Float => gl::FLOAT,
            UniformType::Mat4 => gl::FLOAT_MAT4,
            UniformType::Other(other) => other,
        }
    }

    /// Sampler uniforms hold a texture unit, written and read as an `int`.
    pub fn is_sampler(self) -> bool {
        matches!(
            self,
            UniformType::Other(
                gl::SAMPLER_1D
                    | gl::SAMPLER_2D
                    | gl::SAMPLER_3D
                    | gl::SAMPLER_CUBE
                    | gl::SAMPLER_1D_SHADOW
                    | gl::SAMPLER_2D_SHADOW
                    | gl::SAMPLER_CUBE_SHADOW
                    | gl::SAMPLER_1D_ARRAY
                    | gl::SAMPLER_2D_ARRAY
                    | gl::SAMPLER_1D_ARRAY_SHADOW
                    | gl::SAMPLER_2D_ARRAY_SHADOW
                    | gl::SAMPLER_2D_RECT
                    | gl::SAMPLER_2D_RECT_SHADOW
                    | gl::SAMPLER_BUFFER
                    | gl::SAMPLER_2D_MULTISAMPLE
                    | gl::SAMPLER_2D_MULTISAMPLE_ARRAY
                    | gl::INT_SAMPLER_1D
                    | gl::INT_SAMPLER_2D
                    | gl::INT_SAMPLER_3D
                    | gl::INT_SAMPLER_CUBE
                    | gl::INT_SAMPLER_1D_ARRAY
                    | gl::INT_SAMPLER_2D_ARRAY
                    | gl::INT_SAMPLER_2D_RECT
                    | gl::INT_SAMPLER_BUFFER
                    | gl::UNSIGNED_INT_SAMPLER_1D
                    | gl::UNSIGNED_INT_SAMPLER_2D
                    | gl::UNSIGNED_INT_SAMPLER_3D
                    | gl::UNSIGNED_INT_SAMPLER_CUBE
                    | gl::UNSIGNED_INT_SAMPLER_1D_ARRAY
                    | gl::UNSIGNED_INT_SAMPLER_2D_ARRAY
                    | gl::UNSIGNED_INT_SAMPLER_2D_RECT
                    | gl::UNSIGNED_INT_SAMPLER_BUFFER
            )
        )
    }

    /// Whether a uniform declared as `self` can be read as `requested`.
    pub fn reads_as(self, requested: UniformType) -> bool {
        self == requested || (requested == UniformType::Int && self.is_sampler())
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformType::Bool => f.write_str("bool"),
            UniformType::Int => f.write_str("int"),
            UniformType::Float => f.write_str("float"),
            UniformType::Mat4 => f.write_str("mat4"),
            UniformType::Other(ty) => write!(f, "type {:#06x}", ty),
        }
    }
}

/// Strips a trailing array subscript, `weights[2]` -> `weights`. Subscripts
/// inside a struct path stay, `lights[0].intensity` is its own uniform.
fn base_name(name: &str) -> &str {
    if !name.ends_with(']') {
        return name;
    }
    match name.rfind('[') {
        Some(index) => &name[..index],
        None => name,
    }
}

/// Active uniforms of a linked program, keyed by name without a trailing
/// array subscript.
#[derive(Debug, Default)]
pub(crate) struct ActiveUniforms {
    types: HashMap<String, UniformType>,
}

impl ActiveUniforms {
    pub fn insert(&mut self, name: &str, ty: UniformType) {
        self.types.insert(base_name(name).to_owned(), ty);
    }

    pub fn get(&self, name: &str) -> Option<UniformType> {
        self.types.get(base_name(name)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, UniformType)> {
        self.types.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }
}
