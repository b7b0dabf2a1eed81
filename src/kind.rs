//! The object kinds the crate knows how to manage. Each one is a
//! stateless strategy wiring [`ResourceKind`] (and, where the object is
//! bindable, [`Bind`] or [`TargetedBind`]) to the matching GL entry
//! points. Every call goes through [`check_gl!`](crate::check_gl).

use gl::types::{GLenum, GLuint};

use crate::check_gl;
use crate::resource::{Bind, ResourceKind, TargetedBind};

/// Program objects. Not bindable here: activating a program is
/// `glUseProgram`, which is draw state, not an object binding.
#[derive(Debug)]
pub struct Program;

impl ResourceKind for Program {
    type Params = ();

    fn generate(_params: ()) -> GLuint {
        unsafe { check_gl!(gl::CreateProgram()) }
    }

    fn destroy(id: GLuint) {
        unsafe { check_gl!(gl::DeleteProgram(id)) }
    }
}

/// Which pipeline stage a shader object compiles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderStage {
    pub fn to_raw(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
            ShaderStage::TessControl => gl::TESS_CONTROL_SHADER,
            ShaderStage::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            ShaderStage::Compute => gl::COMPUTE_SHADER,
        }
    }
}

/// Shader objects; generation takes the stage to compile for.
#[derive(Debug)]
pub struct Shader;

impl ResourceKind for Shader {
    type Params = ShaderStage;

    fn generate(stage: ShaderStage) -> GLuint {
        unsafe { check_gl!(gl::CreateShader(stage.to_raw())) }
    }

    fn destroy(id: GLuint) {
        unsafe { check_gl!(gl::DeleteShader(id)) }
    }
}

/// Buffer objects, bound at `GL_ARRAY_BUFFER`.
#[derive(Debug)]
pub struct Buffer;

impl ResourceKind for Buffer {
    type Params = ();

    fn generate(_params: ()) -> GLuint {
        let mut id = 0;
        unsafe { check_gl!(gl::GenBuffers(1, &mut id)) };
        id
    }

    fn destroy(id: GLuint) {
        unsafe { check_gl!(gl::DeleteBuffers(1, &id)) };
    }
}

impl Bind for Buffer {
    fn bind(id: GLuint) {
        unsafe { check_gl!(gl::BindBuffer(gl::ARRAY_BUFFER, id)) };
    }
}

/// Vertex array objects.
#[derive(Debug)]
pub struct VertexArray;

impl ResourceKind for VertexArray {
    type Params = ();

    fn generate(_params: ()) -> GLuint {
        let mut id = 0;
        unsafe { check_gl!(gl::GenVertexArrays(1, &mut id)) };
        id
    }

    fn destroy(id: GLuint) {
        unsafe { check_gl!(gl::DeleteVertexArrays(1, &id)) };
    }
}

impl Bind for VertexArray {
    fn bind(id: GLuint) {
        unsafe { check_gl!(gl::BindVertexArray(id)) };
    }
}

/// Read and draw framebuffer bindings are independent; `Both` sets the
/// two at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferTarget {
    Both,
    Read,
    Draw,
}

impl FramebufferTarget {
    pub fn to_raw(self) -> GLenum {
        match self {
            FramebufferTarget::Both => gl::FRAMEBUFFER,
            FramebufferTarget::Read => gl::READ_FRAMEBUFFER,
            FramebufferTarget::Draw => gl::DRAW_FRAMEBUFFER,
        }
    }
}

/// Framebuffer objects.
#[derive(Debug)]
pub struct Framebuffer;

impl ResourceKind for Framebuffer {
    type Params = ();

    fn generate(_params: ()) -> GLuint {
        let mut id = 0;
        unsafe { check_gl!(gl::GenFramebuffers(1, &mut id)) };
        id
    }

    fn destroy(id: GLuint) {
        unsafe { check_gl!(gl::DeleteFramebuffers(1, &id)) };
    }
}

impl TargetedBind for Framebuffer {
    type Target = FramebufferTarget;

    fn bind(target: FramebufferTarget, id: GLuint) {
        unsafe { check_gl!(gl::BindFramebuffer(target.to_raw(), id)) };
    }
}

/// GL defines a single renderbuffer target; the targeted shape is kept
/// anyway so the unbind path is uniform with the other targeted kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderbufferTarget {
    Renderbuffer,
}

impl RenderbufferTarget {
    pub fn to_raw(self) -> GLenum {
        match self {
            RenderbufferTarget::Renderbuffer => gl::RENDERBUFFER,
        }
    }
}

/// Renderbuffer objects.
#[derive(Debug)]
pub struct Renderbuffer;

impl ResourceKind for Renderbuffer {
    type Params = ();

    fn generate(_params: ()) -> GLuint {
        let mut id = 0;
        unsafe { check_gl!(gl::GenRenderbuffers(1, &mut id)) };
        id
    }

    fn destroy(id: GLuint) {
        unsafe { check_gl!(gl::DeleteRenderbuffers(1, &id)) };
    }
}

impl TargetedBind for Renderbuffer {
    type Target = RenderbufferTarget;

    fn bind(target: RenderbufferTarget, id: GLuint) {
        unsafe { check_gl!(gl::BindRenderbuffer(target.to_raw(), id)) };
    }
}

/// Texture binding points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
    D1,
    D2,
    D3,
    D1Array,
    D2Array,
    Rectangle,
    CubeMap,
    CubeMapArray,
}

impl TextureTarget {
    pub fn to_raw(self) -> GLenum {
        match self {
            TextureTarget::D1 => gl::TEXTURE_1D,
            TextureTarget::D2 => gl::TEXTURE_2D,
            TextureTarget::D3 => gl::TEXTURE_3D,
            TextureTarget::D1Array => gl::TEXTURE_1D_ARRAY,
            TextureTarget::D2Array => gl::TEXTURE_2D_ARRAY,
            TextureTarget::Rectangle => gl::TEXTURE_RECTANGLE,
            TextureTarget::CubeMap => gl::TEXTURE_CUBE_MAP,
            TextureTarget::CubeMapArray => gl::TEXTURE_CUBE_MAP_ARRAY,
        }
    }
}

/// Texture objects.
#[derive(Debug)]
pub struct Texture;

impl ResourceKind for Texture {
    type Params = ();

    fn generate(_params: ()) -> GLuint {
        let mut id = 0;
        unsafe { check_gl!(gl::GenTextures(1, &mut id)) };
        id
    }

    fn destroy(id: GLuint) {
        unsafe { check_gl!(gl::DeleteTextures(1, &id)) };
    }
}

impl TargetedBind for Texture {
    type Target = TextureTarget;

    fn bind(target: TextureTarget, id: GLuint) {
        unsafe { check_gl!(gl::BindTexture(target.to_raw(), id)) };
    }
}
