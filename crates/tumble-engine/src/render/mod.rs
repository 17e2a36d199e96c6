//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, bind groups) and record
//! passes into the frame's [`RenderTarget`]. Shader sources go through
//! [`program`] before any pipeline is built from them.

mod ctx;
pub mod program;

pub use ctx::{RenderCtx, RenderTarget};
pub use program::{
    compile_shader, link_program, CompiledShader, ProgramError, ShaderProgram, ShaderStage,
    UniformLocation,
};
