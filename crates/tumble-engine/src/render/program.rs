//! Shader compilation and program linking.
//!
//! A "program" is a vertex shader and a fragment shader that have been
//! validated separately and then checked against each other. WGSL is parsed and
//! validated on the CPU with naga, so a broken shader is caught before it ever
//! reaches the device, and attribute/uniform locations can be looked up by name.
//!
//! The public entry points ([`compile_shader`], [`link_program`]) never fail
//! loudly: a diagnostic is logged at `warn` and `None` is returned.

use std::fmt;

/// Pipeline stage a shader is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
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

/// A `@location(n)` input or output of an entry point.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InterfaceVar {
    pub name: String,
    pub location: u32,
}

/// Bind group / binding pair of a uniform buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformLocation {
    pub group: u32,
    pub binding: u32,
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct UniformVar {
    name: String,
    location: UniformLocation,
}

/// Compile or link failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
    /// WGSL did not parse.
    Parse { label: String, message: String },
    /// WGSL parsed but failed validation.
    Validation { label: String, message: String },
    /// The module has no entry point for the requested stage.
    MissingEntryPoint { label: String, stage: ShaderStage },
    /// A stage was not supplied to the linker (its compile failed).
    MissingShader { label: String, stage: ShaderStage },
    /// The fragment stage reads a location the vertex stage never writes.
    UnmatchedVarying { label: String, name: String, location: u32 },
    /// Two uniforms disagree on name or location across stages.
    UniformConflict { label: String, name: String },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Parse { label, message } => {
                write!(f, "shader `{label}` failed to parse: {message}")
            }
            ProgramError::Validation { label, message } => {
                write!(f, "shader `{label}` failed validation: {message}")
            }
            ProgramError::MissingEntryPoint { label, stage } => {
                write!(f, "shader `{label}` has no {stage} entry point")
            }
            ProgramError::MissingShader { label, stage } => {
                write!(f, "program `{label}` cannot link without a {stage} shader")
            }
            ProgramError::UnmatchedVarying { label, name, location } => write!(
                f,
                "program `{label}`: fragment input `{name}` at location {location} is not written by the vertex stage"
            ),
            ProgramError::UniformConflict { label, name } => {
                write!(f, "program `{label}`: uniform `{name}` is bound inconsistently across stages")
            }
        }
    }
}

impl std::error::Error for ProgramError {}

// ── compiled shader ───────────────────────────────────────────────────────

/// A single validated shader stage.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    label: String,
    stage: ShaderStage,
    source: String,
    entry_point: String,
    inputs: Vec<InterfaceVar>,
    outputs: Vec<InterfaceVar>,
    uniforms: Vec<UniformVar>,
}

impl CompiledShader {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Location inputs of the entry point, sorted by location.
    pub fn inputs(&self) -> &[InterfaceVar] {
        &self.inputs
    }

    /// Location outputs of the entry point, sorted by location.
    pub fn outputs(&self) -> &[InterfaceVar] {
        &self.outputs
    }
}

/// Parses and validates `source`, reflecting the entry point for `stage`.
pub fn try_compile_shader(
    stage: ShaderStage,
    label: &str,
    source: &str,
) -> Result<CompiledShader, ProgramError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ProgramError::Parse {
        label: label.to_string(),
        message: e.to_string(),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| ProgramError::Validation {
        label: label.to_string(),
        message: e.to_string(),
    })?;

    let entry = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.naga())
        .ok_or_else(|| ProgramError::MissingEntryPoint {
            label: label.to_string(),
            stage,
        })?;

    let mut inputs = Vec::new();
    for arg in &entry.function.arguments {
        collect_locations(&module, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut inputs);
    }

    let mut outputs = Vec::new();
    if let Some(result) = &entry.function.result {
        collect_locations(&module, None, result.ty, result.binding.as_ref(), &mut outputs);
    }

    inputs.sort_by_key(|v| v.location);
    outputs.sort_by_key(|v| v.location);

    let uniforms = module
        .global_variables
        .iter()
        .filter(|(_, gv)| gv.space == naga::AddressSpace::Uniform)
        .filter_map(|(_, gv)| {
            let rb = gv.binding.as_ref()?;
            Some(UniformVar {
                name: gv.name.clone().unwrap_or_default(),
                location: UniformLocation {
                    group: rb.group,
                    binding: rb.binding,
                },
            })
        })
        .collect();

    Ok(CompiledShader {
        label: label.to_string(),
        stage,
        source: source.to_string(),
        entry_point: entry.name.clone(),
        inputs,
        outputs,
        uniforms,
    })
}

/// Compiles one shader stage; logs and returns `None` on failure.
pub fn compile_shader(stage: ShaderStage, label: &str, source: &str) -> Option<CompiledShader> {
    match try_compile_shader(stage, label, source) {
        Ok(shader) => {
            log::debug!("compiled {stage} shader `{label}` (entry `{}`)", shader.entry_point);
            Some(shader)
        }
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

/// Walks a binding or struct-of-bindings, collecting `@location` members.
fn collect_locations(
    module: &naga::Module,
    name: Option<&str>,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<InterfaceVar>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(InterfaceVar {
            name: name.unwrap_or_default().to_string(),
            location: *location,
        }),
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_locations(module, m.name.as_deref(), m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

// ── program ───────────────────────────────────────────────────────────────

/// A linked vertex + fragment pair.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    label: String,
    vertex: CompiledShader,
    fragment: CompiledShader,
    uniforms: Vec<UniformVar>,
}

impl ShaderProgram {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertex(&self) -> &CompiledShader {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledShader {
        &self.fragment
    }

    /// Vertex input location of the attribute called `name`.
    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        self.vertex
            .inputs
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.location)
    }

    /// Bind location of the uniform called `name`, from either stage.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms
            .iter()
            .find(|u| u.name == name)
            .map(|u| u.location)
    }

    /// Creates the device-side module for one stage.
    pub fn create_module(&self, device: &wgpu::Device, stage: ShaderStage) -> wgpu::ShaderModule {
        let shader = match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        };
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(shader.label.as_str()),
            source: wgpu::ShaderSource::Wgsl(shader.source.as_str().into()),
        })
    }
}

/// Links two compiled stages, checking their interface.
pub fn try_link_program(
    label: &str,
    vertex: CompiledShader,
    fragment: CompiledShader,
) -> Result<ShaderProgram, ProgramError> {
    if vertex.stage != ShaderStage::Vertex {
        return Err(ProgramError::MissingShader {
            label: label.to_string(),
            stage: ShaderStage::Vertex,
        });
    }
    if fragment.stage != ShaderStage::Fragment {
        return Err(ProgramError::MissingShader {
            label: label.to_string(),
            stage: ShaderStage::Fragment,
        });
    }

    for input in &fragment.inputs {
        if !vertex.outputs.iter().any(|o| o.location == input.location) {
            return Err(ProgramError::UnmatchedVarying {
                label: label.to_string(),
                name: input.name.clone(),
                location: input.location,
            });
        }
    }

    let mut uniforms: Vec<UniformVar> = Vec::new();
    for u in vertex.uniforms.iter().chain(&fragment.uniforms) {
        match uniforms
            .iter()
            .find(|e| e.name == u.name || e.location == u.location)
        {
            Some(existing) if existing == u => {}
            Some(_) => {
                return Err(ProgramError::UniformConflict {
                    label: label.to_string(),
                    name: u.name.clone(),
                });
            }
            None => uniforms.push(u.clone()),
        }
    }

    Ok(ShaderProgram {
        label: label.to_string(),
        vertex,
        fragment,
        uniforms,
    })
}

/// Links a program from the results of [`compile_shader`].
///
/// A missing stage or a failed interface check is logged and yields `None`.
pub fn link_program(
    label: &str,
    vertex: Option<CompiledShader>,
    fragment: Option<CompiledShader>,
) -> Option<ShaderProgram> {
    let result = match (vertex, fragment) {
        (Some(vs), Some(fs)) => try_link_program(label, vs, fs),
        (None, _) => Err(ProgramError::MissingShader {
            label: label.to_string(),
            stage: ShaderStage::Vertex,
        }),
        (_, None) => Err(ProgramError::MissingShader {
            label: label.to_string(),
            stage: ShaderStage::Fragment,
        }),
    };

    match result {
        Ok(program) => {
            log::debug!("linked program `{label}`");
            Some(program)
        }
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = r#"
        @group(0) @binding(0) var<uniform> model_view: mat4x4<f32>;
        @group(0) @binding(1) var<uniform> projection: mat4x4<f32>;

        struct VertexInput {
            @location(0) position: vec3<f32>,
            @location(1) normal: vec3<f32>,
        };

        struct VertexOutput {
            @builtin(position) clip_position: vec4<f32>,
            @location(0) normal: vec3<f32>,
        };

        @vertex
        fn vs_main(in: VertexInput) -> VertexOutput {
            var out: VertexOutput;
            out.clip_position = projection * model_view * vec4<f32>(in.position, 1.0);
            out.normal = in.normal;
            return out;
        }
    "#;

    const FS: &str = r#"
        @fragment
        fn fs_main(@location(0) normal: vec3<f32>) -> @location(0) vec4<f32> {
            return vec4<f32>(normalize(normal), 1.0);
        }
    "#;

    const FS_WRONG_VARYING: &str = r#"
        @fragment
        fn fs_main(@location(3) tint: vec3<f32>) -> @location(0) vec4<f32> {
            return vec4<f32>(tint, 1.0);
        }
    "#;

    const FS_CONFLICTING_UNIFORM: &str = r#"
        @group(0) @binding(0) var<uniform> tint: vec4<f32>;

        @fragment
        fn fs_main(@location(0) normal: vec3<f32>) -> @location(0) vec4<f32> {
            return tint * vec4<f32>(normal, 1.0);
        }
    "#;

    fn vs() -> CompiledShader {
        try_compile_shader(ShaderStage::Vertex, "vs", VS).unwrap()
    }

    fn fs(src: &str) -> CompiledShader {
        try_compile_shader(ShaderStage::Fragment, "fs", src).unwrap()
    }

    // ── compile ───────────────────────────────────────────────────────────

    #[test]
    fn reflects_vertex_interface() {
        let s = vs();
        assert_eq!(s.entry_point(), "vs_main");
        let names: Vec<_> = s.inputs().iter().map(|v| (v.name.as_str(), v.location)).collect();
        assert_eq!(names, [("position", 0), ("normal", 1)]);
        assert_eq!(s.outputs().len(), 1);
    }

    #[test]
    fn reflects_fragment_arguments() {
        let s = fs(FS);
        assert_eq!(s.inputs(), [InterfaceVar { name: "normal".into(), location: 0 }]);
    }

    #[test]
    fn syntax_error_is_a_parse_error() {
        let err = try_compile_shader(ShaderStage::Vertex, "broken", "fn main( {").unwrap_err();
        assert!(matches!(err, ProgramError::Parse { .. }));
    }

    #[test]
    fn type_error_is_reported() {
        let src = r#"
            @vertex
            fn vs_main() -> @builtin(position) vec4<f32> {
                return 1.0;
            }
        "#;
        assert!(try_compile_shader(ShaderStage::Vertex, "bad-return", src).is_err());
    }

    #[test]
    fn wrong_stage_is_missing_entry_point() {
        let err = try_compile_shader(ShaderStage::Vertex, "fs-as-vs", FS).unwrap_err();
        assert_eq!(
            err,
            ProgramError::MissingEntryPoint { label: "fs-as-vs".into(), stage: ShaderStage::Vertex }
        );
    }

    #[test]
    fn malformed_source_yields_none_without_panicking() {
        assert!(compile_shader(ShaderStage::Fragment, "garbage", "this is not wgsl").is_none());
    }

    #[test]
    fn error_message_names_the_shader() {
        let err = try_compile_shader(ShaderStage::Vertex, "cube.vert", "}").unwrap_err();
        assert!(err.to_string().contains("cube.vert"));
    }

    // ── link ──────────────────────────────────────────────────────────────

    #[test]
    fn links_and_resolves_locations() {
        let p = try_link_program("cube", vs(), fs(FS)).unwrap();
        assert_eq!(p.attrib_location("position"), Some(0));
        assert_eq!(p.attrib_location("normal"), Some(1));
        assert_eq!(p.attrib_location("uv"), None);
        assert_eq!(p.uniform_location("model_view"), Some(UniformLocation { group: 0, binding: 0 }));
        assert_eq!(p.uniform_location("projection"), Some(UniformLocation { group: 0, binding: 1 }));
    }

    #[test]
    fn unmatched_varying_fails_link() {
        let err = try_link_program("cube", vs(), fs(FS_WRONG_VARYING)).unwrap_err();
        assert!(matches!(err, ProgramError::UnmatchedVarying { location: 3, .. }));
    }

    #[test]
    fn conflicting_uniform_binding_fails_link() {
        let err = try_link_program("cube", vs(), fs(FS_CONFLICTING_UNIFORM)).unwrap_err();
        assert!(matches!(err, ProgramError::UniformConflict { .. }));
    }

    #[test]
    fn stages_in_wrong_slots_fail_link() {
        let err = try_link_program("swapped", fs(FS), vs()).unwrap_err();
        assert!(matches!(err, ProgramError::MissingShader { .. }));
    }

    #[test]
    fn missing_stage_yields_none() {
        let vertex = compile_shader(ShaderStage::Vertex, "vs", VS);
        let fragment = compile_shader(ShaderStage::Fragment, "fs", "nope");
        assert!(link_program("cube", vertex, fragment).is_none());
    }

    #[test]
    fn link_program_happy_path() {
        let p = link_program("cube", Some(vs()), Some(fs(FS))).unwrap();
        assert_eq!(p.label(), "cube");
        assert_eq!(p.vertex().stage(), ShaderStage::Vertex);
        assert_eq!(p.fragment().entry_point(), "fs_main");
    }
}
