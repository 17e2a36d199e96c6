/// Linear premultiplied RGBA color.
///
/// Invariant: `rgb` components are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);

    /// Creates a color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Clear value for a render pass color attachment.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_clears_to_opaque_black() {
        assert_eq!(Color::BLACK.to_wgpu(), wgpu::Color::BLACK);
    }

    #[test]
    fn premultiplied_components_pass_through() {
        let c = Color::from_premul(0.5, 0.25, 0.0, 0.5).to_wgpu();
        assert_eq!(c, wgpu::Color { r: 0.5, g: 0.25, b: 0.0, a: 0.5 });
    }
}
