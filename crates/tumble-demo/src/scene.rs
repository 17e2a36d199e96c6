//! Transform state for the spinning cube.

use std::f64::consts::TAU;

use glam::{Mat4, Vec3};

use crate::config::CubeConfig;

/// Perspective projection for `config` at the given aspect ratio (0..1 depth).
pub fn projection_for(config: &CubeConfig, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(
        config.fov_y_degrees.to_radians(),
        aspect,
        config.z_near,
        config.z_far,
    )
}

/// `translate(0, 0, -distance) · rotateX(angle) · rotateY(angle)`.
pub fn model_view_for(angle: f32, distance: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -distance))
        * Mat4::from_rotation_x(angle)
        * Mat4::from_rotation_y(angle)
}

/// Matrices uploaded to the cube's uniform buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeUniforms {
    pub model_view: Mat4,
    pub projection: Mat4,
}

/// Rotation angle plus the matrices derived from it.
///
/// The projection is fixed at construction; only the model-view moves. The
/// angle accumulates in `f64` and is reduced modulo a full turn before it
/// reaches the `f32` matrix math.
#[derive(Debug, Clone)]
pub struct CubeScene {
    config: CubeConfig,
    projection: Mat4,
    model_view: Mat4,
    angle: f64,
}

impl CubeScene {
    pub fn new(config: CubeConfig, aspect: f32) -> Self {
        Self {
            projection: projection_for(&config, aspect),
            model_view: Mat4::IDENTITY,
            angle: 0.0,
            config,
        }
    }

    /// Advances the angle by one step and rebuilds the model-view.
    pub fn tick(&mut self) {
        self.angle += self.config.angle_step;
        let turn = self.angle.rem_euclid(TAU) as f32;
        self.model_view = model_view_for(turn, self.config.camera_distance);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn model_view(&self) -> Mat4 {
        self.model_view
    }

    pub fn uniforms(&self) -> CubeUniforms {
        CubeUniforms {
            model_view: self.model_view(),
            projection: self.projection(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn scene() -> CubeScene {
        CubeScene::new(CubeConfig::default(), 800.0 / 600.0)
    }

    // ── angle ─────────────────────────────────────────────────────────────

    #[test]
    fn starts_at_zero_with_identity_model_view() {
        let s = scene();
        assert_eq!(s.angle, 0.0);
        assert_eq!(s.model_view(), Mat4::IDENTITY);
    }

    #[test]
    fn angle_strictly_increases_by_the_step() {
        let mut s = scene();
        let mut prev = s.angle;
        for _ in 0..1000 {
            s.tick();
            assert!(s.angle > prev);
            assert!((s.angle - prev - 0.01).abs() < 1e-12);
            prev = s.angle;
        }
    }

    #[test]
    fn step_stays_exact_after_days_of_spinning() {
        let mut s = scene();
        // Roughly 32 hours, 6 days and 6 months at 60 fps.
        for start in [70_000.0, 300_000.0, 1.0e7] {
            s.angle = start;
            let prev_model_view = s.model_view();
            s.tick();
            assert!(s.angle > start, "angle stopped increasing at {start}");
            assert!((s.angle - start - 0.01).abs() < 1e-8, "step drifted at {start}");
            assert_ne!(s.model_view(), prev_model_view);
        }
    }

    #[test]
    fn model_view_uses_the_angle_within_one_turn() {
        let mut s = scene();
        s.angle = TAU * 1000.0;
        s.tick();
        let expected = model_view_for(0.01, 6.0);
        assert!(s.model_view().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn custom_step_is_honoured() {
        let config = CubeConfig {
            angle_step: 0.5,
            ..CubeConfig::default()
        };
        let mut s = CubeScene::new(config, 1.0);
        s.tick();
        s.tick();
        assert_eq!(s.angle, 1.0);
    }

    // ── model-view ────────────────────────────────────────────────────────

    #[test]
    fn model_view_keeps_cube_six_units_away() {
        let mut s = scene();
        for _ in 0..50 {
            s.tick();
            assert_eq!(s.model_view().w_axis, Vec4::new(0.0, 0.0, -6.0, 1.0));
        }
    }

    #[test]
    fn model_view_changes_every_tick() {
        let mut s = scene();
        let mut prev = s.model_view();
        for _ in 0..300 {
            s.tick();
            assert_ne!(s.model_view(), prev);
            prev = s.model_view();
        }
    }

    #[test]
    fn rotation_is_x_then_y() {
        let a = 0.3_f32;
        let m = model_view_for(a, 0.0);
        let expected = Mat4::from_rotation_x(a) * Mat4::from_rotation_y(a);
        assert!(m.abs_diff_eq(expected, 1e-6));
        // Y is applied to the vertex first, so +X leaves the X axis only through Y.
        let p = m.transform_point3(Vec3::X);
        let about_y = Vec3::new(a.cos(), 0.0, -a.sin());
        assert!(p.abs_diff_eq(Mat4::from_rotation_x(a).transform_point3(about_y), 1e-6));
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn projection_matches_the_field_of_view() {
        let s = scene();
        let f = 1.0 / (75.0_f32.to_radians() * 0.5).tan();
        assert!((s.projection().y_axis.y - f).abs() < 1e-5);
        assert!((s.projection().x_axis.x - f / (800.0 / 600.0)).abs() < 1e-5);
    }

    #[test]
    fn projection_never_changes() {
        let mut s = scene();
        let initial = s.projection();
        for _ in 0..500 {
            s.tick();
            assert_eq!(s.projection(), initial);
        }
    }

    #[test]
    fn uniforms_mirror_current_matrices() {
        let mut s = scene();
        s.tick();
        let u = s.uniforms();
        assert_eq!(u.model_view, s.model_view());
        assert_eq!(u.projection, s.projection());
    }
}
