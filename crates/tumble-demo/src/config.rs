/// Camera and animation parameters for the cube scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeConfig {
    /// Vertical field of view.
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Distance from the eye to the cube center along -Z.
    pub camera_distance: f32,
    /// Radians added to the rotation angle every frame.
    pub angle_step: f64,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            z_near: 0.1,
            z_far: 1000.0,
            camera_distance: 6.0,
            angle_step: 0.01,
        }
    }
}
