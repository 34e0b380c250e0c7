/// A named side-on viewpoint onto the scene's x/y plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub name: String,
    /// World position shown at the centre of the image, in metres.
    pub center: [f64; 2],
    pub pixels_per_meter: f64,
}

impl Camera {
    pub fn new(name: impl Into<String>, center: [f64; 2], pixels_per_meter: f64) -> Self {
        Self {
            name: name.into(),
            center,
            pixels_per_meter,
        }
    }

    /// Maps a world point to fractional pixel coordinates `(column, row)`.
    pub fn project(&self, point: [f64; 2], height: u32, width: u32) -> (f64, f64) {
        let col = width as f64 / 2.0 + (point[0] - self.center[0]) * self.pixels_per_meter;
        let row = height as f64 / 2.0 - (point[1] - self.center[1]) * self.pixels_per_meter;
        (col, row)
    }

    /// World point under the centre of pixel `(row, col)`.
    pub fn unproject(&self, row: usize, col: usize, height: u32, width: u32) -> [f64; 2] {
        let x = self.center[0] + (col as f64 + 0.5 - width as f64 / 2.0) / self.pixels_per_meter;
        let y = self.center[1] - (row as f64 + 0.5 - height as f64 / 2.0) / self.pixels_per_meter;
        [x, y]
    }
}

/// Models that expose cameras by name.
pub trait CameraLookup {
    fn camera(&self, name: &str) -> Option<&Camera>;

    fn camera_names(&self) -> Vec<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_projects_to_image_middle() {
        let camera = Camera::new("side", [1.0, 2.0], 50.0);
        let (col, row) = camera.project([1.0, 2.0], 100, 200);
        assert_relative_eq!(col, 100.0);
        assert_relative_eq!(row, 50.0);
    }

    #[test]
    fn test_up_is_towards_row_zero() {
        let camera = Camera::new("side", [0.0, 0.0], 10.0);
        let (_, row) = camera.project([0.0, 1.0], 100, 100);
        assert_relative_eq!(row, 40.0);
    }

    #[test]
    fn test_unproject_inverts_project_at_pixel_centres() {
        let camera = Camera::new("side", [0.5, 0.3], 40.0);
        let world = camera.unproject(12, 30, 60, 80);
        let (col, row) = camera.project(world, 60, 80);
        assert_relative_eq!(col, 30.5, epsilon = 1e-9);
        assert_relative_eq!(row, 12.5, epsilon = 1e-9);
    }
}
