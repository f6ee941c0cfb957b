//! Globe geometry: lat/lon projection and the globe's placement in the world.

use nalgebra::{Matrix3, Point3, Vector3};

/// Project geographic coordinates onto a sphere of `radius` in the globe's
/// local frame (Y up).
///
/// Latitude 0 / longitude 0 lands on +X, the north pole on +Y and
/// longitude 90 on +Z. Radius must be positive; it is not checked here.
pub fn project(latitude_deg: f64, longitude_deg: f64, radius: f64) -> Point3<f64> {
    let lat = latitude_deg.to_radians();
    let lon = longitude_deg.to_radians();
    Point3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        radius * lat.cos() * lon.sin(),
    )
}

/// Where the globe sits in the world: origin plus orientation.
///
/// Supplied by the renderer; marker positions stay in globe-local
/// coordinates and are only lifted into the world through this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeFrame {
    pub origin: Point3<f64>,
    pub orientation: Matrix3<f64>,
}

impl Default for GlobeFrame {
    fn default() -> Self {
        Self {
            origin: Point3::origin(),
            orientation: Matrix3::identity(),
        }
    }
}

impl GlobeFrame {
    pub fn new(origin: Point3<f64>, orientation: Matrix3<f64>) -> Self {
        Self { origin, orientation }
    }

    /// Map a globe-local point into world coordinates
    pub fn to_world(&self, local: &Point3<f64>) -> Point3<f64> {
        self.origin + self.orientation * local.coords
    }

    /// Outward unit normal of the globe at a local point, in world space
    pub fn surface_normal(&self, local: &Point3<f64>) -> Option<Vector3<f64>> {
        (self.orientation * local.coords).try_normalize(f64::EPSILON)
    }
}

/// True when a point on the globe faces the viewer.
///
/// Only markers on the near hemisphere are interactive; anything exactly on
/// the horizon or behind it is not.
pub fn is_on_near_hemisphere(frame: &GlobeFrame, local: &Point3<f64>, viewer: &Point3<f64>) -> bool {
    let Some(normal) = frame.surface_normal(local) else {
        return false;
    };
    let world = frame.to_world(local);
    let Some(to_viewer) = (*viewer - world).try_normalize(f64::EPSILON) else {
        return false;
    };
    normal.dot(&to_viewer) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn test_project_axes() {
        let p = project(0.0, 0.0, 2.0);
        assert_close(p.x, 2.0, 1e-12);
        assert_close(p.y, 0.0, 1e-12);
        assert_close(p.z, 0.0, 1e-12);

        let north = project(90.0, 0.0, 1.0);
        assert_close(north.y, 1.0, 1e-12);

        let east = project(0.0, 90.0, 1.0);
        assert_close(east.x, 0.0, 1e-12);
        assert_close(east.z, 1.0, 1e-12);
    }

    #[test]
    fn test_project_preserves_radius() {
        for radius in [0.5, 1.0, 6371.0] {
            for lat in [-90.0, -45.5, 0.0, 34.6, 89.9] {
                for lon in [-180.0, -72.25, 0.0, 135.0, 179.99] {
                    let p = project(lat, lon, radius);
                    let dist = p.coords.norm();
                    assert_close(dist, radius, radius * 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_frame_to_world() {
        // Quarter turn about +Y
        let rot = Matrix3::new(
            0.0, 0.0, 1.0,
            0.0, 1.0, 0.0,
            -1.0, 0.0, 0.0,
        );
        let frame = GlobeFrame::new(Point3::new(10.0, 0.0, 0.0), rot);
        let world = frame.to_world(&Point3::new(1.0, 0.0, 0.0));
        assert_close(world.x, 10.0, 1e-12);
        assert_close(world.z, -1.0, 1e-12);
    }

    #[test]
    fn test_near_hemisphere() {
        let frame = GlobeFrame::default();
        let viewer = Point3::new(5.0, 0.0, 0.0);

        assert!(is_on_near_hemisphere(&frame, &project(0.0, 0.0, 1.0), &viewer));
        assert!(!is_on_near_hemisphere(&frame, &project(0.0, 180.0, 1.0), &viewer));
        assert!(!is_on_near_hemisphere(&frame, &Point3::origin(), &viewer));
    }

    #[test]
    fn test_near_hemisphere_follows_frame() {
        let viewer = Point3::new(0.0, 0.0, 5.0);
        let local = project(0.0, 0.0, 1.0);
        assert!(!is_on_near_hemisphere(&GlobeFrame::default(), &local, &viewer));

        // Rotate +X onto +Z so the same local point now faces the viewer
        let rot = Matrix3::new(
            0.0, 0.0, -1.0,
            0.0, 1.0, 0.0,
            1.0, 0.0, 0.0,
        );
        let frame = GlobeFrame::new(Point3::origin(), rot);
        assert!(is_on_near_hemisphere(&frame, &local, &viewer));
    }
}
