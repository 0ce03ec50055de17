//! Orthonormal shading frames.

use glam::Vec3;

/// An orthonormal frame (tangent, bitangent, normal) at a surface point.
///
/// The normal is the local Z axis; `to_world` maps local directions
/// expressed in this frame back into world space.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub t: Vec3,
    pub bt: Vec3,
    pub n: Vec3,
}

impl Frame {
    /// Build the shading frame from the surface's positional derivatives.
    ///
    /// `n = normalize(dPdu x dPdv)`, `t = normalize(dPdu)`, `bt = t x n`.
    pub fn from_derivatives(dpdu: Vec3, dpdv: Vec3) -> Self {
        let n = dpdu.cross(dpdv).normalize();
        let t = dpdu.normalize();
        let bt = t.cross(n);
        Self { t, bt, n }
    }

    /// Transform a direction from this frame's local space to world space.
    #[inline]
    pub fn to_world(&self, v: Vec3) -> Vec3 {
        v.x * self.t + v.y * self.bt + v.z * self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_orthonormal() {
        let frame = Frame::from_derivatives(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0));

        assert!((frame.t.length() - 1.0).abs() < 1e-6);
        assert!((frame.bt.length() - 1.0).abs() < 1e-6);
        assert!((frame.n.length() - 1.0).abs() < 1e-6);

        assert!(frame.t.dot(frame.bt).abs() < 1e-6);
        assert!(frame.t.dot(frame.n).abs() < 1e-6);
        assert!(frame.bt.dot(frame.n).abs() < 1e-6);
    }

    #[test]
    fn test_frame_normal_direction() {
        // X cross Y = Z
        let frame = Frame::from_derivatives(Vec3::X, Vec3::Y);
        assert!((frame.n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_to_world_axes() {
        let frame = Frame::from_derivatives(Vec3::X, Vec3::Y);

        // Local Z maps onto the normal
        assert!((frame.to_world(Vec3::Z) - frame.n).length() < 1e-6);
        // Local X maps onto the tangent
        assert!((frame.to_world(Vec3::X) - frame.t).length() < 1e-6);
    }

    #[test]
    fn test_to_world_preserves_length() {
        let frame = Frame::from_derivatives(Vec3::new(1.0, 0.5, 0.0), Vec3::new(0.0, 1.0, 0.7));
        let v = Vec3::new(0.3, -0.2, 0.9);
        assert!((frame.to_world(v).length() - v.length()).abs() < 1e-5);
    }
}
