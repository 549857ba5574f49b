use crate::Vec3;

/// Orthonormal basis built around a single axis `w`.
///
/// Used to carry directions sampled in a canonical frame (z up) onto a
/// surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Onb {
    /// Build a basis whose `w` axis is `n` (normalized here).
    pub fn from_w(n: Vec3) -> Self {
        let w = n.normalize();
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = w.cross(v);
        Self { u, v, w }
    }

    pub fn w(&self) -> Vec3 {
        self.w
    }

    /// Map local coordinates (a, b, c) to `a*u + b*v + c*w`.
    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(onb: &Onb) {
        let (u, v, w) = (onb.local(Vec3::X), onb.local(Vec3::Y), onb.local(Vec3::Z));
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!((v.length() - 1.0).abs() < 1e-5);
        assert!((w.length() - 1.0).abs() < 1e-5);
        assert!(u.dot(v).abs() < 1e-5);
        assert!(v.dot(w).abs() < 1e-5);
        assert!(w.dot(u).abs() < 1e-5);
    }

    #[test]
    fn test_onb_is_orthonormal() {
        for n in [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            -Vec3::Z,
            Vec3::new(1.0, 2.0, -3.0),
            Vec3::new(0.95, 0.1, 0.0),
        ] {
            let onb = Onb::from_w(n);
            assert_orthonormal(&onb);
            assert!((onb.w() - n.normalize()).length() < 1e-5);
        }
    }

    #[test]
    fn test_onb_local_maps_z_to_w() {
        let n = Vec3::new(0.0, 3.0, 4.0);
        let onb = Onb::from_w(n);

        assert!((onb.local(Vec3::Z) - n.normalize()).length() < 1e-5);
    }
}
