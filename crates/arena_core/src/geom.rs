//! Box and heading math shared by the sim systems.
//!
//! Everything here is pure f32 math over [`glam`] types so systems stay
//! unit-testable without any state. Headings are yaw about +Y; the model
//! convention is that a yaw of zero points the muzzle down -Z.

use glam::{Quat, Vec3};
use std::f32::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn centered(center: Vec3, half: Vec3) -> Self {
        Self { min: center - half, max: center + half }
    }

    /// Strict inequalities on every axis: boxes sharing a face do not count
    /// as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

/// Slab-method ray/box test. Boxes behind the origin do not count; a
/// degenerate direction never hits.
pub fn ray_hits_aabb(origin: Vec3, dir: Vec3, b: &Aabb) -> bool {
    if dir.length_squared() <= 1e-12 {
        return false;
    }
    let mut tmin = 0.0_f32;
    let mut tmax = f32::INFINITY;
    for (lo, hi, o, d) in [
        (b.min.x, b.max.x, origin.x, dir.x),
        (b.min.y, b.max.y, origin.y, dir.y),
        (b.min.z, b.max.z, origin.z, dir.z),
    ] {
        if d.abs() <= 1e-6 {
            if o < lo || o > hi {
                return false;
            }
            continue;
        }
        let mut t0 = (lo - o) / d;
        let mut t1 = (hi - o) / d;
        if t0 > t1 {
            core::mem::swap(&mut t0, &mut t1);
        }
        tmin = tmin.max(t0);
        tmax = tmax.min(t1);
        if tmin > tmax {
            return false;
        }
    }
    true
}

/// Wrap a difference into [-pi, pi]; the sign picks the short way round.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let r = a.rem_euclid(TAU);
    if r > PI { r - TAU } else { r }
}

/// Wrap an absolute heading into [0, 2pi).
#[inline]
pub fn wrap_heading(a: f32) -> f32 {
    a.rem_euclid(TAU)
}

/// Yaw that points the muzzle from `from` at `to` on the ground plane.
///
/// The pi offset pairs with [`muzzle_dir`]'s back-vector convention; composed
/// they aim exactly along the displacement.
#[inline]
pub fn heading_to(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    wrap_heading(PI + d.x.atan2(d.z))
}

/// Unit muzzle direction for a yaw: the model's back vector rotated about +Y.
#[inline]
pub fn muzzle_dir(heading: f32) -> Vec3 {
    Quat::from_rotation_y(heading) * Vec3::NEG_Z
}

/// Horizontal distance, ignoring height.
#[inline]
pub fn dist_xz(a: Vec3, b: Vec3) -> f32 {
    (a.x - b.x).hypot(a.z - b.z)
}
