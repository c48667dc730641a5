// Orientation math between runtime rotation matrices, engine Euler angles
// (pitch, yaw, roll in degrees) and quaternions.
//
// The runtime matrices decompose as R = Ry(yaw) * Rx(-pitch) * Rz(-roll).
// The negated pitch and roll are what turn the runtime's right-handed, Y-up
// frame into the engine's angle conventions.

use crate::vr_matrix::HmdMatrix34;
use std::f32::consts::FRAC_PI_2;

// |sin(pitch)| within this distance of 1 is treated as gimbal lock.
const MATRIX_POLE_EPSILON: f32 = 0.000_000_1;

// Fraction of the squared quaternion norm that marks a pole singularity.
const QUATERNION_POLE_THRESHOLD: f32 = 0.499;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VREulerAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl VREulerAngles {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> VREulerAngles {
        VREulerAngles { pitch, yaw, roll }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.pitch, self.yaw, self.roll]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRQuaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for VRQuaternion {
    fn default() -> VRQuaternion {
        VRQuaternion::identity()
    }
}

impl VRQuaternion {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> VRQuaternion {
        VRQuaternion { x, y, z, w }
    }

    pub fn identity() -> VRQuaternion {
        VRQuaternion { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }

    pub fn norm_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f32; 4]> for VRQuaternion {
    fn from(q: [f32; 4]) -> VRQuaternion {
        VRQuaternion { x: q[0], y: q[1], z: q[2], w: q[3] }
    }
}

#[inline]
pub fn matrix_to_position(matrix: &HmdMatrix34) -> [f32; 3] {
    [matrix[0][3], matrix[1][3], matrix[2][3]]
}

/// Decomposes a device-to-world matrix into engine pitch/yaw/roll degrees.
///
/// At the poles yaw is pinned to zero and the whole remaining rotation is
/// reported as roll.
pub fn matrix_to_euler(matrix: &HmdMatrix34) -> VREulerAngles {
    let m = matrix;
    let p_m = -m[1][2];

    let (a, b, c) = if p_m < -1.0 + MATRIX_POLE_EPSILON {
        // South pole
        (0.0, -FRAC_PI_2, (-m[0][1]).atan2(m[0][0]))
    } else if p_m > 1.0 - MATRIX_POLE_EPSILON {
        // North pole
        (0.0, FRAC_PI_2, (-m[0][1]).atan2(m[0][0]))
    } else {
        (m[0][2].atan2(m[2][2]), p_m.asin(), m[1][0].atan2(m[1][1]))
    };

    VREulerAngles {
        pitch: -b.to_degrees(),
        yaw: a.to_degrees(),
        roll: -c.to_degrees(),
    }
}

// Adapted from http://www.euclideanspace.com/maths/geometry/rotations/conversions/matrixToQuaternion/index.htm
#[inline]
pub fn quaternion_from_matrix(matrix: &HmdMatrix34) -> VRQuaternion {
    let m = matrix;
    let w = f32::max(0.0, 1.0 + m[0][0] + m[1][1] + m[2][2]).sqrt() * 0.5;
    let x = f32::max(0.0, 1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 0.5;
    let y = f32::max(0.0, 1.0 - m[0][0] + m[1][1] - m[2][2]).sqrt() * 0.5;
    let z = f32::max(0.0, 1.0 - m[0][0] - m[1][1] + m[2][2]).sqrt() * 0.5;

    VRQuaternion {
        x: x.copysign(m[2][1] - m[1][2]),
        y: y.copysign(m[0][2] - m[2][0]),
        z: z.copysign(m[1][0] - m[0][1]),
        w,
    }
}

// q = q_yaw * q_pitch * q_roll, roll applied first
fn euler_to_quaternion_components(angles: &VREulerAngles) -> [f32; 4] {
    let (sy, cy) = (angles.yaw.to_radians() * 0.5).sin_cos();
    let (sp, cp) = (-angles.pitch.to_radians() * 0.5).sin_cos();
    let (sr, cr) = (-angles.roll.to_radians() * 0.5).sin_cos();

    [cy * sp * cr + sy * cp * sr,
     sy * cp * cr - cy * sp * sr,
     cy * cp * sr - sy * sp * cr,
     cy * cp * cr + sy * sp * sr]
}

pub fn euler_to_quaternion(angles: &VREulerAngles) -> VRQuaternion {
    euler_to_quaternion_components(angles).into()
}

/// Same rotation as `euler_to_quaternion`, split into the vector part and the scalar part.
pub fn euler_to_quaternion_parts(angles: &VREulerAngles) -> ([f32; 3], f32) {
    let q = euler_to_quaternion_components(angles);
    ([q[0], q[1], q[2]], q[3])
}

/// Inverse of `euler_to_quaternion`, used for view orientation.
///
/// Agrees with `matrix_to_euler` away from the poles. Once the pitch term
/// passes the pole threshold the pitch snaps to +/-90 degrees, yaw is pinned
/// to zero and the remainder is reported as roll, exactly like the matrix path.
pub fn quaternion_to_euler(q: &VRQuaternion) -> VREulerAngles {
    let (x, y, z, w) = (q.x, q.y, q.z, q.w);
    let (sqx, sqy, sqz, sqw) = (x * x, y * y, z * z, w * w);
    let unit = sqx + sqy + sqz + sqw;
    let test = x * w - y * z;

    if test > QUATERNION_POLE_THRESHOLD * unit || test < -QUATERNION_POLE_THRESHOLD * unit {
        let c = (2.0 * (z * w - x * y)).atan2(sqw + sqx - sqy - sqz);
        return VREulerAngles {
            pitch: if test > 0.0 { -90.0 } else { 90.0 },
            yaw: 0.0,
            roll: -c.to_degrees(),
        };
    }

    let a = (2.0 * (x * z + y * w)).atan2(sqw - sqx - sqy + sqz);
    let b = (2.0 * test / unit).asin();
    let c = (2.0 * (x * y + z * w)).atan2(sqw - sqx + sqy - sqz);

    VREulerAngles {
        pitch: -b.to_degrees(),
        yaw: a.to_degrees(),
        roll: -c.to_degrees(),
    }
}

/// Yaw/pitch/roll extraction used by input remapping.
///
/// Heading/attitude/bank decomposition: the attitude (reported as roll) is the
/// pole axis, so at `|xy + zw| > 0.499 * norm` roll is fixed to +/-90 degrees,
/// pitch to zero and yaw absorbs the rest. Pitch and roll signs are the
/// opposite of `quaternion_to_euler`.
// Adapted from http://www.euclideanspace.com/maths/geometry/rotations/conversions/quaternionToEuler/index.htm
pub fn quaternion_to_yaw_pitch_roll(q: &VRQuaternion) -> VREulerAngles {
    let (x, y, z, w) = (q.x, q.y, q.z, q.w);
    let (sqx, sqy, sqz, sqw) = (x * x, y * y, z * z, w * w);
    let unit = sqx + sqy + sqz + sqw;
    let test = x * y + z * w;

    if test > QUATERNION_POLE_THRESHOLD * unit {
        // North pole
        return VREulerAngles {
            pitch: 0.0,
            yaw: (2.0 * x.atan2(w)).to_degrees(),
            roll: 90.0,
        };
    }
    if test < -QUATERNION_POLE_THRESHOLD * unit {
        // South pole
        return VREulerAngles {
            pitch: 0.0,
            yaw: (-2.0 * x.atan2(w)).to_degrees(),
            roll: -90.0,
        };
    }

    let heading = (2.0 * y * w - 2.0 * x * z).atan2(sqx - sqy - sqz + sqw);
    let attitude = (2.0 * test / unit).asin();
    let bank = (2.0 * x * w - 2.0 * y * z).atan2(-sqx + sqy - sqz + sqw);

    VREulerAngles {
        pitch: bank.to_degrees(),
        yaw: heading.to_degrees(),
        roll: attitude.to_degrees(),
    }
}

/// Rotates `v` by `q`. `q` must be normalized, nothing here renormalizes it.
pub fn rotate_vector_by_quaternion(v: &[f32; 3], q: &VRQuaternion) -> [f32; 3] {
    let u = [q.x, q.y, q.z];
    let t = cross(&u, v);
    let t = [2.0 * t[0], 2.0 * t[1], 2.0 * t[2]];
    let ut = cross(&u, &t);

    [v[0] + q.w * t[0] + ut[0],
     v[1] + q.w * t[1] + ut[1],
     v[2] + q.w * t[2] + ut[2]]
}

#[inline]
fn cross(a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
    [a[1] * b[2] - a[2] * b[1],
     a[2] * b[0] - a[0] * b[2],
     a[0] * b[1] - a[1] * b[0]]
}
