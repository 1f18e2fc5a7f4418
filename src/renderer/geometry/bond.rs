//! Bond placement: the rigid transform that stretches a unit primitive
//! between two atoms, and the strand layout for multiple bonds.
//!
//! The unit primitive runs from the local origin to `(1, 0, 0)`. The
//! transform translates to the first atom, yaws about the vertical axis,
//! pitches about the depth axis and finally scales local X by the bond
//! length, so the cross-section keeps its radius.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DMat4, DVec3};

use crate::molecule::BondOrder;
use crate::options::GeometryOptions;

/// Distances below this are treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-8;

/// Rigid placement of a unit-length bond primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondTransform {
    /// Start point of the bond.
    pub translation: DVec3,
    /// Rotation about the vertical axis in radians, measured from +X toward
    /// +Z.
    pub yaw: f64,
    /// Elevation above the XZ plane in radians.
    pub pitch: f64,
    /// Bond length; zero for a degenerate bond.
    pub length: f64,
}

impl BondTransform {
    /// Transform that maps the unit primitive onto the segment `a → b`.
    ///
    /// Coincident points give a zero-length transform that draws nothing.
    #[must_use]
    pub fn between(a: DVec3, b: DVec3) -> Self {
        let delta = b - a;
        let length = delta.length();
        if length < DEGENERATE_EPSILON {
            return Self {
                translation: a,
                yaw: 0.0,
                pitch: 0.0,
                length: 0.0,
            };
        }

        let horizontal = delta.x.hypot(delta.z);
        let (yaw, pitch) = if horizontal > DEGENERATE_EPSILON {
            let phi = (delta.z / horizontal).clamp(-1.0, 1.0).asin();
            let yaw = if delta.x < 0.0 { PI - phi } else { phi };
            let pitch = (delta.y / length).clamp(-1.0, 1.0).asin();
            (yaw, pitch)
        } else if delta.y >= 0.0 {
            (0.0, FRAC_PI_2)
        } else {
            (0.0, -FRAC_PI_2)
        };

        Self {
            translation: a,
            yaw,
            pitch,
            length,
        }
    }

    /// Whether the endpoints coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length == 0.0
    }

    /// Yaw in degrees.
    #[must_use]
    pub fn yaw_degrees(&self) -> f64 {
        self.yaw.to_degrees()
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch_degrees(&self) -> f64 {
        self.pitch.to_degrees()
    }

    /// Modeling matrix for the unit primitive. Degenerate bonds collapse to
    /// a zero-scale matrix.
    #[must_use]
    pub fn matrix(&self) -> DMat4 {
        if self.is_degenerate() {
            return DMat4::from_translation(self.translation)
                * DMat4::from_scale(DVec3::ZERO);
        }
        // Turning +X toward +Z is a negative rotation about +Y.
        DMat4::from_translation(self.translation)
            * DMat4::from_axis_angle(DVec3::NEG_Y, self.yaw)
            * DMat4::from_rotation_z(self.pitch)
            * DMat4::from_scale(DVec3::new(self.length, 1.0, 1.0))
    }

    /// Matrix for a strand displaced sideways by `offset` along local Y.
    #[must_use]
    pub fn strand_matrix(&self, offset: f64) -> DMat4 {
        self.matrix() * DMat4::from_translation(DVec3::new(0.0, offset, 0.0))
    }

    /// World-space endpoints of a strand displaced by `offset`, for line
    /// rendering.
    #[must_use]
    pub fn strand_endpoints(&self, offset: f64) -> [DVec3; 2] {
        let m = self.matrix();
        [
            m.transform_point3(DVec3::new(0.0, offset, 0.0)),
            m.transform_point3(DVec3::new(1.0, offset, 0.0)),
        ]
    }
}

/// One parallel primitive of a bond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondStrand {
    /// Lateral displacement from the bond axis.
    pub offset: f64,
    /// Cylinder radius.
    pub radius: f64,
}

/// Strands used to draw a bond of the given order.
///
/// Aromatic and unspecified bonds are drawn like single bonds.
#[must_use]
pub fn primitive_layout(
    order: BondOrder,
    geometry: &GeometryOptions,
) -> Vec<BondStrand> {
    let thin = geometry.bond_radius * geometry.multi_bond_radius_scale;
    let spacing = geometry.bond_spacing;
    match order {
        BondOrder::Double => vec![
            BondStrand {
                offset: -spacing / 2.0,
                radius: thin,
            },
            BondStrand {
                offset: spacing / 2.0,
                radius: thin,
            },
        ],
        BondOrder::Triple => vec![
            BondStrand {
                offset: 0.0,
                radius: thin,
            },
            BondStrand {
                offset: -spacing,
                radius: thin,
            },
            BondStrand {
                offset: spacing,
                radius: thin,
            },
        ],
        BondOrder::Single | BondOrder::Aromatic | BondOrder::None => {
            vec![BondStrand {
                offset: 0.0,
                radius: geometry.bond_radius,
            }]
        }
    }
}
