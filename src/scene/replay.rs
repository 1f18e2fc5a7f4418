//! Resolve a command list into world-space primitives.
//!
//! Walks the list with a modeling-matrix stack and the current color, the
//! way a backend would while replaying it. Unbalanced pops are ignored.

use glam::{DMat4, DVec3};

use crate::renderer::{DrawCommand, Rgb};

/// A primitive with its transform applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Sphere.
    Sphere {
        /// World-space center.
        center: DVec3,
        /// World-space radius.
        radius: f64,
        /// Flat color.
        color: Rgb,
    },
    /// Cylinder between two points.
    Cylinder {
        /// Base center.
        start: DVec3,
        /// Top center.
        end: DVec3,
        /// World-space base radius.
        radius: f64,
        /// Flat color.
        color: Rgb,
    },
    /// Line segment.
    Line {
        /// First endpoint.
        start: DVec3,
        /// Second endpoint.
        end: DVec3,
        /// Flat color.
        color: Rgb,
    },
    /// Stroked text anchored in the scene.
    Text {
        /// Text.
        text: String,
        /// World-space anchor.
        anchor: DVec3,
        /// Flat color.
        color: Rgb,
    },
    /// Screen-aligned label.
    Label {
        /// Text.
        text: String,
        /// World-space anchor.
        anchor: DVec3,
        /// Flat color.
        color: Rgb,
    },
}

/// Flatten `commands` into primitives in emission order.
#[must_use]
pub fn resolve(commands: &[DrawCommand]) -> Vec<Primitive> {
    let mut stack: Vec<DMat4> = Vec::new();
    let mut current = DMat4::IDENTITY;
    let mut color: Rgb = [1.0; 3];
    let mut out = Vec::new();

    for command in commands {
        match command {
            DrawCommand::SetColor(c) => color = *c,
            DrawCommand::PushMatrix => stack.push(current),
            DrawCommand::PopMatrix => {
                if let Some(previous) = stack.pop() {
                    current = previous;
                }
            }
            DrawCommand::MultMatrix(m) => current *= *m,
            DrawCommand::Lines(segments) => {
                out.extend(segments.iter().map(|[a, b]| Primitive::Line {
                    start: current.transform_point3(*a),
                    end: current.transform_point3(*b),
                    color,
                }));
            }
            DrawCommand::Sphere { radius, .. } => out.push(Primitive::Sphere {
                center: current.transform_point3(DVec3::ZERO),
                radius: radius * current.transform_vector3(DVec3::Y).length(),
                color,
            }),
            DrawCommand::Cylinder {
                base_radius,
                length,
                ..
            } => out.push(Primitive::Cylinder {
                start: current.transform_point3(DVec3::ZERO),
                end: current.transform_point3(DVec3::new(*length, 0.0, 0.0)),
                radius: base_radius
                    * current.transform_vector3(DVec3::Y).length(),
                color,
            }),
            DrawCommand::StrokeText { text, .. } => out.push(Primitive::Text {
                text: text.clone(),
                anchor: current.transform_point3(DVec3::ZERO),
                color,
            }),
            DrawCommand::Label { text, position } => {
                out.push(Primitive::Label {
                    text: text.clone(),
                    anchor: current.transform_point3(*position),
                    color,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_restores_transform() {
        let commands = vec![
            DrawCommand::SetColor([0.0, 1.0, 0.0]),
            DrawCommand::PushMatrix,
            DrawCommand::MultMatrix(DMat4::from_translation(DVec3::X)),
            DrawCommand::Sphere {
                radius: 0.5,
                slices: 4,
                stacks: 4,
            },
            DrawCommand::PopMatrix,
            DrawCommand::Sphere {
                radius: 0.5,
                slices: 4,
                stacks: 4,
            },
        ];
        let primitives = resolve(&commands);
        assert_eq!(
            primitives,
            vec![
                Primitive::Sphere {
                    center: DVec3::X,
                    radius: 0.5,
                    color: [0.0, 1.0, 0.0],
                },
                Primitive::Sphere {
                    center: DVec3::ZERO,
                    radius: 0.5,
                    color: [0.0, 1.0, 0.0],
                },
            ]
        );
    }

    #[test]
    fn cylinder_follows_scaled_axis() {
        let m = DMat4::from_translation(DVec3::new(0.0, 0.0, 1.0))
            * DMat4::from_scale(DVec3::new(3.0, 1.0, 1.0));
        let primitives = resolve(&[
            DrawCommand::MultMatrix(m),
            DrawCommand::Cylinder {
                base_radius: 0.2,
                top_radius: 0.2,
                length: 1.0,
                slices: 6,
            },
        ]);
        match &primitives[0] {
            Primitive::Cylinder {
                start, end, radius, ..
            } => {
                assert!(start.abs_diff_eq(DVec3::Z, 1e-12));
                assert!(end.abs_diff_eq(DVec3::new(3.0, 0.0, 1.0), 1e-12));
                assert!((radius - 0.2).abs() < 1e-12);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn unbalanced_pop_is_ignored() {
        let primitives = resolve(&[
            DrawCommand::PopMatrix,
            DrawCommand::Lines(vec![[DVec3::ZERO, DVec3::ONE]]),
        ]);
        assert_eq!(primitives.len(), 1);
    }
}
