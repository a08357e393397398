//! Property-based tests for normalization and emission invariants using
//! the `proptest` crate.

use proptest::prelude::*;

use rbe_assembly::{ContactForce, Interface, InterfaceEdge};
use rbe_types::{BlockId, Color, Frame, Point3d};
use rbe_viz::shading::{classify, interface_colors};
use rbe_viz::vectors::{interface_force_lines, ForceVectorStyle};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary non-negative force magnitude, spanning negligible to huge.
fn arb_magnitude() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        0.0f64..1e-3,
        0.0f64..1.0,
        0.0f64..1e6,
    ]
}

fn arb_force() -> impl Strategy<Value = ContactForce> {
    (arb_magnitude(), arb_magnitude()).prop_map(|(c_np, c_nn)| ContactForce { c_np, c_nn })
}

fn arb_forces() -> impl Strategy<Value = Vec<ContactForce>> {
    prop::collection::vec(arb_force(), 1..12)
}

fn edge_with(forces: Vec<ContactForce>) -> InterfaceEdge {
    let mut interface = Interface::new(
        (0..forces.len())
            .map(|i| Point3d::new(i as f64, 0.0, 0.0))
            .collect(),
        Frame::WORLD_XY,
    );
    interface.set_forces(forces).unwrap();
    InterfaceEdge {
        u: BlockId(0),
        v: BlockId(1),
        interface,
    }
}

// ---------------------------------------------------------------------------
// 1. Every normalized intensity lies in [0, 1]
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn normalized_intensity_in_unit_range(forces in arb_forces()) {
        for s in classify(&forces) {
            let t = s.intensity();
            prop_assert!((0.0..=1.0).contains(&t), "intensity out of range: {}", t);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Color count is point count, +1 only above 4 points
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn color_count_matches_polygon_size(forces in arb_forces()) {
        let n = forces.len();
        let edge = edge_with(forces);
        let colors = interface_colors(&edge.interface).unwrap();
        let expected = if n > 4 { n + 1 } else { n };
        prop_assert_eq!(colors.len(), expected);
    }
}

// ---------------------------------------------------------------------------
// 3. Negligible compression always classifies as tension-dominant
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn negligible_compression_is_tension_dominant(
        c_np in 0.0f64..1e-3,
        c_nn in arb_magnitude(),
    ) {
        let shadings = classify(&[ContactForce { c_np, c_nn }]);
        let is_tension = matches!(
            shadings[0],
            rbe_viz::shading::PointShading::Tension { .. }
        );
        prop_assert!(is_tension);
    }
}

// ---------------------------------------------------------------------------
// 4. A force vector exists iff scale * magnitude strictly exceeds eps
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn emission_obeys_strict_threshold(
        forces in arb_forces(),
        scale in 1e-3f64..10.0,
        eps in 0.0f64..0.1,
    ) {
        let style = ForceVectorStyle {
            scale,
            eps,
            compression: Color::BLUE,
            tension: Color::RED,
        };
        let edge = edge_with(forces.clone());
        let lines = interface_force_lines("asm", &edge, &style);

        let expected: usize = forces
            .iter()
            .map(|f| {
                usize::from(scale * f.c_np > eps) + usize::from(scale * f.c_nn > eps)
            })
            .sum();
        prop_assert_eq!(lines.len(), expected);
    }
}

// ---------------------------------------------------------------------------
// 5. Emitted vector length equals the scaled magnitude
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn vector_length_is_scaled_magnitude(
        c_np in 1e-2f64..1e3,
        scale in 1e-2f64..10.0,
    ) {
        let style = ForceVectorStyle {
            scale,
            eps: 1e-6,
            compression: Color::BLUE,
            tension: Color::RED,
        };
        let edge = edge_with(vec![ContactForce { c_np, c_nn: 0.0 }]);
        let lines = interface_force_lines("asm", &edge, &style);
        prop_assert_eq!(lines.len(), 1);
        let line = &lines[0].1;
        let length = (line.end - line.start).length();
        prop_assert!((length - scale * c_np).abs() < 1e-9 * (1.0 + length));
    }
}
