//! Node placement and colors shared by both renderers.

use indexmap::IndexMap;
use std::f64::consts::PI;

use crate::graph::CategoryGraph;
use crate::models::CategoryId;

/// Pull iterations applied when the graph has edges.
const PULL_ITERATIONS: usize = 60;
/// Fraction of an edge's span each endpoint moves per iteration.
const PULL_FORCE: f64 = 0.025;

/// Positions in the unit square around the origin, keyed by category id.
pub type Layout = IndexMap<CategoryId, (f64, f64)>;

/// Circular layout, then a simple spring pull along edges.
pub fn circular_pull_layout(graph: &CategoryGraph) -> Layout {
    let n = graph.node_count();
    let mut pos: Layout = graph
        .nodes()
        .enumerate()
        .map(|(i, node)| {
            let angle = 2.0 * PI * i as f64 / n as f64;
            (node.id, (angle.cos(), angle.sin()))
        })
        .collect();

    if graph.edge_count() == 0 {
        return pos;
    }

    for _ in 0..PULL_ITERATIONS {
        let mut next = pos.clone();
        for edge in graph.edges() {
            let (x1, y1) = pos[&edge.source];
            let (x2, y2) = pos[&edge.target];
            let (dx, dy) = (x2 - x1, y2 - y1);
            // Each move starts from the previous iteration's position, so a
            // node touched by several edges keeps only the last edge's pull.
            if (dx * dx + dy * dy).sqrt() > 0.0 {
                next[&edge.source] = (x1 + PULL_FORCE * dx, y1 + PULL_FORCE * dy);
                next[&edge.target] = (x2 - PULL_FORCE * dx, y2 - PULL_FORCE * dy);
            }
        }
        pos = next;
    }
    pos
}

/// `n` evenly spaced hues as `#rrggbb`.
pub fn palette(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let (r, g, b) = hsv_to_rgb(i as f64 / n as f64, 0.7, 0.9);
            format!(
                "#{:02x}{:02x}{:02x}",
                (r * 255.0) as u8,
                (g * 255.0) as u8,
                (b * 255.0) as u8
            )
        })
        .collect()
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Map `[0, 1]` onto a light-to-dark blue ramp.
pub fn blue_ramp(t: f64) -> String {
    let t = t.clamp(0.0, 1.0);
    let light = (222.0, 235.0, 247.0);
    let dark = (8.0, 48.0, 107.0);
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(light.0, dark.0),
        mix(light.1, dark.1),
        mix(light.2, dark.2)
    )
}
