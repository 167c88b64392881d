//! Even angular placement around a centered circle. Connectivity is not
//! consulted; edges are drawn over whatever ring this produces.

use std::f64::consts::PI;

use super::LayoutNode;

/// Place node `i` of `N` at angle `2*PI*i/N` on a circle of radius
/// `min(width, height) / 3` around the viewport center.
pub fn arrange(nodes: &mut [LayoutNode], width: f64, height: f64) {
	let count = nodes.len();
	if count == 0 {
		return;
	}
	let radius = width.min(height) / 3.0;
	let (center_x, center_y) = (width / 2.0, height / 2.0);
	for (i, node) in nodes.iter_mut().enumerate() {
		let angle = 2.0 * PI * i as f64 / count as f64;
		node.x = center_x + radius * angle.cos();
		node.y = center_y + radius * angle.sin();
	}
}
