//! Tiered left-to-right placement of a [`FlowGraph`].
//!
//! Levels are columns `level_gap` apart; nodes in a column are stacked and
//! centered on the scene's mid-height. Connectors are cubic curves from the
//! right edge of the source box to the left edge of the target box.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::error::FlowError;
use super::types::{EdgeKey, FlowGraph, NodeId, Position};

/// Geometry of the diagram, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Horizontal distance between the left edges of consecutive levels.
	pub level_gap: f64,
	/// Width of a node box.
	pub node_width: f64,
	/// Height of a node box.
	pub node_height: f64,
	/// Vertical gap between stacked nodes of one level.
	pub node_gap: f64,
	/// Floor for the container height.
	pub min_height: f64,
	/// Space above and below the tallest column.
	pub vertical_padding: f64,
	/// Room kept right of the last column.
	pub scene_margin: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			level_gap: 400.0,
			node_width: 240.0,
			node_height: 60.0,
			node_gap: 100.0,
			min_height: 400.0,
			vertical_padding: 60.0,
			scene_margin: 60.0,
		}
	}
}

/// A cubic bezier connector plus the point its label sits on.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct EdgePath {
	pub start: Position,
	pub control1: Position,
	pub control2: Position,
	pub end: Position,
	pub midpoint: Position,
}

impl EdgePath {
	/// Curve leaving `start` and entering `end` horizontally.
	pub fn between(start: Position, end: Position) -> Self {
		let control_x = start.x + (end.x - start.x) / 2.0;
		Self {
			start,
			control1: Position::new(control_x, start.y),
			control2: Position::new(control_x, end.y),
			end,
			// With both controls on the horizontal midline the curve is point
			// symmetric, so B(0.5) is the plain average of the anchors.
			midpoint: Position::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0),
		}
	}

	/// Sample the curve at parameter t in [0, 1].
	pub fn sample(&self, t: f64) -> Position {
		let mt = 1.0 - t;
		let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
		Position::new(
			a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
			a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
		)
	}

	/// SVG path data, `M sx sy C c1x c1y, c2x c2y, ex ey`.
	pub fn to_svg(&self) -> String {
		format!(
			"M {} {} C {} {}, {} {}, {} {}",
			self.start.x,
			self.start.y,
			self.control1.x,
			self.control1.y,
			self.control2.x,
			self.control2.y,
			self.end.x,
			self.end.y
		)
	}
}

/// Where everything goes for one graph at one container width.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowLayout {
	/// Left edge and vertical center of every node box.
	pub positions: BTreeMap<NodeId, Position>,
	/// Keyed by [`GraphEdge::key`](super::types::GraphEdge::key).
	pub edge_paths: BTreeMap<EdgeKey, EdgePath>,
	/// Height of the scene.
	pub container_height: f64,
	/// Width of the scene, at least the container width.
	pub scene_width: f64,
}

/// Pure placement of a [`FlowGraph`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutEngine {
	/// Geometry used for every layout.
	pub config: LayoutConfig,
}

impl LayoutEngine {
	/// Engine with the given geometry.
	pub fn new(config: LayoutConfig) -> Self {
		Self { config }
	}

	fn step(&self) -> f64 {
		self.config.node_height + self.config.node_gap
	}

	/// Height needed by the tallest column, never below `min_height`.
	pub fn container_height(&self, graph: &FlowGraph) -> f64 {
		let tallest = graph.levels.values().map(Vec::len).max().unwrap_or(0);
		if tallest == 0 {
			return self.config.min_height;
		}
		let stacked = tallest as f64 * self.config.node_height
			+ (tallest - 1) as f64 * self.config.node_gap
			+ 2.0 * self.config.vertical_padding;
		stacked.max(self.config.min_height)
	}

	/// Place every node and route every edge. Returns `None` while the
	/// container has no usable width yet; callers retry on the next tick.
	pub fn layout(&self, graph: &FlowGraph, container_width: f64) -> Option<FlowLayout> {
		if !container_width.is_finite() || container_width <= 0.0 {
			debug!("layout skipped, container width {container_width}");
			return None;
		}

		let container_height = self.container_height(graph);
		let center_y = container_height / 2.0;
		let step = self.step();

		let mut positions = BTreeMap::new();
		let mut rightmost: f64 = 0.0;
		for (&level, ids) in graph.levels.iter().filter(|(_, ids)| !ids.is_empty()) {
			let x = level as f64 * self.config.level_gap;
			let half_span = (ids.len() - 1) as f64 / 2.0;
			for (i, id) in ids.iter().enumerate() {
				let y = center_y + (i as f64 - half_span) * step;
				positions.insert(id.clone(), Position::new(x, y));
			}
			rightmost = rightmost.max(x + self.config.node_width);
		}

		let mut edge_paths = BTreeMap::new();
		for edge in &graph.edges {
			let (Some(source), Some(target)) =
				(positions.get(&edge.source_id), positions.get(&edge.target_id))
			else {
				let (from, to) = edge.key();
				warn!("{}", FlowError::MissingEndpoint { from, to });
				continue;
			};
			let start = Position::new(source.x + self.config.node_width, source.y);
			edge_paths.insert(edge.key(), EdgePath::between(start, *target));
		}

		let scene_width = container_width.max(rightmost + self.config.scene_margin);
		debug!(
			"laid out {} nodes, {} edges in {scene_width}x{container_height}",
			positions.len(),
			edge_paths.len()
		);

		Some(FlowLayout {
			positions,
			edge_paths,
			container_height,
			scene_width,
		})
	}
}
