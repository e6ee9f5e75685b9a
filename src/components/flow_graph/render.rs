use leptos::prelude::*;

use super::interaction::{
	InteractionState, Notification, NotificationKind, PENDING_EDGE_MESSAGE, Visual,
};
use super::layout::{EdgePath, FlowLayout, LayoutConfig};
use super::types::{FlowGraph, GraphEdge, Node, Position};

/// Left inset of the scene so root boxes and their tooltips are not clipped.
pub const INSET: f64 = 30.0;

const NODE_TOOLTIP_WIDTH: f64 = 320.0;
const EDGE_TOOLTIP_WIDTH: f64 = 360.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeStyle {
	pub stroke: &'static str,
	pub stroke_width: u8,
	pub marker: &'static str,
	pub label_border: &'static str,
	pub label_border_width: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeStyle {
	pub fill: &'static str,
	pub stroke: &'static str,
	pub stroke_width: u8,
	pub text: &'static str,
}

pub fn edge_style(visual: Visual) -> EdgeStyle {
	match visual {
		Visual::Default => EdgeStyle {
			stroke: "#64748b",
			stroke_width: 2,
			marker: "arrowhead",
			label_border: "#e2e8f0",
			label_border_width: 1,
		},
		Visual::Hovered => EdgeStyle {
			stroke: "#6366f1",
			stroke_width: 3,
			marker: "arrowhead-hover",
			label_border: "#6366f1",
			label_border_width: 2,
		},
		Visual::Clicked => EdgeStyle {
			stroke: "#4f46e5",
			stroke_width: 3,
			marker: "arrowhead-clicked",
			label_border: "#4f46e5",
			label_border_width: 2,
		},
	}
}

/// Roots (donors) are filled; everything downstream is a light box.
pub fn node_style(is_root: bool, visual: Visual) -> NodeStyle {
	let (fill, text) = match (is_root, visual) {
		(true, Visual::Default) => ("#6366f1", "#fff"),
		(true, Visual::Hovered) => ("#4f46e5", "#fff"),
		(true, Visual::Clicked) => ("#4338ca", "#fff"),
		(false, Visual::Default) => ("#fff", "#64748b"),
		(false, Visual::Hovered) => ("#f1f5f9", "#4f46e5"),
		(false, Visual::Clicked) => ("#eef2ff", "#4338ca"),
	};
	let (stroke, stroke_width) = match visual {
		Visual::Default => ("#e2e8f0", 2),
		Visual::Hovered => ("#4f46e5", 3),
		Visual::Clicked => ("#4338ca", 3),
	};
	NodeStyle {
		fill,
		stroke,
		stroke_width,
		text,
	}
}

pub fn format_total(total: f64) -> String {
	format!("{:.2}", total)
}

/// Top-left corner of a node tooltip, in scene coordinates.
pub fn node_tooltip_anchor(node: &Node, pos: Position) -> Position {
	let x = if node.is_root() {
		pos.x.max(40.0)
	} else {
		pos.x - 40.0
	};
	Position::new(x, pos.y - 100.0)
}

/// Top-left corner of an edge tooltip; taller hash lists start higher.
pub fn edge_tooltip_anchor(edge: &GraphEdge, midpoint: Position) -> Position {
	let lift = if edge.is_pending() {
		0.0
	} else {
		edge.hashes.len() as f64 * 20.0
	};
	Position::new(midpoint.x + 50.0, midpoint.y - 15.0 - lift)
}

fn notification_class(kind: NotificationKind) -> &'static str {
	match kind {
		NotificationKind::Success => "notification success",
		NotificationKind::Info => "notification info",
		NotificationKind::Error => "notification error",
	}
}

pub fn notification(notification: Notification) -> impl IntoView {
	view! { <div class=notification_class(notification.kind)>{notification.text}</div> }
}

pub fn loading() -> impl IntoView {
	view! {
		<div class="loading-container">
			<div class="loading-spinner"></div>
			<p class="loading-text">"Loading visualization..."</p>
		</div>
	}
}

fn arrow_markers() -> impl IntoView {
	[
		edge_style(Visual::Default),
		edge_style(Visual::Hovered),
		edge_style(Visual::Clicked),
	]
	.into_iter()
	.map(|style| {
		view! {
			<marker
				id=style.marker
				markerWidth="10"
				markerHeight="7"
				refX="9"
				refY="3.5"
				orient="auto"
			>
				<polygon points="0 0, 10 3.5, 0 7" fill=style.stroke />
			</marker>
		}
	})
	.collect_view()
}

fn edge_view(
	edge: GraphEdge,
	path: EdgePath,
	state: RwSignal<InteractionState>,
	on_click: Callback<GraphEdge>,
) -> impl IntoView {
	let key = edge.key();
	let visual = Memo::new({
		let key = key.clone();
		move |_| state.with(|s| s.edge_visual(&key))
	});
	let style = move || edge_style(visual.get());
	let leave_key = key.clone();
	let label = edge.label.clone();
	let mid = path.midpoint;

	view! {
		<g
			class="flow-edge"
			style="cursor: pointer;"
			on:mouseenter=move |_| state.update(|s| s.enter_edge(&key))
			on:mouseleave=move |_| state.update(|s| s.leave_edge(&leave_key))
			on:click=move |_| on_click.run(edge.clone())
		>
			<path
				d=path.to_svg()
				fill="none"
				stroke=move || style().stroke
				stroke-width=move || style().stroke_width.to_string()
				marker-end=move || format!("url(#{})", style().marker)
				style="transition: stroke 0.2s, stroke-width 0.2s"
			/>
			<g transform=format!("translate({}, {})", mid.x, mid.y)>
				<rect
					x="-40"
					y="-12"
					width="80"
					height="24"
					rx="4"
					fill="white"
					fill-opacity="0.9"
					stroke=move || style().label_border
					stroke-width=move || style().label_border_width.to_string()
				/>
				<text x="0" y="4" text-anchor="middle" fill=move || style().stroke>
					{label}
				</text>
			</g>
		</g>
	}
}

fn node_view(
	node: Node,
	pos: Position,
	config: LayoutConfig,
	state: RwSignal<InteractionState>,
	on_click: Callback<Node>,
) -> impl IntoView {
	let visual = Memo::new({
		let id = node.id.clone();
		move |_| state.with(|s| s.node_visual(&id))
	});
	let is_root = node.is_root();
	let style = move || node_style(is_root, visual.get());
	let (enter_id, leave_id) = (node.id.clone(), node.id.clone());
	let name = node.display_name.clone();
	let top = pos.y - config.node_height / 2.0;

	view! {
		<g
			class="flow-node"
			transform=format!("translate({}, {})", pos.x, top)
			style="cursor: pointer;"
			on:mouseenter=move |_| state.update(|s| s.enter_node(&enter_id))
			on:mouseleave=move |_| state.update(|s| s.leave_node(&leave_id))
			on:click=move |_| on_click.run(node.clone())
		>
			<rect
				x="0"
				y="0"
				width=config.node_width.to_string()
				height=config.node_height.to_string()
				rx="8"
				ry="8"
				fill=move || style().fill
				stroke=move || style().stroke
				stroke-width=move || style().stroke_width.to_string()
			/>
			<text
				x=(config.node_width / 2.0).to_string()
				y=(config.node_height / 2.0 + 5.0).to_string()
				text-anchor="middle"
				font-weight="500"
				fill=move || style().text
			>
				{name}
			</text>
		</g>
	}
}

fn node_tooltip(node: &Node, pos: Position) -> impl IntoView + use<> {
	let at = node_tooltip_anchor(node, pos);
	let outgoing = node
		.total_outgoing
		.map(|t| view! { <div class="node-stats">{format!("Outgoing: {}", format_total(t))}</div> });
	let incoming = node
		.total_incoming
		.map(|t| view! { <div class="node-stats">{format!("Incoming: {}", format_total(t))}</div> });

	view! {
		<div
			class="node-tooltip"
			style=format!(
				"position: absolute; left: {}px; top: {}px; width: {NODE_TOOLTIP_WIDTH}px; pointer-events: none;",
				at.x + INSET,
				at.y,
			)
		>
			<div class="node-name">{node.display_name.clone()}</div>
			<div class="address">{node.id.clone()}</div>
			<div class="instruction">"Click to copy address"</div>
			{outgoing}
			{incoming}
		</div>
	}
}

fn edge_tooltip(graph: &FlowGraph, edge: &GraphEdge, midpoint: Position) -> impl IntoView + use<> {
	let at = edge_tooltip_anchor(edge, midpoint);
	let name_of = |id: &str| {
		graph
			.node(id)
			.map(|n| n.display_name.clone())
			.unwrap_or_else(|| "Unknown".to_string())
	};
	let title = format!("{} → {}", name_of(&edge.source_id), name_of(&edge.target_id));

	let body = if edge.is_pending() {
		view! {
			<div class="pending-message">{PENDING_EDGE_MESSAGE}</div>
		}
		.into_any()
	} else {
		let hashes = edge
			.hashes
			.iter()
			.map(|hash| view! { <div class="hash">{hash.clone()}</div> })
			.collect_view();
		view! {
			<div class="title">"Transaction Hashes:"</div>
			<div class="hash-list">{hashes}</div>
			<div class="instruction">"Click to copy all transaction hashes"</div>
		}
		.into_any()
	};

	view! {
		<div
			class="edge-tooltip"
			style=format!(
				"position: absolute; left: {}px; top: {}px; width: {EDGE_TOOLTIP_WIDTH}px; pointer-events: none;",
				at.x + INSET,
				at.y,
			)
		>
			<div class="title">{title}</div>
			<div class="amount">{edge.raw_amount_text.clone()}</div>
			{body}
		</div>
	}
}

/// Full diagram: connectors first, boxes above them, tooltips on top.
pub fn scene(
	graph: FlowGraph,
	layout: FlowLayout,
	config: LayoutConfig,
	state: RwSignal<InteractionState>,
	on_node: Callback<Node>,
	on_edge: Callback<GraphEdge>,
) -> impl IntoView {
	let width = layout.scene_width + INSET;
	let height = layout.container_height;

	let edges = graph
		.edges
		.iter()
		.filter_map(|edge| {
			let path = *layout.edge_paths.get(&edge.key())?;
			Some(edge_view(edge.clone(), path, state, on_edge))
		})
		.collect_view();
	let nodes = graph
		.nodes
		.iter()
		.filter_map(|node| {
			let pos = *layout.positions.get(&node.id)?;
			Some(node_view(node.clone(), pos, config, state, on_node))
		})
		.collect_view();

	let tooltips = move || {
		let (hovered_node, hovered_edge) =
			state.with(|s| (s.hovered_node.clone(), s.hovered_edge.clone()));
		let node_tip = hovered_node.and_then(|id| {
			let node = graph.node(&id)?;
			Some(node_tooltip(node, *layout.positions.get(&id)?))
		});
		let edge_tip = hovered_edge.and_then(|key| {
			let edge = graph.edge(&key)?;
			Some(edge_tooltip(&graph, edge, layout.edge_paths.get(&key)?.midpoint))
		});
		view! {
			{node_tip}
			{edge_tip}
		}
	};

	view! {
		<div
			class="fund-flow-scene"
			style=format!("position: relative; width: {width}px; height: {height}px;")
		>
			<svg width=width.to_string() height=height.to_string()>
				<defs>{arrow_markers()}</defs>
				<g transform=format!("translate({INSET}, 0)")>{edges}{nodes}</g>
			</svg>
			{tooltips}
		</div>
	}
}
