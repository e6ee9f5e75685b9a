//! Turns the flat edge list served by the backend into a leveled graph.

use std::collections::{BTreeMap, HashMap};

use log::warn;

use super::error::FlowError;
use super::types::{
	Anchors, BuildWarning, Edge, EdgeKey, FlowGraph, GraphEdge, Node, NodeId,
	PENDING_TRANSACTION_HASH,
};

/// Currency shown on the placeholder edge before any donation exists.
const PENDING_CURRENCY: &str = "RLUSD";
const UNKNOWN_RECEIVER: &str = "Unknown";
const UNKNOWN_DISPLAY_NAME: &str = "Unknown Address";

/// Builds a [`FlowGraph`], optionally pinning a donor and an organization.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
	anchors: Option<Anchors>,
}

impl GraphBuilder {
	/// Builder without anchors.
	pub fn new() -> Self {
		Self::default()
	}

	/// Always show the donor and organization, linked by a pending edge
	/// until a real transfer between them exists.
	pub fn with_anchors(mut self, anchors: Anchors) -> Self {
		self.anchors = Some(anchors);
		self
	}

	/// See [`build`].
	pub fn build(&self, edges: &[Edge]) -> FlowGraph {
		build(edges, self.anchors.as_ref())
	}
}

/// Split `"<number> <currency>"` on the first space. The currency falls back to
/// `fallback_currency` when the text carries none.
pub fn parse_amount(total_amount: &str, fallback_currency: &str) -> Result<(f64, String), FlowError> {
	let text = total_amount.trim();
	let (number, currency) = match text.split_once(' ') {
		Some((number, currency)) => (number, currency.trim()),
		None => (text, ""),
	};
	let malformed = || FlowError::MalformedAmount {
		raw: total_amount.to_string(),
	};
	let amount: f64 = number.parse().map_err(|_| malformed())?;
	if !amount.is_finite() {
		return Err(malformed());
	}
	let currency = if currency.is_empty() {
		fallback_currency
	} else {
		currency
	};
	Ok((amount, currency.to_string()))
}

/// One-decimal connector label, e.g. `6.0 RLUSD`.
pub fn format_label(amount: f64, currency: &str) -> String {
	format!("{:.1} {}", amount, currency)
}

fn display_name(name: &str) -> String {
	if name == UNKNOWN_RECEIVER {
		UNKNOWN_DISPLAY_NAME.to_string()
	} else {
		name.to_string()
	}
}

#[derive(Default)]
struct NodeTable {
	nodes: Vec<Node>,
	index: HashMap<NodeId, usize>,
}

impl NodeTable {
	fn ensure(&mut self, id: &str, name: &str) -> usize {
		if let Some(&idx) = self.index.get(id) {
			return idx;
		}
		let idx = self.nodes.len();
		self.nodes.push(Node {
			id: id.to_string(),
			display_name: display_name(name),
			level: 0,
			total_outgoing: None,
			total_incoming: None,
		});
		self.index.insert(id.to_string(), idx);
		idx
	}
}

/// Build the graph. Edges with unparseable amounts are dropped and reported in
/// [`FlowGraph::warnings`]; the rest of the list is still processed.
pub fn build(edges: &[Edge], anchors: Option<&Anchors>) -> FlowGraph {
	let mut table = NodeTable::default();
	let mut graph_edges: Vec<GraphEdge> = Vec::new();
	let mut edge_index: HashMap<EdgeKey, usize> = HashMap::new();
	let mut warnings = Vec::new();

	if let Some(anchors) = anchors {
		let donor = table.ensure(&anchors.donor.id, &anchors.donor.name);
		table.nodes[donor].total_outgoing = Some(0.0);
		let org = table.ensure(&anchors.organization.id, &anchors.organization.name);
		table.nodes[org].total_incoming = Some(0.0);
		table.nodes[org].total_outgoing = Some(0.0);
	}

	for edge in edges {
		let (source, target) = (edge.source(), edge.target());
		let reject = |error: FlowError, warnings: &mut Vec<BuildWarning>| {
			warn!("dropping edge {source} -> {target}: {error}");
			warnings.push(BuildWarning {
				sender_id: source.to_string(),
				receiver_id: target.to_string(),
				error,
			});
		};

		let (amount, currency) = match parse_amount(&edge.total_amount, &edge.currency) {
			Ok(parsed) => parsed,
			Err(error) => {
				reject(error, &mut warnings);
				continue;
			}
		};

		let key: EdgeKey = (source.to_string(), target.to_string());
		match edge_index.get(&key).copied() {
			Some(idx) => {
				let existing = &mut graph_edges[idx];
				if existing.currency != currency {
					let error = FlowError::CurrencyMismatch {
						from: key.0,
						to: key.1,
						expected: existing.currency.clone(),
						found: currency,
					};
					reject(error, &mut warnings);
					continue;
				}
				existing.amount += amount;
				existing.hashes.extend(edge.hashes.iter().cloned());
				existing.label = format_label(existing.amount, &currency);
				existing.raw_amount_text = format!("{} {}", existing.amount, currency);
			}
			None => {
				edge_index.insert(key, graph_edges.len());
				graph_edges.push(GraphEdge {
					source_id: source.to_string(),
					target_id: target.to_string(),
					amount,
					label: format_label(amount, &currency),
					currency,
					raw_amount_text: edge.total_amount.clone(),
					hashes: edge.hashes.clone(),
				});
			}
		}

		let sender = table.ensure(source, &edge.sender_name);
		let receiver = table.ensure(target, &edge.receiver_name);
		*table.nodes[sender].total_outgoing.get_or_insert(0.0) += amount;
		*table.nodes[receiver].total_incoming.get_or_insert(0.0) += amount;
	}

	if let Some(anchors) = anchors {
		let linked = graph_edges.iter().any(|e| {
			e.source_id == anchors.donor.id && e.target_id == anchors.organization.id
		});
		if !linked {
			graph_edges.push(pending_edge(&anchors.donor.id, &anchors.organization.id));
		}
	}

	let links: Vec<(usize, usize)> = graph_edges
		.iter()
		.filter_map(|e| Some((*table.index.get(&e.source_id)?, *table.index.get(&e.target_id)?)))
		.collect();
	let ids: Vec<&str> = table.nodes.iter().map(|n| n.id.as_str()).collect();
	let depths = assign_levels(&ids, &links);

	let mut nodes = table.nodes;
	let mut levels: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
	for (node, depth) in nodes.iter_mut().zip(depths) {
		node.level = depth;
		levels.entry(depth).or_default().push(node.id.clone());
	}

	FlowGraph {
		nodes,
		edges: graph_edges,
		levels,
		warnings,
	}
}

/// Placeholder so the donor -> organization link is visible before any transfer.
pub fn pending_edge(donor: &str, organization: &str) -> GraphEdge {
	GraphEdge {
		source_id: donor.to_string(),
		target_id: organization.to_string(),
		amount: 0.0,
		currency: PENDING_CURRENCY.to_string(),
		label: format_label(0.0, PENDING_CURRENCY),
		raw_amount_text: format!("0 {}", PENDING_CURRENCY),
		hashes: vec![PENDING_TRANSACTION_HASH.to_string()],
	}
}

/// Level of every node: the length of the longest simple path reaching it from
/// a start node.
///
/// Start nodes are the roots (no incoming edge) plus, for every cycle that no
/// root feeds, its member with the smallest id. Strongly connected components
/// are visited in topological order; between components the usual DAG
/// recurrence applies and inside a component every simple path is walked, so
/// the cost is only exponential in the size of a single cycle cluster. Neither
/// input order nor discovery order changes the result.
fn assign_levels(ids: &[&str], links: &[(usize, usize)]) -> Vec<usize> {
	let node_count = ids.len();
	let mut children = vec![Vec::new(); node_count];
	let mut parents = vec![Vec::new(); node_count];
	for &(source, target) in links {
		children[source].push(target);
		parents[target].push(source);
	}

	let components = strongly_connected(&children);
	let mut component_of = vec![0; node_count];
	for (component, members) in components.iter().enumerate() {
		for &member in members {
			component_of[member] = component;
		}
	}

	let mut levels = vec![0; node_count];
	// Tarjan emits sinks first.
	for (component, members) in components.iter().enumerate().rev() {
		let mut entries: Vec<(usize, usize)> = members
			.iter()
			.filter_map(|&member| {
				let depth = parents[member]
					.iter()
					.filter(|&&p| component_of[p] != component)
					.map(|&p| levels[p] + 1)
					.max()?;
				Some((member, depth))
			})
			.collect();
		if entries.is_empty() {
			if let Some(&first) = members.iter().min_by_key(|&&m| ids[m]) {
				entries.push((first, 0));
			}
		}
		for (entry, depth) in entries {
			descend(entry, depth, component, &children, &component_of, &mut levels);
		}
	}
	levels
}

/// Walk every simple path from `start` that stays inside `component`, raising
/// each node to the deepest depth it is reached at.
fn descend(
	start: usize,
	base: usize,
	component: usize,
	children: &[Vec<usize>],
	component_of: &[usize],
	levels: &mut [usize],
) {
	let mut on_path = vec![false; children.len()];
	// (node, index of the next child to visit)
	let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
	on_path[start] = true;
	levels[start] = levels[start].max(base);

	while let Some(&(node, next)) = stack.last() {
		let Some(&child) = children[node].get(next) else {
			on_path[node] = false;
			stack.pop();
			continue;
		};
		let top = stack.len() - 1;
		stack[top].1 += 1;

		if on_path[child] || component_of[child] != component {
			continue;
		}
		levels[child] = levels[child].max(base + stack.len());
		on_path[child] = true;
		stack.push((child, 0));
	}
}

/// Tarjan's algorithm with an explicit stack. Components come out in reverse
/// topological order.
fn strongly_connected(children: &[Vec<usize>]) -> Vec<Vec<usize>> {
	const UNVISITED: usize = usize::MAX;

	let node_count = children.len();
	let mut index = vec![UNVISITED; node_count];
	let mut low = vec![0; node_count];
	let mut on_stack = vec![false; node_count];
	let mut stack = Vec::new();
	let mut components = Vec::new();
	let mut counter = 0;

	for start in 0..node_count {
		if index[start] != UNVISITED {
			continue;
		}
		let mut work: Vec<(usize, usize)> = vec![(start, 0)];
		index[start] = counter;
		low[start] = counter;
		counter += 1;
		stack.push(start);
		on_stack[start] = true;

		while let Some(&(node, next)) = work.last() {
			if let Some(&child) = children[node].get(next) {
				let top = work.len() - 1;
				work[top].1 += 1;
				if index[child] == UNVISITED {
					index[child] = counter;
					low[child] = counter;
					counter += 1;
					stack.push(child);
					on_stack[child] = true;
					work.push((child, 0));
				} else if on_stack[child] {
					low[node] = low[node].min(index[child]);
				}
				continue;
			}

			work.pop();
			if let Some(&(parent, _)) = work.last() {
				low[parent] = low[parent].min(low[node]);
			}
			if low[node] == index[node] {
				let mut component = Vec::new();
				while let Some(member) = stack.pop() {
					on_stack[member] = false;
					component.push(member);
					if member == node {
						break;
					}
				}
				components.push(component);
			}
		}
	}
	components
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use proptest::prelude::*;

	use super::*;
	use crate::components::flow_graph::types::Party;

	fn edge(from: &str, to: &str, amount: &str, hashes: usize) -> Edge {
		Edge {
			sender: None,
			sender_id: from.to_string(),
			sender_name: format!("{from} name"),
			receiver: None,
			receiver_id: to.to_string(),
			receiver_name: format!("{to} name"),
			currency: "RLUSD".to_string(),
			total_amount: amount.to_string(),
			hashes: (0..hashes).map(|i| format!("{from}{to}{i}")).collect(),
		}
	}

	fn anchors() -> Anchors {
		Anchors {
			donor: Party::new("donor-1", "You (Donor)"),
			organization: Party::new("customer-2", "Flood Recovery"),
		}
	}

	fn level_of(graph: &FlowGraph, id: &str) -> usize {
		graph.node(id).map(|n| n.level).unwrap()
	}

	#[test]
	fn aggregates_totals_and_levels() {
		let graph = build(
			&[edge("A", "B", "6.0 RLUSD", 6), edge("A", "C", "1.0 RLUSD", 1)],
			None,
		);

		let a = graph.node("A").unwrap();
		assert_eq!(a.total_outgoing, Some(7.0));
		assert_eq!(a.level, 0);
		assert_eq!(graph.node("B").unwrap().total_incoming, Some(6.0));
		assert_eq!(graph.node("C").unwrap().total_incoming, Some(1.0));
		assert_eq!(level_of(&graph, "B"), 1);
		assert_eq!(level_of(&graph, "C"), 1);
		assert_eq!(graph.edges[0].label, "6.0 RLUSD");
		assert_eq!(graph.edges[0].hashes.len(), 6);
		assert_eq!(graph.levels[&1], vec!["B".to_string(), "C".to_string()]);
	}

	#[test]
	fn anchors_without_edges_get_pending_link() {
		let graph = build(&[], Some(&anchors()));

		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(level_of(&graph, "donor-1"), 0);
		assert_eq!(level_of(&graph, "customer-2"), 1);
		assert_eq!(graph.edges.len(), 1);
		let pending = &graph.edges[0];
		assert_eq!(pending.amount, 0.0);
		assert_eq!(pending.label, "0.0 RLUSD");
		assert_eq!(pending.hashes, vec![PENDING_TRANSACTION_HASH.to_string()]);
		assert!(pending.is_pending());
	}

	#[test]
	fn no_pending_link_once_donor_has_given() {
		let graph = GraphBuilder::new()
			.with_anchors(anchors())
			.build(&[edge("donor-1", "customer-2", "5 RLUSD", 1)]);

		assert_eq!(graph.edges.len(), 1);
		assert!(!graph.edges[0].is_pending());
	}

	#[test]
	fn empty_input_is_an_empty_graph() {
		let graph = build(&[], None);
		assert!(graph.is_empty());
		assert!(graph.edges.is_empty());
		assert!(graph.levels.is_empty());
	}

	#[test]
	fn malformed_amount_is_dropped_and_reported() {
		let graph = build(
			&[edge("A", "B", "lots RLUSD", 1), edge("A", "C", "2.5 RLUSD", 1)],
			None,
		);

		assert_eq!(graph.edges.len(), 1);
		assert_eq!(graph.edges[0].target_id, "C");
		assert!(graph.node("B").is_none());
		assert_eq!(graph.warnings.len(), 1);
		assert_eq!(
			graph.warnings[0].error,
			FlowError::MalformedAmount {
				raw: "lots RLUSD".to_string()
			}
		);
	}

	#[test]
	fn parse_amount_splits_on_first_space() {
		assert_eq!(parse_amount("6.0 RLUSD", "XRP").unwrap(), (6.0, "RLUSD".to_string()));
		assert_eq!(parse_amount("3", "XRP").unwrap(), (3.0, "XRP".to_string()));
		assert!(parse_amount("", "XRP").is_err());
		assert!(parse_amount("NaN RLUSD", "XRP").is_err());
		assert!(parse_amount("inf RLUSD", "XRP").is_err());
	}

	#[test]
	fn deepest_path_wins() {
		// A reaches C directly and through B.
		let graph = build(
			&[
				edge("A", "C", "1 RLUSD", 1),
				edge("A", "B", "1 RLUSD", 1),
				edge("B", "C", "1 RLUSD", 1),
			],
			None,
		);
		assert_eq!(level_of(&graph, "C"), 2);
	}

	#[test]
	fn deeper_path_from_a_later_root_raises_level() {
		// X -> C at depth 1 first, then R -> S -> T -> C at depth 3.
		let graph = build(
			&[
				edge("X", "C", "1 RLUSD", 1),
				edge("R", "S", "1 RLUSD", 1),
				edge("S", "T", "1 RLUSD", 1),
				edge("T", "C", "1 RLUSD", 1),
				edge("C", "D", "1 RLUSD", 1),
			],
			None,
		);
		assert_eq!(level_of(&graph, "C"), 3);
		assert_eq!(level_of(&graph, "D"), 4);
	}

	#[test]
	fn cycles_terminate() {
		let graph = build(
			&[
				edge("A", "B", "1 RLUSD", 1),
				edge("B", "C", "1 RLUSD", 1),
				edge("C", "B", "1 RLUSD", 1),
				edge("P", "Q", "1 RLUSD", 1),
				edge("Q", "P", "1 RLUSD", 1),
			],
			None,
		);
		assert_eq!(level_of(&graph, "A"), 0);
		assert_eq!(level_of(&graph, "B"), 1);
		assert_eq!(level_of(&graph, "C"), 2);
		// P and Q have no root; the walk enters at the smaller id.
		assert_eq!(level_of(&graph, "P"), 0);
		assert_eq!(level_of(&graph, "Q"), 1);
	}

	#[test]
	fn rootless_cycle_enters_at_smallest_id_in_any_order() {
		let forward = build(
			&[edge("Q", "P", "1 RLUSD", 1), edge("P", "Q", "1 RLUSD", 1)],
			None,
		);
		assert_eq!(level_of(&forward, "P"), 0);
		assert_eq!(level_of(&forward, "Q"), 1);
	}

	#[test]
	fn second_root_carries_its_depth_through_a_cycle() {
		let edges = [
			edge("A", "B", "1 RLUSD", 1),
			edge("B", "C", "1 RLUSD", 1),
			edge("C", "B", "1 RLUSD", 1),
			edge("D", "C", "1 RLUSD", 1),
		];
		let mut reversed = edges.clone();
		reversed.reverse();

		for graph in [build(&edges, None), build(&reversed, None)] {
			// A -> B -> C and D -> C -> B are both two hops long.
			assert_eq!(level_of(&graph, "A"), 0);
			assert_eq!(level_of(&graph, "D"), 0);
			assert_eq!(level_of(&graph, "B"), 2);
			assert_eq!(level_of(&graph, "C"), 2);
		}
	}

	#[test]
	fn self_loop_does_not_raise_a_root() {
		let graph = build(
			&[edge("A", "A", "1 RLUSD", 1), edge("A", "B", "1 RLUSD", 1)],
			None,
		);
		assert_eq!(level_of(&graph, "A"), 0);
		assert_eq!(level_of(&graph, "B"), 1);
	}

	#[test]
	fn repeated_pairs_merge() {
		let graph = build(
			&[edge("A", "B", "1.5 RLUSD", 1), edge("A", "B", "2 RLUSD", 2)],
			None,
		);
		assert_eq!(graph.edges.len(), 1);
		assert_eq!(graph.edges[0].amount, 3.5);
		assert_eq!(graph.edges[0].label, "3.5 RLUSD");
		assert_eq!(graph.edges[0].raw_amount_text, "3.5 RLUSD");
		assert_eq!(graph.edges[0].hashes.len(), 3);
	}

	#[test]
	fn mixed_currency_pair_is_rejected() {
		let graph = build(
			&[edge("A", "B", "1 RLUSD", 1), edge("A", "B", "2 XRP", 1)],
			None,
		);
		assert_eq!(graph.edges[0].amount, 1.0);
		assert!(matches!(
			graph.warnings[0].error,
			FlowError::CurrencyMismatch { .. }
		));
	}

	#[test]
	fn unknown_receiver_gets_readable_name() {
		let mut e = edge("A", "B", "1 RLUSD", 1);
		e.receiver_name = "Unknown".to_string();
		let graph = build(&[e], None);
		assert_eq!(graph.node("B").unwrap().display_name, "Unknown Address");
	}

	#[test]
	fn transactions_build_like_aggregated_edges() {
		let fixture = r#"[
			{"transaction_hash": "H1", "sender_id": "org", "sender_name": "Org",
			 "receiver_id": "shelter", "receiver_name": "ShelterNow", "amount": 2.0,
			 "currency": "RLUSD", "transaction_type": "disbursement", "status": "settled"},
			{"transaction_hash": "H2", "sender_id": "org", "sender_name": "Org",
			 "receiver_id": "shelter", "receiver_name": "ShelterNow", "amount": 1.0,
			 "currency": "RLUSD", "transaction_type": "disbursement", "status": "settled"}
		]"#;
		let txs: Vec<crate::components::flow_graph::Transaction> =
			serde_json::from_str(fixture).unwrap();
		let edges: Vec<Edge> = txs.into_iter().map(Edge::from).collect();
		let graph = build(&edges, None);

		assert_eq!(graph.edges.len(), 1);
		assert_eq!(graph.edges[0].hashes, vec!["H1".to_string(), "H2".to_string()]);
		assert_eq!(graph.node("shelter").unwrap().total_incoming, Some(3.0));
	}

	#[test]
	fn backend_edge_json_deserializes() {
		let fixture = r#"{
			"sender": "rQBsLAh7nQLdRJTJnCapCsbng5Eu8oTUHW",
			"sender_id": "customer-1",
			"sender_name": "Global Relief Fund",
			"receiver": "rMQhytkyM4dwSJkmoAY3qxThRX2M2Py8wc",
			"receiver_id": "customer-2",
			"receiver_name": "Flood Recovery in Louisiana",
			"currency": "RLUSD",
			"total_amount": "6.0 RLUSD",
			"total_transactions": 1,
			"hashes": ["8880476EF3514CA212CBC1390BDDE97A67D74333A1ED5AE2B6C073E529A62F94"]
		}"#;
		let edge: Edge = serde_json::from_str(fixture).unwrap();
		assert_eq!(edge.total_amount, "6.0 RLUSD");
		assert_eq!(edge.hashes.len(), 1);
		assert!(!edge.is_pending());
		assert_eq!(edge.source(), "rQBsLAh7nQLdRJTJnCapCsbng5Eu8oTUHW");
	}

	#[test]
	fn backend_nodes_are_keyed_on_wallet_addresses() {
		let fixture = r#"[
			{"sender": "rQBsLAh7nQLdRJTJnCapCsbng5Eu8oTUHW", "sender_id": "customer-1",
			 "sender_name": "Global Relief Fund",
			 "receiver": "rMQhytkyM4dwSJkmoAY3qxThRX2M2Py8wc", "receiver_id": "customer-2",
			 "receiver_name": "Flood Recovery in Louisiana",
			 "currency": "RLUSD", "total_amount": "6.0 RLUSD", "total_transactions": 1,
			 "hashes": ["8880476EF3514CA212CBC1390BDDE97A67D74333A1ED5AE2B6C073E529A62F94"]},
			{"sender_id": "customer-2", "sender_name": "Flood Recovery in Louisiana",
			 "receiver_id": "customer-9", "receiver_name": "Unknown",
			 "currency": "RLUSD", "total_amount": "1.0 RLUSD", "hashes": ["CC9A"]}
		]"#;
		let edges: Vec<Edge> = serde_json::from_str(fixture).unwrap();
		let graph = build(&edges, None);

		let root = &graph.nodes[0];
		assert_eq!(root.id, "rQBsLAh7nQLdRJTJnCapCsbng5Eu8oTUHW");
		assert_eq!(root.display_name, "Global Relief Fund");
		assert_eq!(graph.edges[0].target_id, "rMQhytkyM4dwSJkmoAY3qxThRX2M2Py8wc");
		// No address on the second record, so the backend id stands in.
		assert!(graph.node("customer-2").is_some());
		assert_eq!(graph.node("customer-9").unwrap().level, 1);

		let mut state = crate::components::flow_graph::InteractionState::new();
		match state.click_node(root) {
			crate::components::flow_graph::ClickEffect::Copy { text, .. } => {
				assert_eq!(text, "rQBsLAh7nQLdRJTJnCapCsbng5Eu8oTUHW")
			}
			other => panic!("expected a copy, got {other:?}"),
		}
	}

	fn dag_edges() -> impl Strategy<Value = Vec<Edge>> {
		prop::collection::vec((0usize..6, 1usize..6, 1u32..20), 0..12).prop_map(|raw| {
			raw.into_iter()
				.map(|(a, span, amount)| {
					let (from, to) = (a, a + span);
					edge(&format!("n{from}"), &format!("n{to}"), &format!("{amount} RLUSD"), 1)
				})
				.collect()
		})
	}

	/// Arbitrary edges over six nodes: back edges, self loops and two-node
	/// cycles all show up.
	fn any_edges() -> impl Strategy<Value = Vec<Edge>> {
		prop::collection::vec((0usize..6, 0usize..6, 1u32..20), 0..14).prop_map(|raw| {
			raw.into_iter()
				.map(|(from, to, amount)| {
					edge(&format!("n{from}"), &format!("n{to}"), &format!("{amount} RLUSD"), 1)
				})
				.collect()
		})
	}

	fn shuffled(
		edges: impl Strategy<Value = Vec<Edge>>,
	) -> impl Strategy<Value = (Vec<Edge>, Vec<Edge>)> {
		edges.prop_flat_map(|edges| {
			let shuffled = Just(edges.clone()).prop_shuffle();
			(Just(edges), shuffled)
		})
	}

	fn reaches(graph: &FlowGraph, from: &str, to: &str) -> bool {
		let mut seen = vec![from.to_string()];
		let mut queue = vec![from.to_string()];
		while let Some(id) = queue.pop() {
			if id == to {
				return true;
			}
			for e in graph.edges.iter().filter(|e| e.source_id == id) {
				if !seen.contains(&e.target_id) {
					seen.push(e.target_id.clone());
					queue.push(e.target_id.clone());
				}
			}
		}
		false
	}

	type Summary = HashMap<String, (usize, Option<f64>, Option<f64>)>;

	fn summary(graph: &FlowGraph) -> Summary {
		graph
			.nodes
			.iter()
			.map(|n| (n.id.clone(), (n.level, n.total_outgoing, n.total_incoming)))
			.collect()
	}

	proptest! {
		#[test]
		fn edges_reference_known_nodes_and_levels_partition(edges in any_edges()) {
			let graph = build(&edges, Some(&anchors()));
			for e in &graph.edges {
				prop_assert!(graph.node(&e.source_id).is_some());
				prop_assert!(graph.node(&e.target_id).is_some());
			}
			let mut grouped: Vec<&String> = graph.levels.values().flatten().collect();
			grouped.sort();
			let mut ids: Vec<&String> = graph.nodes.iter().map(|n| &n.id).collect();
			ids.sort();
			prop_assert_eq!(grouped, ids);
			for (level, ids) in &graph.levels {
				prop_assert!(!ids.is_empty());
				for id in ids {
					prop_assert_eq!(graph.node(id).unwrap().level, *level);
				}
			}
		}

		#[test]
		fn levels_and_totals_ignore_input_order((edges, reordered) in shuffled(dag_edges())) {
			prop_assert_eq!(summary(&build(&edges, None)), summary(&build(&reordered, None)));
		}

		#[test]
		fn cyclic_levels_and_totals_ignore_input_order(
			(edges, reordered) in shuffled(any_edges())
		) {
			prop_assert_eq!(summary(&build(&edges, None)), summary(&build(&reordered, None)));
		}

		#[test]
		fn targets_outside_a_cycle_sit_deeper_than_sources(edges in any_edges()) {
			let graph = build(&edges, None);
			for e in &graph.edges {
				if reaches(&graph, &e.target_id, &e.source_id) {
					continue;
				}
				let source = graph.node(&e.source_id).unwrap().level;
				prop_assert!(graph.node(&e.target_id).unwrap().level > source);
			}
		}
	}
}
