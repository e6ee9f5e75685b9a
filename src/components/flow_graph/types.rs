use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::FlowError;

/// Sentinel hash carried by the placeholder donor -> organization edge.
pub const PENDING_TRANSACTION_HASH: &str = "pending-transaction";

/// Wallet address of a party, or its backend id when no address is known.
pub type NodeId = String;

/// Identifies an edge by its (source, target) pair.
pub type EdgeKey = (NodeId, NodeId);

/// Aggregated transfer between two parties, as served by the transactions backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Sender wallet address.
	#[serde(default)]
	pub sender: Option<String>,
	/// Backend id of the sender.
	pub sender_id: String,
	/// Sender display name.
	pub sender_name: String,
	/// Receiver wallet address.
	#[serde(default)]
	pub receiver: Option<String>,
	/// Backend id of the receiver.
	pub receiver_id: String,
	/// Receiver display name.
	pub receiver_name: String,
	/// Used when `total_amount` carries no currency of its own.
	#[serde(default)]
	pub currency: String,
	/// `"<number> <currency>"`, e.g. `"6.0 RLUSD"`.
	pub total_amount: String,
	/// Ledger hashes of the transfers folded into this edge.
	#[serde(default, alias = "transaction_hashes")]
	pub hashes: Vec<String>,
}

impl Edge {
	/// Node id of the sender: its wallet address, else its backend id.
	pub fn source(&self) -> &str {
		self.sender.as_deref().unwrap_or(&self.sender_id)
	}

	/// Node id of the receiver: its wallet address, else its backend id.
	pub fn target(&self) -> &str {
		self.receiver.as_deref().unwrap_or(&self.receiver_id)
	}

	/// True for the placeholder edge shown before any donation.
	pub fn is_pending(&self) -> bool {
		is_pending_hashes(&self.hashes)
	}
}

/// A single ledger transaction. Several of these between the same pair merge
/// into one edge when the graph is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Transaction {
	pub transaction_hash: String,
	pub sender_id: String,
	pub sender_name: String,
	pub receiver_id: String,
	pub receiver_name: String,
	pub amount: f64,
	pub currency: String,
	#[serde(default)]
	pub transaction_type: String,
	#[serde(default)]
	pub status: String,
}

impl From<Transaction> for Edge {
	fn from(tx: Transaction) -> Self {
		Edge {
			total_amount: format!("{} {}", tx.amount, tx.currency),
			sender: None,
			sender_id: tx.sender_id,
			sender_name: tx.sender_name,
			receiver: None,
			receiver_id: tx.receiver_id,
			receiver_name: tx.receiver_name,
			currency: tx.currency,
			hashes: vec![tx.transaction_hash],
		}
	}
}

/// Identity and display name of a party the graph must always show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
	/// Node id, normally the wallet address.
	pub id: NodeId,
	/// Display name.
	pub name: String,
}

impl Party {
	/// Party with the given id and display name.
	pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
		}
	}
}

/// Donor and organization that anchor levels 0 and 1 before any money moved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchors {
	/// Shown at level 0.
	pub donor: Party,
	/// Shown one level below the donor.
	pub organization: Party,
}

/// A party in the built graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Wallet address, copied on click.
	pub id: NodeId,
	/// Name drawn in the box.
	pub display_name: String,
	/// Column index, 0 for roots.
	pub level: usize,
	/// Sum of outgoing edge amounts, `None` if the party never sent.
	pub total_outgoing: Option<f64>,
	/// Sum of incoming edge amounts, `None` if the party never received.
	pub total_incoming: Option<f64>,
}

impl Node {
	/// Roots are drawn filled.
	pub fn is_root(&self) -> bool {
		self.level == 0
	}
}

/// A merged transfer between two nodes of the built graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	/// Sending node.
	pub source_id: NodeId,
	/// Receiving node.
	pub target_id: NodeId,
	/// Total amount moved.
	pub amount: f64,
	/// Currency shared by every merged transfer.
	pub currency: String,
	/// Rounded amount shown on the connector, e.g. `"6.0 RLUSD"`.
	pub label: String,
	/// Unrounded amount shown in the tooltip.
	pub raw_amount_text: String,
	/// Ledger hashes, copied on click.
	pub hashes: Vec<String>,
}

impl GraphEdge {
	/// Stable key used for hover, click and path lookups.
	pub fn key(&self) -> EdgeKey {
		(self.source_id.clone(), self.target_id.clone())
	}

	/// True for the placeholder edge shown before any donation.
	pub fn is_pending(&self) -> bool {
		is_pending_hashes(&self.hashes)
	}
}

fn is_pending_hashes(hashes: &[String]) -> bool {
	matches!(hashes, [only] if only == PENDING_TRANSACTION_HASH)
}

/// Edge dropped while building, kept so callers can surface it.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildWarning {
	/// Node id of the dropped edge's sender.
	pub sender_id: NodeId,
	/// Node id of the dropped edge's receiver.
	pub receiver_id: NodeId,
	/// Why it was dropped.
	pub error: FlowError,
}

/// Output of the builder: nodes with levels, merged edges and dropped input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowGraph {
	/// Nodes in discovery order.
	pub nodes: Vec<Node>,
	/// Merged edges, pending placeholder last.
	pub edges: Vec<GraphEdge>,
	/// Level number to node ids, discovery order within a level.
	pub levels: BTreeMap<usize, Vec<NodeId>>,
	/// Input edges that were dropped.
	pub warnings: Vec<BuildWarning>,
}

impl FlowGraph {
	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Edge by (source, target).
	pub fn edge(&self, key: &EdgeKey) -> Option<&GraphEdge> {
		self.edges
			.iter()
			.find(|e| e.source_id == key.0 && e.target_id == key.1)
	}

	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// A point in scene coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	/// Point at (x, y).
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}
