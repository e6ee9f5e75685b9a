use std::collections::HashSet;
use std::hash::Hash;
use std::time::Duration;

use super::types::{EdgeKey, GraphEdge, Node, NodeId};

/// How long a notification stays up before dismissing itself.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

/// Shown after a node address was copied.
pub const NODE_COPIED_MESSAGE: &str = "Wallet address copied to clipboard";
/// Shown when neither clipboard path worked.
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";
/// Explains the placeholder edge.
pub const PENDING_EDGE_MESSAGE: &str =
	"No transactions recorded yet. Make a donation to see transaction details.";

/// Visual treatment of a node or edge. Ordered so that `max` picks the winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Visual {
	Default,
	Hovered,
	Clicked,
}

/// Styling of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NotificationKind {
	Success,
	Info,
	Error,
}

/// A transient message over the diagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
	/// Message text.
	pub text: String,
	/// How it is styled.
	pub kind: NotificationKind,
}

impl Notification {
	/// Green confirmation.
	pub fn success(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			kind: NotificationKind::Success,
		}
	}

	/// Neutral notice.
	pub fn info(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			kind: NotificationKind::Info,
		}
	}

	/// Failure, styled as an error.
	pub fn error(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			kind: NotificationKind::Error,
		}
	}

	/// True for [`NotificationKind::Error`].
	pub fn is_error(&self) -> bool {
		self.kind == NotificationKind::Error
	}
}

/// What the component must do after a click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickEffect {
	/// Put `text` on the clipboard, then show `success_message`.
	Copy {
		/// Clipboard payload.
		text: String,
		/// Shown once the copy succeeded.
		success_message: String,
	},
	/// Only show a notification.
	Notify(Notification),
}

/// Confirmation after copying `count` edge hashes.
pub fn hashes_copied_message(count: usize) -> String {
	let noun = if count == 1 { "hash" } else { "hashes" };
	format!("{count} transaction {noun} copied to clipboard")
}

/// Hover and pinned state for one mounted graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
	/// Node under the pointer.
	pub hovered_node: Option<NodeId>,
	/// Edge under the pointer.
	pub hovered_edge: Option<EdgeKey>,
	/// Pinned nodes.
	pub clicked_nodes: HashSet<NodeId>,
	/// Pinned edges.
	pub clicked_edges: HashSet<EdgeKey>,
}

impl InteractionState {
	/// Nothing hovered or pinned.
	pub fn new() -> Self {
		Self::default()
	}

	/// Pointer entered a node, replacing any previous node hover.
	pub fn enter_node(&mut self, id: &str) {
		self.hovered_node = Some(id.to_string());
	}

	/// Clears the hover only if `id` is the node currently hovered.
	pub fn leave_node(&mut self, id: &str) {
		if self.hovered_node.as_deref() == Some(id) {
			self.hovered_node = None;
		}
	}

	/// Pointer entered an edge, replacing any previous edge hover.
	pub fn enter_edge(&mut self, key: &EdgeKey) {
		self.hovered_edge = Some(key.clone());
	}

	/// Clears the hover only if `key` is the edge currently hovered.
	pub fn leave_edge(&mut self, key: &EdgeKey) {
		if self.hovered_edge.as_ref() == Some(key) {
			self.hovered_edge = None;
		}
	}

	/// Flip the pinned state of a node, returning whether it is now pinned.
	pub fn toggle_node_clicked(&mut self, id: &str) -> bool {
		toggle(&mut self.clicked_nodes, id.to_string())
	}

	/// Flip the pinned state of an edge, returning whether it is now pinned.
	pub fn toggle_edge_clicked(&mut self, key: &EdgeKey) -> bool {
		toggle(&mut self.clicked_edges, key.clone())
	}

	/// How a node should be drawn.
	pub fn node_visual(&self, id: &str) -> Visual {
		visual(
			self.clicked_nodes.contains(id),
			self.hovered_node.as_deref() == Some(id),
		)
	}

	/// How an edge should be drawn.
	pub fn edge_visual(&self, key: &EdgeKey) -> Visual {
		visual(
			self.clicked_edges.contains(key),
			self.hovered_edge.as_ref() == Some(key),
		)
	}

	/// True while the pointer is over the node.
	pub fn is_node_hovered(&self, id: &str) -> bool {
		self.hovered_node.as_deref() == Some(id)
	}

	/// True while the pointer is over the edge.
	pub fn is_edge_hovered(&self, key: &EdgeKey) -> bool {
		self.hovered_edge.as_ref() == Some(key)
	}

	/// Pin or unpin the node and copy its address.
	pub fn click_node(&mut self, node: &Node) -> ClickEffect {
		self.toggle_node_clicked(&node.id);
		ClickEffect::Copy {
			text: node.id.clone(),
			success_message: NODE_COPIED_MESSAGE.to_string(),
		}
	}

	/// Pin or unpin the edge and copy its hashes, one per line. The placeholder
	/// edge has nothing to copy and only explains itself.
	pub fn click_edge(&mut self, edge: &GraphEdge) -> ClickEffect {
		self.toggle_edge_clicked(&edge.key());
		if edge.is_pending() {
			return ClickEffect::Notify(Notification::info(PENDING_EDGE_MESSAGE));
		}
		ClickEffect::Copy {
			text: edge.hashes.join("\n"),
			success_message: hashes_copied_message(edge.hashes.len()),
		}
	}
}

fn toggle<T: Eq + Hash>(set: &mut HashSet<T>, item: T) -> bool {
	if set.remove(&item) {
		false
	} else {
		set.insert(item);
		true
	}
}

fn visual(clicked: bool, hovered: bool) -> Visual {
	match (clicked, hovered) {
		(true, _) => Visual::Clicked,
		(false, true) => Visual::Hovered,
		(false, false) => Visual::Default,
	}
}

/// Ticket handed out by [`Notifier::show`].
pub type Ticket = u64;

/// Single-slot notification holder. Each `show` supersedes the previous
/// notification, and a dismiss timer only clears the one it was started for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notifier {
	current: Option<Notification>,
	seq: Ticket,
}

impl Notifier {
	/// Replace the current notification; the ticket identifies this showing.
	pub fn show(&mut self, notification: Notification) -> Ticket {
		self.seq += 1;
		self.current = Some(notification);
		self.seq
	}

	/// Clear the notification if `ticket` is still the latest one.
	pub fn dismiss(&mut self, ticket: Ticket) -> bool {
		if ticket == self.seq && self.current.is_some() {
			self.current = None;
			true
		} else {
			false
		}
	}

	/// Notification on screen, if any.
	pub fn current(&self) -> Option<&Notification> {
		self.current.as_ref()
	}
}
