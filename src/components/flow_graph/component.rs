use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use super::clipboard::copy_text;
use super::interaction::{
	COPY_FAILED_MESSAGE, ClickEffect, InteractionState, NOTIFICATION_DURATION, Notification, Notifier,
};
use super::layout::{LayoutConfig, LayoutEngine};
use super::render;
use super::types::{FlowGraph, GraphEdge, Node};

/// Wait after mount before the first measurement so the container has its size.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Donor -> organization -> recipient diagram. Hovering shows details,
/// clicking pins an element and copies its address or transaction hashes.
#[component]
pub fn FundFlowGraph(
	/// Graph to draw; the layout follows its changes.
	#[prop(into)]
	graph: Signal<FlowGraph>,
	/// Diagram geometry.
	#[prop(default = LayoutConfig::default())]
	config: LayoutConfig,
	/// Fixed width; measured from the container when absent.
	#[prop(default = None)]
	width: Option<f64>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let container_width = RwSignal::new(None::<f64>);
	let interaction = RwSignal::new(InteractionState::new());
	let notifier = RwSignal::new(Notifier::default());
	let engine = LayoutEngine::new(config);

	let measure = move || {
		let measured = width.or_else(|| {
			container_ref
				.get_untracked()
				.map(|el| el.client_width() as f64)
		});
		match measured {
			Some(w) if w > 0.0 => {
				let _ = container_width.try_set(Some(w));
			}
			_ => debug!("flow graph container not ready, waiting for resize"),
		}
	};

	Effect::new(move |_| match set_timeout_with_handle(measure, SETTLE_DELAY) {
		Ok(handle) => on_cleanup(move || handle.clear()),
		Err(err) => warn!("could not schedule initial layout: {err:?}"),
	});

	let resize = window_event_listener(ev::resize, move |_| measure());
	on_cleanup(move || resize.remove());

	let layout = Memo::new(move |_| {
		let width = container_width.get()?;
		graph.with(|g| engine.layout(g, width))
	});

	let notify = move |notification: Notification| {
		let Some(ticket) = notifier.try_update(|n| n.show(notification)) else {
			return;
		};
		set_timeout(
			move || {
				let _ = notifier.try_update(|n| n.dismiss(ticket));
			},
			NOTIFICATION_DURATION,
		);
	};

	let apply = move |effect: ClickEffect| match effect {
		ClickEffect::Copy {
			text,
			success_message,
		} => spawn_local(async move {
			match copy_text(text).await {
				Ok(_) => notify(Notification::success(success_message)),
				Err(err) => {
					warn!("copy to clipboard failed: {err}");
					notify(Notification::error(COPY_FAILED_MESSAGE));
				}
			}
		}),
		ClickEffect::Notify(notification) => notify(notification),
	};

	let on_node = Callback::new(move |node: Node| {
		if let Some(effect) = interaction.try_update(|s| s.click_node(&node)) {
			apply(effect);
		}
	});
	let on_edge = Callback::new(move |edge: GraphEdge| {
		if let Some(effect) = interaction.try_update(|s| s.click_edge(&edge)) {
			apply(effect);
		}
	});

	view! {
		<div
			node_ref=container_ref
			class="fund-flow-visualization"
			style="position: relative; width: 100%; min-height: 400px; overflow: auto;"
		>
			{move || notifier.with(|n| n.current().cloned()).map(render::notification)}
			{move || match layout.get() {
				Some(layout) => {
					render::scene(graph.get(), layout, config, interaction, on_node, on_edge)
						.into_any()
				}
				None => render::loading().into_any(),
			}}
		</div>
	}
}
