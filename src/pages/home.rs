use leptos::prelude::*;

use crate::components::flow_graph::{Anchors, Edge, FundFlowGraph, GraphBuilder, Party};

/// (wallet address, backend id, name)
type Account = (&'static str, &'static str, &'static str);

const RELIEF_FUND: Account = ("rQBsLAh7nQLdRJTJnCapCsbng5Eu8oTUHW", "customer-1", "Global Relief Fund");
const FLOOD_RECOVERY: Account = (
	"rMQhytkyM4dwSJkmoAY3qxThRX2M2Py8wc",
	"customer-2",
	"Flood Recovery in Louisiana",
);
const HARVEY_RELIEF: Account = ("rEK9ZdnAxMX3eqvF8HKJdBhftcepK3by55", "customer-3", "Hurricane Harvey Relief");
const UNKNOWN: Account = ("rJcYDNsHc5zAEbnPMj4y27GdbL6k2XvtuX", "customer-4", "Unknown");

fn transfer(from: Account, to: Account, amount: &str, hashes: &[&str]) -> Edge {
	Edge {
		sender: Some(from.0.to_string()),
		sender_id: from.1.to_string(),
		sender_name: from.2.to_string(),
		receiver: Some(to.0.to_string()),
		receiver_id: to.1.to_string(),
		receiver_name: to.2.to_string(),
		currency: "RLUSD".to_string(),
		total_amount: amount.to_string(),
		hashes: hashes.iter().map(|h| h.to_string()).collect(),
	}
}

/// Sample distribution of a relief fund to three recipients.
fn sample_edges() -> Vec<Edge> {
	vec![
		transfer(
			RELIEF_FUND,
			FLOOD_RECOVERY,
			"6.0 RLUSD",
			&[
				"8880476EF3514CA212CBC1390BDDE97A67D74333A1ED5AE2B6C073E529A62F94",
				"BA6876140B48F0BDDD4E645D4870AA680F5CEECDE35874A9A2EE02B6934BD46A",
				"E7EBE31578F4F504B78E42A9B98A319321E1F6321A6AAB221D39314918C3E43B",
				"D3915AE1D43F3F6DCA0F5FA8373039EDF5A5D2074CB57F935470363896D917E0",
				"1A56697D0825AD880D0DD566EB508184DB5EA60F67033C1E8E4555A00C23B318",
				"B40242AE5DEBB99CAFAC53CEB8A77BD52CCDE0B6D3069623DCA13283AFB65F6C",
			],
		),
		transfer(
			RELIEF_FUND,
			UNKNOWN,
			"1.0 RLUSD",
			&["841567A8950DE0E65D6F272A235DBDE2426CD45C91FF0D9E71FB0C8FD51C94EC"],
		),
		transfer(
			RELIEF_FUND,
			HARVEY_RELIEF,
			"1.0 RLUSD",
			&["1DCFE9C4F3DDD57A9B86071E06EED731DAF7F60A1F3BDD8288163F0E555387A7"],
		),
		transfer(
			FLOOD_RECOVERY,
			UNKNOWN,
			"1.0 RLUSD",
			&["CC9A151CDC962ED7ED1890D60E00E792475A21E98DB59F85C41E66F4851E9139"],
		),
	]
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let distribution = Signal::derive(move || GraphBuilder::new().build(&sample_edges()));

	// A donor who has not given yet still sees the link to the organization.
	let first_donation = Signal::derive(move || {
		GraphBuilder::new()
			.with_anchors(Anchors {
				donor: Party::new("donor-1", "You (Donor)"),
				organization: Party::new(FLOOD_RECOVERY.0, FLOOD_RECOVERY.2),
			})
			.build(&[])
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<section class="fund-flow">
				<h1>"Fund Distribution"</h1>
				<p class="subtitle">"Hover for details. Click a party to copy its address, or a flow to copy its transaction hashes."</p>
				<FundFlowGraph graph=distribution />
			</section>
			<section class="fund-flow">
				<h2>"Your Donation"</h2>
				<FundFlowGraph graph=first_donation />
			</section>
		</ErrorBoundary>
	}
}
