use circuit_portfolio::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
