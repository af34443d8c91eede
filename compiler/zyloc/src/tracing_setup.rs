use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the stderr tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=zylo_eval=trace`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let tree = tracing_tree::HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_indent_lines(true);
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tree)
            .init();
    });
}
