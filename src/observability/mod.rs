//! Crash reports, phase tracking and log setup.
//!
//! Install the panic hook and the subscriber at startup:
//!
//! ```ignore
//! use cinemap::observability::{init_tracing, install_panic_hook};
//!
//! install_panic_hook();
//! init_tracing(cli.verbose);
//! ```
//!
//! Mark phases while working so a crash report can say where it happened:
//!
//! ```ignore
//! let _phase = set_phase(DashboardPhase::Loading);
//! let _file = set_current_file(&movies_path);
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, reset_context, set_current_file, set_current_view, set_phase,
    ContextGuard, DashboardContext, DashboardPhase,
};
pub use panic_hook::install_panic_hook;

use tracing_subscriber::EnvFilter;

/// Default log directive for a `-v` count. `RUST_LOG` wins when set.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "cinemap=warn",
        1 => "cinemap=debug",
        _ => "cinemap=trace",
    }
}

/// Install a stderr subscriber. Repeated calls are ignored.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
