//! Panic hook that prints a structured crash report.
//!
//! The report names the dashboard phase, the source table and the view that
//! were active, which is usually enough to reproduce the crash with the same
//! CSV files.

use super::context::{get_current_context, DashboardContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 78;

/// Install the crash report hook. Call once, early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();

    eprintln!();
    print_header();
    print_panic_details(info);
    print_context_section(&context);
    print_backtrace_section();
    print_footer(&context);
}

fn rule(left: char, right: char) {
    eprintln!("{left}{}{right}", "═".repeat(WIDTH));
}

fn line(text: &str) {
    eprintln!("║  {:<width$}║", truncate(text, WIDTH - 2), width = WIDTH - 2);
}

fn print_header() {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    rule('╔', '╗');
    eprintln!("║{:^WIDTH$}║", "CINEMAP CRASH REPORT");
    rule('╠', '╣');
    line(&format!("Version: {VERSION}"));
    line(&format!("Platform: {}", std::env::consts::OS));
    line(&format!("Time: {timestamp}"));
    rule('╠', '╣');
}

fn print_panic_details(info: &PanicHookInfo<'_>) {
    line(&format!("PANIC: {}", extract_panic_message(info)));
    if let Some(location) = info.location() {
        line(&format!(
            "Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }
}

fn print_context_section(context: &DashboardContext) {
    rule('╠', '╣');
    line("OPERATION CONTEXT:");

    match &context.phase {
        Some(phase) => line(&format!("  Phase: {phase}")),
        None => line("  Phase: (not set, crash happened before loading)"),
    }
    if let Some(metadata) = Span::current().metadata() {
        line(&format!("  Span: {}", metadata.name()));
    }
    if let Some(file) = &context.current_file {
        line(&format!("  File: {}", file.display()));
    }
    if let Some(view) = context.current_view {
        line(&format!("  View: {view}"));
    }
}

fn print_backtrace_section() {
    rule('╠', '╣');
    if std::env::var("RUST_BACKTRACE").is_ok() {
        line("STACK TRACE:");
        rule('╚', '╝');
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        line("Run with RUST_BACKTRACE=1 for stack trace");
        rule('╚', '╝');
    }
}

fn print_footer(context: &DashboardContext) {
    eprintln!();
    if let Some(file) = &context.current_file {
        eprintln!("Include this crash report and the input: {}", file.display());
    }
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Shorten to `max_len` characters, ending in `...` when cut.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate("Era uma vez no Oeste, a longa versão restaurada", 20);
        assert_eq!(result.chars().count(), 20);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_keeps_char_boundaries() {
        assert_eq!(truncate("ação é ótima", 7), "ação...");
    }

    #[test]
    fn test_truncate_very_short_max() {
        assert_eq!(truncate("hello", 3), "...");
    }
}
