//! Thread-local context tracking for crash reports.
//!
//! Records which dashboard phase is running and which source table is being
//! read, so a panic can say where in the pipeline it happened. Guards restore
//! the previous context on drop, so phases nest naturally.

use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<DashboardContext> = const { RefCell::new(DashboardContext::new()) };
}

/// Snapshot of what the dashboard was doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardContext {
    pub phase: Option<DashboardPhase>,
    /// Source file currently being read
    pub current_file: Option<PathBuf>,
    /// View currently being prepared or rendered
    pub current_view: Option<&'static str>,
}

impl DashboardContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_file: None,
            current_view: None,
        }
    }
}

/// Major stages of a dashboard run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPhase {
    /// Reading the CSV tables
    Loading,
    /// Cleaning rows and building the record store
    Normalizing,
    /// Applying the year and genre selection
    Filtering,
    /// Grouping, ranking and KPI computation
    Aggregating,
    /// Matching crew profiles to movie genres
    CrewMatching,
    /// Writing the output
    Rendering,
}

impl std::fmt::Display for DashboardPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Loading => "loading",
            Self::Normalizing => "normalizing",
            Self::Filtering => "filtering",
            Self::Aggregating => "aggregating",
            Self::CrewMatching => "crew_matching",
            Self::Rendering => "rendering",
        };
        f.write_str(name)
    }
}

/// Restores the previous context when dropped.
#[must_use = "the context is restored as soon as the guard drops"]
pub struct ContextGuard {
    previous: DashboardContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = std::mem::take(&mut self.previous);
        CURRENT_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    }
}

fn update(apply: impl FnOnce(&mut DashboardContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Enter a phase until the returned guard drops.
///
/// ```ignore
/// let _phase = set_phase(DashboardPhase::Loading);
/// let rows = read_movies(path)?;
/// ```
pub fn set_phase(phase: DashboardPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

pub fn set_current_file(path: impl Into<PathBuf>) -> ContextGuard {
    let path = path.into();
    update(|ctx| ctx.current_file = Some(path))
}

pub fn set_current_view(view: &'static str) -> ContextGuard {
    update(|ctx| ctx.current_view = Some(view))
}

/// Current context snapshot, read by the panic hook.
#[must_use]
pub fn get_current_context() -> DashboardContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| *ctx.borrow_mut() = DashboardContext::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_previous_phase() {
        reset_context();

        let _loading = set_phase(DashboardPhase::Loading);
        {
            let _filtering = set_phase(DashboardPhase::Filtering);
            assert_eq!(
                get_current_context().phase,
                Some(DashboardPhase::Filtering)
            );
        }
        assert_eq!(get_current_context().phase, Some(DashboardPhase::Loading));
    }

    #[test]
    fn test_file_and_view_nest_inside_phase() {
        reset_context();

        let _phase = set_phase(DashboardPhase::Loading);
        let ctx = {
            let _file = set_current_file("data/movies.csv");
            let _view = set_current_view("trends");
            get_current_context()
        };
        assert_eq!(ctx.phase, Some(DashboardPhase::Loading));
        assert_eq!(ctx.current_file, Some(PathBuf::from("data/movies.csv")));
        assert_eq!(ctx.current_view, Some("trends"));

        let after = get_current_context();
        assert!(after.current_file.is_none());
        assert!(after.current_view.is_none());
    }

    #[test]
    fn test_phase_display_is_snake_case() {
        assert_eq!(DashboardPhase::Loading.to_string(), "loading");
        assert_eq!(DashboardPhase::CrewMatching.to_string(), "crew_matching");
        assert_eq!(DashboardPhase::Rendering.to_string(), "rendering");
    }

    #[test]
    fn test_empty_context_after_reset() {
        let _phase = set_phase(DashboardPhase::Aggregating);
        reset_context();
        assert_eq!(get_current_context(), DashboardContext::default());
    }
}
