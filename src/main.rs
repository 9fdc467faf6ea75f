use anyhow::Result;
use cinemap::cli::{Cli, Commands, OutputArgs, SelectionArgs, SourceArgs};
use cinemap::commands::{self, DashboardRequest, OutputTarget, Selection, SourcePaths, ViewKind};
use cinemap::observability::{init_tracing, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = cinemap::cli::parse_args();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Init { force } => commands::init_config(force),
        Commands::Check { source, output } => {
            commands::run_check(source_paths(source), output_target(output))
        }
        Commands::HallOfFame {
            source,
            role,
            decade,
            output,
        } => commands::run_dashboard(DashboardRequest {
            view: ViewKind::HallOfFame {
                role: role.into(),
                decade,
            },
            sources: source_paths(source),
            selection: Selection::default(),
            output: output_target(output),
        }),
        Commands::Overview {
            source,
            selection,
            output,
        } => run_view(ViewKind::Overview, source, selection, output),
        Commands::Trends {
            source,
            selection,
            output,
        } => run_view(ViewKind::Trends, source, selection, output),
        Commands::Genres {
            source,
            selection,
            output,
        } => run_view(ViewKind::Genres, source, selection, output),
        Commands::Duration {
            source,
            selection,
            output,
        } => run_view(ViewKind::Duration, source, selection, output),
        Commands::Market {
            source,
            selection,
            output,
        } => run_view(ViewKind::Market, source, selection, output),
        Commands::Report {
            source,
            selection,
            output,
        } => run_view(ViewKind::Report, source, selection, output),
    }
}

fn run_view(
    view: ViewKind,
    source: SourceArgs,
    selection: SelectionArgs,
    output: OutputArgs,
) -> Result<()> {
    commands::run_dashboard(DashboardRequest {
        view,
        sources: source_paths(source),
        selection: Selection {
            from: selection.from,
            to: selection.to,
            genres: selection.genres,
            all_genres: selection.all_genres,
        },
        output: output_target(output),
    })
}

fn source_paths(source: SourceArgs) -> SourcePaths {
    SourcePaths {
        movies: source.movies,
        crew: source.crew,
        config: source.config,
    }
}

fn output_target(output: OutputArgs) -> OutputTarget {
    OutputTarget {
        format: output.format.into(),
        path: output.output,
    }
}
