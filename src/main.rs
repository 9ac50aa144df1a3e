use std::io::IsTerminal;
use std::sync::Arc;

use clap::Parser;

use dirpix::cli::{Cli, DirGroupArg, DirectionArg};
use dirpix::color::{self, DEFAULT_RULE_TEXT};
use dirpix::config::EnvConfig;
use dirpix::layout::Direction;
use dirpix::output::{install_interrupt_reset, OutputSink, Reporter, StderrReporter};
use dirpix::picture::{parse_picture, PictureOptions};
use dirpix::scan::{DirGrouping, ScanDriver, ScanOptions, SortKey, SortOrder};
use dirpix::{EXIT_ERROR, EXIT_SUCCESS};

fn main() {
    let cli = Cli::parse();
    let env = EnvConfig::discover();
    let reporter = StderrReporter::new();

    let options = match build_scan_options(&cli, &env) {
        Ok(options) => options,
        Err(err) => {
            reporter.report(&err);
            std::process::exit(EXIT_ERROR);
        }
    };

    let sink = Arc::new(OutputSink::new());
    if let Err(err) = install_interrupt_reset(Arc::clone(&sink)) {
        reporter.warn(&format!("could not install interrupt handler: {err}"));
    }

    let mut driver = ScanDriver::new(options, &sink, &reporter);
    let code = driver.run(&cli.patterns);
    std::process::exit(code);
}

fn build_scan_options(cli: &Cli, env: &EnvConfig) -> dirpix::Result<ScanOptions> {
    let picture_source = cli.picture.as_deref().unwrap_or("F Sm Dm");
    let picture = parse_picture(
        picture_source,
        PictureOptions {
            short_names: false,
            owner: false,
            ratio: false,
        },
    )?;

    let color_source = build_color_source(env);
    let color_rules = if use_colors(cli) {
        color::parse_rules(&color_source)?
    } else {
        Vec::new()
    };

    let mut executable_exts = cli.executable_ext.clone();
    if let Ok(pathext) = std::env::var("PATHEXT") {
        executable_exts.extend(color::executable_extensions_from_pathext(&pathext));
    }

    let sort = build_sort_order(cli);

    let max_line_width = if cli.max_line_width > 0 {
        cli.max_line_width
    } else {
        terminal_size::terminal_size().map_or(80, |(w, _)| w.0 as usize)
    };

    Ok(ScanOptions {
        picture,
        sort,
        recurse: Cli::resolve(cli.recurse, cli.no_recurse, false),
        limit_depth: cli.depth,
        skip_hidden: Cli::resolve(cli.skip_hidden, cli.no_skip_hidden, false),
        use_gitignore: Cli::resolve(cli.gitignore, cli.no_gitignore, true),
        use_git: Cli::resolve(cli.git, cli.no_git, false),
        extra_ignore_globs: cli.ignore_globs.clone(),
        lowercase: Cli::resolve(cli.lowercase, cli.no_lowercase, false),
        truncate_glyph: cli.truncate_char,
        full_path: Cli::resolve(cli.full_path, cli.no_full_path, false),
        wide: Cli::resolve(cli.wide, cli.no_wide, false),
        direction: match cli.direction {
            DirectionArg::Horizontal => Direction::Horizontal,
            DirectionArg::Vertical => Direction::Vertical,
        },
        column_padding: cli.column_padding,
        max_line_width,
        color_rules,
        executable_exts,
    })
}

fn use_colors(cli: &Cli) -> bool {
    match cli.color {
        dirpix::cli::ColorChoice::Always => true,
        dirpix::cli::ColorChoice::Never => false,
        dirpix::cli::ColorChoice::Auto => {
            std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal()
        }
    }
}

/// Combines `LS_COLORS` (level 0, permissive) and the tool-specific variable
/// (level 2, full key set) into one source string, substituting the
/// built-in defaults for a literal `*` token (spec.md §6).
fn build_color_source(env: &EnvConfig) -> String {
    let mut parts = Vec::new();
    if let Some(ls) = &env.ls_colors {
        parts.push(resolve_star(ls));
    }
    if let Some(dx) = &env.dirpix_colors {
        parts.push(resolve_star(dx));
    }
    if parts.is_empty() {
        DEFAULT_RULE_TEXT.to_string()
    } else {
        parts.join(":")
    }
}

fn resolve_star(raw: &str) -> String {
    if raw == "*" {
        DEFAULT_RULE_TEXT.to_string()
    } else {
        raw.to_string()
    }
}

fn build_sort_order(cli: &Cli) -> SortOrder {
    let grouping = match cli.group_dirs {
        DirGroupArg::First => DirGrouping::First,
        DirGroupArg::Last => DirGrouping::Last,
        DirGroupArg::Mixed => DirGrouping::Mixed,
    };

    if cli.sort.iter().any(|key| key.trim_start_matches('-') == "unsorted") {
        return SortOrder::unsorted().with_grouping(grouping);
    }

    let mut order = SortOrder::default().with_grouping(grouping);
    for raw in &cli.sort {
        let (reverse, name) = raw
            .strip_prefix('-')
            .map_or((false, raw.as_str()), |rest| (true, rest));
        let key = match name {
            "name" => SortKey::Name,
            "ext" | "extension" => SortKey::Extension,
            "size" => SortKey::Size(dirpix::model::WhichSize::Logical),
            "date" | "time" => SortKey::Date(dirpix::model::WhichTime::Modified),
            _ => continue,
        };
        order = order.push(key, reverse);
    }
    order
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
