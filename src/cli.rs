use clap::{Parser, ValueEnum};

/// Color output control (spec.md §6 "formatting").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability and `NO_COLOR`.
    #[default]
    Auto,
    Always,
    Never,
}

/// Directories-first / directories-last / directories-mixed sort grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DirGroupArg {
    #[default]
    First,
    Last,
    Mixed,
}

/// Grid direction for wide/bare column display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Parser, Debug)]
#[command(name = "dirpix")]
#[command(
    author,
    version,
    about = "List directories with a configurable format picture, LS_COLORS-style coloring, and Git status",
    long_about = "Enumerates filesystem patterns and renders a formatted, colorized report. \
    Generalizes the classic DIR listing with a format-picture mini-language, file-type \
    coloring, icon glyphs, Git status annotation, .gitignore-aware recursion, and \
    cell-accurate column packing for variable-width filenames."
)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are inherently boolean
pub struct Cli {
    /// One or more filesystem patterns (files, directories, or globs). Defaults to `.`.
    pub patterns: Vec<String>,

    // ---- Display mode ----
    /// Force N columns in wide/bare mode instead of auto-fitting to the terminal.
    #[arg(short = 'C', long)]
    pub columns: Option<usize>,

    /// List bare filenames packed into columns instead of one entry per line.
    #[arg(short = 'w', long, overrides_with = "no_wide")]
    pub wide: bool,
    #[arg(long = "no-wide", hide = true, overrides_with = "wide")]
    pub no_wide: bool,

    /// Recurse into subdirectories.
    #[arg(short = 's', long, overrides_with = "no_recurse")]
    pub recurse: bool,
    #[arg(long = "no-recurse", hide = true, overrides_with = "recurse")]
    pub no_recurse: bool,

    /// Limit recursion to this many levels below the starting directory.
    #[arg(long)]
    pub depth: Option<usize>,

    /// Pack wide/bare columns top-to-bottom instead of left-to-right.
    #[arg(long, value_enum, default_value = "horizontal")]
    pub direction: DirectionArg,

    // ---- Filtering ----
    /// Include only entries whose attributes match these letters (e.g. `dh`).
    #[arg(long)]
    pub include_attrs: Option<String>,

    /// Exclude entries whose attributes match these letters.
    #[arg(long)]
    pub exclude_attrs: Option<String>,

    /// Extra ignore globs, beyond `.gitignore` (repeatable).
    #[arg(short = 'X', long = "ignore")]
    pub ignore_globs: Vec<String>,

    /// Honor `.gitignore` files while recursing.
    #[arg(long, overrides_with = "no_gitignore")]
    pub gitignore: bool,
    #[arg(long = "no-gitignore", hide = true, overrides_with = "gitignore")]
    pub no_gitignore: bool,

    /// Skip entries whose name starts with `.`.
    #[arg(long, overrides_with = "no_skip_hidden")]
    pub skip_hidden: bool,
    #[arg(long = "no-skip-hidden", hide = true, overrides_with = "skip_hidden")]
    pub no_skip_hidden: bool,

    // ---- Fields / formatting ----
    /// Format-picture string (spec.md §4.4). Defaults to a name+size+date picture.
    #[arg(short = 'p', long)]
    pub picture: Option<String>,

    /// Annotate entries with their Git status and show the branch in the volume header.
    #[arg(long, overrides_with = "no_git")]
    pub git: bool,
    #[arg(long = "no-git", hide = true, overrides_with = "git")]
    pub no_git: bool,

    /// Lowercase rendered filenames.
    #[arg(long, overrides_with = "no_lowercase")]
    pub lowercase: bool,
    #[arg(long = "no-lowercase", hide = true, overrides_with = "lowercase")]
    pub no_lowercase: bool,

    /// Glyph used when a filename field truncates to fit its width.
    #[arg(long, default_value = "…")]
    pub truncate_char: char,

    /// Render the resolved absolute path instead of the bare filename.
    #[arg(long, overrides_with = "no_full_path")]
    pub full_path: bool,
    #[arg(long = "no-full-path", hide = true, overrides_with = "full_path")]
    pub no_full_path: bool,

    /// Sort keys, comma-separated (`name`, `ext`, `size`, `date`, `unsorted`); prefix with
    /// `-` to reverse a key.
    #[arg(long, value_delimiter = ',', default_value = "name")]
    pub sort: Vec<String>,

    /// Directory grouping relative to files when sorting.
    #[arg(long, value_enum, default_value = "first")]
    pub group_dirs: DirGroupArg,

    /// Padding columns between wide/bare grid columns.
    #[arg(long, default_value_t = 2)]
    pub column_padding: usize,

    /// Maximum line width the column packer may fill; 0 auto-detects the terminal width.
    #[arg(long, default_value_t = 0)]
    pub max_line_width: usize,

    // ---- Color ----
    /// Control color output.
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Extra filename extensions (beyond `PATHEXT`) treated as executable for coloring.
    #[arg(long, value_delimiter = ',')]
    pub executable_ext: Vec<String>,
}

impl Cli {
    /// Resolves a `--flag`/`--no-flag` pair to its effective boolean, later occurrence wins
    /// (spec.md §6 "Option presence is positional").
    #[must_use]
    pub const fn resolve(flag: bool, no_flag: bool, default: bool) -> bool {
        if no_flag {
            false
        } else if flag {
            true
        } else {
            default
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
