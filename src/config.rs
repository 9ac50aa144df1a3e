//! Environment-variable discovery (spec.md §6 "Environment discovery"),
//! grounded on `original_source/main.cpp`'s `get_env_prio` cascade: several
//! variables fall back through a small list of alternate names so that
//! configuration shared with sibling tools (`eza`, `exa`) still applies.

use std::env;

/// Preset values pulled from the environment before command-line flags are
/// applied; the CLI layer overrides whichever of these it's given an
/// explicit flag for.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Raw `LS_COLORS` rule string, parsed at the permissive level.
    pub ls_colors: Option<String>,
    /// Raw tool-specific color rule string, parsed with the full key set.
    pub dirpix_colors: Option<String>,
    /// Columns of padding after an icon glyph.
    pub icon_spacing: Option<u16>,
    /// Size/age color-scale mode string (e.g. `all`, `size`, `age`, `none`).
    pub color_scale: Option<String>,
    pub color_scale_mode: Option<String>,
    /// Minimum luminance, clamped to `[-100, 100]` then scaled to `[-1, 1]`.
    pub min_luminance: Option<f64>,
    /// Nerd Fonts glyph set version; only `2` or `3` are recognized.
    pub nerd_fonts_version: Option<u8>,
    /// Preset flags string, split and parsed the same way as `argv` (spec.md
    /// §6 "Preset flags may be supplied via an environment variable").
    pub preset_flags: Option<String>,
    pub no_color: bool,
}

/// Reads the first of `names` that is set and non-empty.
fn env_prio(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    })
}

impl EnvConfig {
    /// Reads every recognized variable from the process environment.
    #[must_use]
    pub fn discover() -> Self {
        Self {
            ls_colors: env_prio(&["LS_COLORS"]),
            dirpix_colors: env_prio(&["DIRPIX_COLORS"]),
            icon_spacing: env_prio(&["DIRPIX_ICON_SPACING", "EZA_ICON_SPACING", "EXA_ICON_SPACING"])
                .and_then(|v| v.parse().ok()),
            color_scale: env_prio(&["DIRPIX_COLOR_SCALE", "EZA_COLOR_SCALE", "EXA_COLOR_SCALE"]),
            color_scale_mode: env_prio(&[
                "DIRPIX_COLOR_SCALE_MODE",
                "EZA_COLOR_SCALE_MODE",
                "EXA_COLOR_SCALE_MODE",
            ]),
            min_luminance: env_prio(&["DIRPIX_MIN_LUMINANCE", "EZA_MIN_LUMINANCE", "EXA_MIN_LUMINANCE"])
                .and_then(|v| v.parse::<i32>().ok())
                .map(scale_luminance),
            nerd_fonts_version: env_prio(&["DIRPIX_NERD_FONTS_VERSION"]).and_then(|v| match v.trim() {
                "2" => Some(2),
                "3" => Some(3),
                _ => None,
            }),
            preset_flags: env_prio(&["DIRPIXCMD"]),
            no_color: env::var("NO_COLOR").is_ok(),
        }
    }
}

/// Clamps a raw `[-100, 100]` luminance value and rescales it to `[-1, 1]`
/// (spec.md §6 "min-luminance (bounded to `[-100, 100]` then scaled to
/// `[-1, 1]`)").
fn scale_luminance(raw: i32) -> f64 {
    f64::from(raw.clamp(-100, 100)) / 100.0
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
