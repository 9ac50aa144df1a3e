//! ECMA-48 escape-sequence iterator and write-time style processor.
//!
//! Grounded on `original_source/ecma48.cpp`/`.h`, reworked per the design
//! note to use a sum-type state machine instead of an embedded re-entrant
//! parser.

use crate::error::{DirpixError, Result};

/// One decoded unit of an escape-aware text stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeKind {
    /// Plain visible text with no embedded control codes.
    Text(String),
    /// A C0 control character (0x00-0x1F, 0x7F).
    C0(char),
    /// A C1 control sequence other than CSI/OSC (DCS, APC, PM, SOS, ...).
    C1 { introducer: char, body: String },
    /// An "ICF" (in-context formatting, e.g. the vertical-tab marker)
    /// private escape used for soft line-wrap hints.
    Icf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub kind: CodeKind,
}

/// Decoded variants of an OSC (Operating System Command) sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OscVariant {
    /// Title-setting OSC (`ESC ] 0 ; ... BEL`): no visible output.
    DisplayNoOutput,
    /// `ESC ] 9 ; 8 ; "VAR" ST` form: emits the named environment variable's value.
    DisplayOutput { variable: String, value: String },
    /// Any other OSC payload, passed through uninterpreted.
    Opaque { command: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Plain,
    Esc,
    CsiParam,
    CmdStr,
    EscSt,
    CharStr,
}

/// Iterates a string, yielding typed codes (`text | c0 | c1 | icf`) the way
/// spec.md §4.1 describes, tracking CSI/OSC sequences via an explicit
/// finite-state machine.
pub struct Ecma48Iter<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    max_csi_len: usize,
}

const ESC: char = '\u{1B}';
const BEL: char = '\u{07}';
const MAX_CSI_LEN: usize = 512;

impl<'a> Ecma48Iter<'a> {
    #[must_use]
    pub fn new(s: &'a str) -> Self {
        Self {
            chars: s.chars().peekable(),
            max_csi_len: MAX_CSI_LEN,
        }
    }

    fn read_escape(&mut self) -> Result<Code> {
        let Some(&next) = self.chars.peek() else {
            return Ok(Code {
                kind: CodeKind::C0(ESC),
            });
        };

        match next {
            '[' => self.read_csi(),
            ']' => self.read_osc_raw(),
            'P' | '_' | '^' | 'X' => self.read_string_command(next),
            _ => {
                self.chars.next();
                Ok(Code {
                    kind: CodeKind::C1 {
                        introducer: next,
                        body: String::new(),
                    },
                })
            }
        }
    }

    fn read_csi(&mut self) -> Result<Code> {
        self.chars.next(); // consume '['
        let mut state = State::CsiParam;
        let mut body = String::new();
        loop {
            if body.len() > self.max_csi_len {
                return Err(DirpixError::BadEscapeCode(
                    "CSI sequence exceeded internal length bound".to_string(),
                ));
            }
            let Some(ch) = self.chars.next() else {
                break;
            };
            match state {
                State::CsiParam => {
                    if ch.is_ascii_digit() || ch == ';' || ch == '?' || ch == ' ' {
                        body.push(ch);
                    } else {
                        body.push(ch);
                        break;
                    }
                }
                _ => unreachable!(),
            }
        }
        Ok(Code {
            kind: CodeKind::C1 {
                introducer: '[',
                body,
            },
        })
    }

    fn read_osc_raw(&mut self) -> Result<Code> {
        self.chars.next(); // consume ']'
        let mut body = String::new();
        loop {
            match self.chars.next() {
                None => break,
                Some(BEL) => break,
                Some(ESC) => {
                    if self.chars.peek() == Some(&'\\') {
                        self.chars.next();
                    }
                    break;
                }
                Some(ch) => body.push(ch),
            }
        }
        Ok(Code {
            kind: CodeKind::C1 {
                introducer: ']',
                body,
            },
        })
    }

    fn read_string_command(&mut self, introducer: char) -> Result<Code> {
        self.chars.next();
        let mut body = String::new();
        loop {
            match self.chars.next() {
                None => break,
                Some(ESC) => {
                    if self.chars.peek() == Some(&'\\') {
                        self.chars.next();
                    }
                    break;
                }
                Some(ch) => body.push(ch),
            }
        }
        Ok(Code {
            kind: CodeKind::C1 { introducer, body },
        })
    }
}

impl Iterator for Ecma48Iter<'_> {
    type Item = Result<Code>;

    fn next(&mut self) -> Option<Self::Item> {
        let &first = self.chars.peek()?;

        if first == ESC {
            self.chars.next();
            return Some(self.read_escape());
        }
        if (first as u32) < 0x20 || first as u32 == 0x7F {
            self.chars.next();
            return Some(Ok(Code {
                kind: CodeKind::C0(first),
            }));
        }

        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch == ESC || (ch as u32) < 0x20 || ch as u32 == 0x7F {
                break;
            }
            text.push(ch);
            self.chars.next();
        }
        Some(Ok(Code {
            kind: CodeKind::Text(text),
        }))
    }
}

/// Decodes a raw OSC body (as captured into `CodeKind::C1 { introducer: ']', body }`)
/// into its semantic variant.
#[must_use]
pub fn decode_osc(body: &str) -> OscVariant {
    // `9;8;"VAR"` is the "emit environment variable" form.
    if let Some(rest) = body.strip_prefix("9;8;") {
        let var = rest.trim_matches('"').to_string();
        let value = std::env::var(&var).unwrap_or_default();
        return OscVariant::DisplayOutput {
            variable: var,
            value,
        };
    }
    if body.starts_with('0') || body.starts_with('2') {
        return OscVariant::DisplayNoOutput;
    }
    OscVariant::Opaque {
        command: body.to_string(),
    }
}

/// Flags controlling [`process`]'s write-time style stripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessorFlags(u8);

impl ProcessorFlags {
    pub const NONE: Self = Self(0);
    pub const PLAINTEXT: Self = Self(1 << 0);
    pub const COLORLESS: Self = Self(1 << 1);
    pub const LINELESS: Self = Self(1 << 2);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ProcessorFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Line-style SGR codes stripped in `lineless` mode (underline, overline,
/// strikethrough, and their "off" counterpart for underline).
const LINE_STYLE_CODES: &[&str] = &["4", "9", "21", "53"];

/// Write-time style stripping: given `input` and `flags`, produce the
/// transformed text plus its cell-count (spec.md §4.1 "Processor").
#[must_use]
pub fn process(input: &str, flags: ProcessorFlags) -> (String, usize) {
    let mut out = String::new();
    let mut cells = 0usize;
    let mut iter = Ecma48Iter::new(input);

    while let Some(code) = iter.next() {
        let Ok(code) = code else { continue };
        match code.kind {
            CodeKind::Text(text) => {
                if flags.contains(ProcessorFlags::PLAINTEXT) {
                    cells += crate::text::width::display_width(&text);
                    continue;
                }
                cells += crate::text::width::display_width(&text);
                out.push_str(&text);
            }
            CodeKind::C0(ch) => {
                if !flags.contains(ProcessorFlags::PLAINTEXT) {
                    out.push(ch);
                }
            }
            CodeKind::C1 {
                introducer: '[',
                body,
            } => {
                if flags.contains(ProcessorFlags::PLAINTEXT) {
                    continue;
                }
                if let Some(rewritten) = rewrite_sgr(&body, flags) {
                    if !rewritten.is_empty() {
                        out.push(ESC);
                        out.push('[');
                        out.push_str(&rewritten);
                    }
                } else {
                    out.push(ESC);
                    out.push('[');
                    out.push_str(&body);
                }
            }
            CodeKind::C1 { introducer, body } => {
                if !flags.contains(ProcessorFlags::PLAINTEXT) {
                    out.push(ESC);
                    out.push(introducer);
                    out.push_str(&body);
                }
            }
            CodeKind::Icf => {}
        }
    }

    (out, cells)
}

/// Rewrites an SGR parameter body for `colorless`/`lineless` modes.
/// Returns `None` when the body isn't an SGR (doesn't end in `m`).
fn rewrite_sgr(body: &str, flags: ProcessorFlags) -> Option<String> {
    let params = body.strip_suffix('m')?;
    if !(flags.contains(ProcessorFlags::COLORLESS) || flags.contains(ProcessorFlags::LINELESS)) {
        return Some(body.to_string());
    }

    let mut kept: Vec<&str> = Vec::new();
    let mut parts = params.split(';').peekable();
    while let Some(code) = parts.next() {
        let is_color_prefix = matches!(code, "38" | "48");
        if is_color_prefix {
            if flags.contains(ProcessorFlags::COLORLESS) {
                // Skip this code and its trailing mode+channel args (5;N or 2;R;G;B).
                match parts.peek().copied() {
                    Some("5") => {
                        parts.next();
                        parts.next();
                    }
                    Some("2") => {
                        parts.next();
                        parts.next();
                        parts.next();
                        parts.next();
                    }
                    _ => {}
                }
            } else {
                kept.push(code);
                if let Some(&mode) = parts.peek() {
                    kept.push(mode);
                    parts.next();
                    match mode {
                        "5" => {
                            if let Some(n) = parts.next() {
                                kept.push(n);
                            }
                        }
                        "2" => {
                            for _ in 0..3 {
                                if let Some(n) = parts.next() {
                                    kept.push(n);
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            continue;
        }

        let is_plain_color = matches!(
            code,
            "30" | "31" | "32" | "33" | "34" | "35" | "36" | "37" | "39" | "40" | "41" | "42"
                | "43" | "44" | "45" | "46" | "47" | "49" | "90" | "91" | "92" | "93" | "94"
                | "95" | "96" | "97" | "100" | "101" | "102" | "103" | "104" | "105" | "106"
                | "107"
        );
        if is_plain_color && flags.contains(ProcessorFlags::COLORLESS) {
            continue;
        }

        let is_line_style = LINE_STYLE_CODES.contains(&code);
        if is_line_style && flags.contains(ProcessorFlags::LINELESS) {
            continue;
        }

        kept.push(code);
    }

    if kept.is_empty() {
        return Some(String::new());
    }
    Some(format!("{}m", kept.join(";")))
}

#[cfg(test)]
#[path = "ecma48_tests.rs"]
mod tests;
