//! Color rule parser (spec.md §4.2 "Rule syntax" / "Parsing" / "Validation"),
//! grounded on `original_source/colors.cpp`'s rule tokenizer, reworked as an
//! explicit three-state scanner (plain, quoted, backslash-escape) instead of
//! the original's inline character-by-character parser.

use crate::error::{DirpixError, Result};
use crate::model::Attributes;

use super::lookup::ContentFlags;

/// One glob predicate within a rule's LHS, with its `not`/`!` bit.
#[derive(Debug, Clone)]
pub struct GlobPredicate {
    pub negated: bool,
    pub pattern: String,
}

/// A single parsed color rule (spec.md §3 "Color rule").
#[derive(Debug, Clone)]
pub struct Rule {
    pub required_attrs: Attributes,
    pub forbidden_attrs: Attributes,
    pub required_flags: ContentFlags,
    pub forbidden_flags: ContentFlags,
    pub globs: Vec<GlobPredicate>,
    pub sgr: String,
}

impl Rule {
    #[must_use]
    pub fn matches(&self, attrs: Attributes, flags: ContentFlags, filename: &str) -> bool {
        if !attrs.contains(self.required_attrs) {
            return false;
        }
        if attrs.intersects(self.forbidden_attrs) {
            return false;
        }
        if !flags.contains(self.required_flags) {
            return false;
        }
        if flags.intersects(self.forbidden_flags) {
            return false;
        }
        for glob in &self.globs {
            let hit = crate::glob::wildmatch(&glob.pattern, filename, crate::glob::MatchFlags::CASEFOLD);
            if hit == glob.negated {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Plain,
    Quoted,
    Escape(EscapeReturn),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeReturn {
    Plain,
    Quoted,
}

/// Splits the raw rules string into tokenized rule records: each record is
/// the ordered list of resolved tokens (attribute keys, flag keys, `not`,
/// globs, and the trailing SGR string as the final token).
fn tokenize(input: &str) -> Vec<Vec<String>> {
    let mut rules = Vec::new();
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut state = State::Plain;
    let mut token_open = false;

    macro_rules! flush_token {
        () => {
            if token_open {
                tokens.push(std::mem::take(&mut current));
                token_open = false;
            }
        };
    }
    macro_rules! flush_rule {
        () => {
            flush_token!();
            if !tokens.is_empty() {
                rules.push(std::mem::take(&mut tokens));
            }
        };
    }

    for ch in input.chars() {
        match state {
            State::Plain => match ch {
                '\\' => state = State::Escape(EscapeReturn::Plain),
                '"' => {
                    state = State::Quoted;
                    token_open = true;
                }
                ':' => flush_rule!(),
                ' ' | '\t' | '=' => flush_token!(),
                other => {
                    current.push(other);
                    token_open = true;
                }
            },
            State::Quoted => match ch {
                '\\' => state = State::Escape(EscapeReturn::Quoted),
                '"' => state = State::Plain,
                other => current.push(other),
            },
            State::Escape(ret) => {
                let literal = match ch {
                    '\\' => Some('\\'),
                    '"' => Some('"'),
                    '_' => Some(' '),
                    ' ' => Some(' '),
                    _ => None,
                };
                if let Some(lit) = literal {
                    current.push(lit);
                    token_open = true;
                }
                state = match ret {
                    EscapeReturn::Plain => State::Plain,
                    EscapeReturn::Quoted => State::Quoted,
                };
            }
        }
    }
    flush_rule!();
    rules
}

const VALID_STYLE_CODES: &[&str] = &[
    "0", "1", "2", "3", "4", "7", "9", "21", "22", "23", "24", "25", "27", "29", "53", "55", "59",
];

fn is_valid_4bit_color(code: &str) -> bool {
    matches!(code.parse::<u16>(), Ok(n) if (30..=37).contains(&n) || n == 39 || (40..=47).contains(&n) || n == 49 || (90..=97).contains(&n) || (100..=107).contains(&n))
}

/// Validates an RHS as a semicolon-separated sequence of codes drawn from
/// the closed set in spec.md §4.2.
fn validate_sgr(rhs: &str) -> bool {
    let mut parts = rhs.split(';').peekable();
    while let Some(code) = parts.next() {
        if VALID_STYLE_CODES.contains(&code) || is_valid_4bit_color(code) {
            continue;
        }
        if code == "38" || code == "48" {
            match parts.next() {
                Some("5") => {
                    let Some(n) = parts.next() else { return false };
                    if n.parse::<u16>().is_ok_and(|v| v <= 255) {
                        continue;
                    }
                    return false;
                }
                Some("2") => {
                    for _ in 0..3 {
                        let Some(n) = parts.next() else { return false };
                        if !n.parse::<u16>().is_ok_and(|v| v <= 255) {
                            return false;
                        }
                    }
                    continue;
                }
                _ => return false,
            }
        }
        return false;
    }
    true
}

fn attribute_mask(key: &str) -> Option<Attributes> {
    Some(match key {
        "di" => Attributes::DIRECTORY,
        "hi" => Attributes::HIDDEN,
        "ro" => Attributes::READONLY,
        "sy" => Attributes::SYSTEM,
        "en" => Attributes::ENCRYPTED,
        "sp" => Attributes::SPARSE,
        "of" => Attributes::OFFLINE,
        // "ca"/"ta" name the compressed/temporary *attribute* bits, distinct
        // from the "co"/"tm" *content-flag* keys (compressed file, temp file).
        "ca" => Attributes::COMPRESSED,
        "ta" => Attributes::TEMPORARY,
        "ln" | "or" => Attributes::REPARSE_POINT,
        _ => return None,
    })
}

fn flag_mask(key: &str) -> Option<ContentFlags> {
    Some(match key {
        "do" => ContentFlags::DOCUMENT,
        "im" => ContentFlags::IMAGE,
        "vi" => ContentFlags::VIDEO,
        "mu" => ContentFlags::MUSIC,
        "lo" => ContentFlags::LOSSLESS,
        "co" => ContentFlags::COMPRESSED,
        "cr" => ContentFlags::CRYPTO,
        "bu" => ContentFlags::BUILD,
        "sc" => ContentFlags::SOURCE,
        "tm" => ContentFlags::TEMP,
        "ex" => ContentFlags::EXECUTABLE,
        _ => return None,
    })
}

/// Parses a `;`-free rules body already split into one `Vec<String>` per
/// rule by [`tokenize`].
fn parse_one(tokens: Vec<String>) -> Result<Rule> {
    let Some((rhs, lhs_tokens)) = tokens.split_last() else {
        return Err(DirpixError::BadColorSyntax("empty rule".to_string()));
    };

    if !validate_sgr(rhs) {
        return Err(DirpixError::BadColorSyntax(format!(
            "unrecognized SGR code in rule RHS: {rhs}"
        )));
    }

    let mut required_attrs = Attributes::NONE;
    let mut forbidden_attrs = Attributes::NONE;
    let mut required_flags = ContentFlags::NONE;
    let mut forbidden_flags = ContentFlags::NONE;
    let mut globs = Vec::new();
    let mut negate_next = false;

    for token in lhs_tokens {
        if token == "not" || token == "!" {
            negate_next = true;
            continue;
        }
        if let Some(mask) = attribute_mask(token) {
            if negate_next {
                forbidden_attrs |= mask;
            } else {
                required_attrs |= mask;
            }
        } else if let Some(mask) = flag_mask(token) {
            if negate_next {
                forbidden_flags |= mask;
            } else {
                required_flags |= mask;
            }
        } else {
            globs.push(GlobPredicate {
                negated: negate_next,
                pattern: token.clone(),
            });
        }
        negate_next = false;
    }

    Ok(Rule {
        required_attrs,
        forbidden_attrs,
        required_flags,
        forbidden_flags,
        globs,
        sgr: rhs.clone(),
    })
}

/// Parses a semicolon-separated rules string, applying the "readonly alone
/// implies not-directory" and "glob alone implies not-directory" semantic
/// overlays as a rewrite pass over the parsed list (spec.md §4.2
/// "Readonly subtlety"; Design Note on rewrite-pass-not-inline-check).
///
/// # Errors
/// Returns [`DirpixError::BadColorSyntax`] if any rule's RHS uses a code
/// outside the closed set in spec.md §4.2; the offending rule is dropped
/// with the error surfaced to the caller via the reporter, not propagated
/// as a hard failure, matching "no rule is ever silently partially applied".
/// Built-in color rules loaded when a color source is the literal token `*`
/// (spec.md §6 "A literal `*` means 'load built-in defaults'").
pub const DEFAULT_RULE_TEXT: &str =
    "di=1;34:ln=1;36:or=31:ex=1;32:ro=37:hi=90:ca=33:ta=90:*.zip=31:*.tar=31:*.gz=31";

pub fn parse_rules(input: &str) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    for tokens in tokenize(input) {
        if tokens.len() == 1 && tokens[0] == "reset" {
            rules.clear();
            continue;
        }
        let mut rule = match parse_one(tokens) {
            Ok(rule) => rule,
            Err(_) => continue,
        };
        apply_readonly_overlay(&mut rule);
        apply_glob_only_overlay(&mut rule);
        rules.push(rule);
    }
    Ok(rules)
}

fn apply_readonly_overlay(rule: &mut Rule) {
    if rule.required_attrs == Attributes::READONLY && rule.globs.is_empty() {
        rule.forbidden_attrs |= Attributes::DIRECTORY;
    }
}

fn apply_glob_only_overlay(rule: &mut Rule) {
    if rule.required_attrs == Attributes::NONE && !rule.globs.is_empty() {
        rule.forbidden_attrs |= Attributes::DIRECTORY;
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
