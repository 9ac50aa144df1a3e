use super::*;

fn codes(s: &str) -> Vec<Code> {
    Ecma48Iter::new(s).map(|c| c.expect("valid code")).collect()
}

#[test]
fn plain_text_yields_single_text_code() {
    let result = codes("hello");
    assert_eq!(
        result,
        vec![Code {
            kind: CodeKind::Text("hello".to_string())
        }]
    );
}

#[test]
fn c0_control_is_split_out() {
    let result = codes("a\tb");
    assert_eq!(
        result,
        vec![
            Code {
                kind: CodeKind::Text("a".to_string())
            },
            Code {
                kind: CodeKind::C0('\t')
            },
            Code {
                kind: CodeKind::Text("b".to_string())
            },
        ]
    );
}

#[test]
fn csi_sgr_sequence_is_captured_whole() {
    let result = codes("\u{1B}[31mred\u{1B}[0m");
    assert_eq!(
        result,
        vec![
            Code {
                kind: CodeKind::C1 {
                    introducer: '[',
                    body: "31m".to_string()
                }
            },
            Code {
                kind: CodeKind::Text("red".to_string())
            },
            Code {
                kind: CodeKind::C1 {
                    introducer: '[',
                    body: "0m".to_string()
                }
            },
        ]
    );
}

#[test]
fn csi_sequence_with_too_many_params_errors() {
    let huge_params = "9;".repeat(300);
    let input = format!("\u{1B}[{huge_params}m");
    let mut iter = Ecma48Iter::new(&input);
    let result = iter.next().unwrap();
    assert!(matches!(result, Err(DirpixError::BadEscapeCode(_))));
}

#[test]
fn osc_title_sequence_terminated_by_bel() {
    let result = codes("\u{1B}]0;my title\u{07}");
    assert_eq!(
        result,
        vec![Code {
            kind: CodeKind::C1 {
                introducer: ']',
                body: "0;my title".to_string()
            }
        }]
    );
}

#[test]
fn osc_sequence_terminated_by_st() {
    let result = codes("\u{1B}]2;title\u{1B}\\");
    assert_eq!(
        result,
        vec![Code {
            kind: CodeKind::C1 {
                introducer: ']',
                body: "2;title".to_string()
            }
        }]
    );
}

#[test]
fn decode_osc_title_form_yields_no_output() {
    assert_eq!(decode_osc("0;some title"), OscVariant::DisplayNoOutput);
    assert_eq!(decode_osc("2;some title"), OscVariant::DisplayNoOutput);
}

#[test]
fn decode_osc_env_var_form_reads_value() {
    std::env::set_var("DIRPIX_ECMA48_TEST_VAR", "hello");
    let variant = decode_osc("9;8;\"DIRPIX_ECMA48_TEST_VAR\"");
    assert_eq!(
        variant,
        OscVariant::DisplayOutput {
            variable: "DIRPIX_ECMA48_TEST_VAR".to_string(),
            value: "hello".to_string(),
        }
    );
    std::env::remove_var("DIRPIX_ECMA48_TEST_VAR");
}

#[test]
fn decode_osc_unknown_form_is_opaque() {
    let variant = decode_osc("52;c;base64==");
    assert_eq!(
        variant,
        OscVariant::Opaque {
            command: "52;c;base64==".to_string()
        }
    );
}

#[test]
fn process_plaintext_strips_all_escapes() {
    let (out, cells) = process("\u{1B}[31mred\u{1B}[0m", ProcessorFlags::PLAINTEXT);
    assert_eq!(out, "red");
    assert_eq!(cells, 3);
}

#[test]
fn process_default_flags_roundtrip_unchanged() {
    let input = "\u{1B}[31mred\u{1B}[0m";
    let (out, cells) = process(input, ProcessorFlags::NONE);
    assert_eq!(out, input);
    assert_eq!(cells, 3);
}

#[test]
fn process_colorless_strips_plain_sgr_color_codes() {
    let (out, _) = process("\u{1B}[31;1mred\u{1B}[0m", ProcessorFlags::COLORLESS);
    assert_eq!(out, "\u{1B}[1mred\u{1B}[0m");
}

#[test]
fn process_colorless_strips_8bit_and_24bit_color_codes() {
    let (out, _) = process("\u{1B}[38;5;196mred", ProcessorFlags::COLORLESS);
    assert_eq!(out, "red");

    let (out, _) = process("\u{1B}[48;2;10;20;30mred", ProcessorFlags::COLORLESS);
    assert_eq!(out, "red");
}

#[test]
fn process_lineless_strips_underline_but_keeps_color() {
    let (out, _) = process("\u{1B}[4;31mred", ProcessorFlags::LINELESS);
    assert_eq!(out, "\u{1B}[31mred");
}

#[test]
fn process_combined_colorless_and_lineless() {
    let flags = ProcessorFlags::COLORLESS | ProcessorFlags::LINELESS;
    let (out, _) = process("\u{1B}[4;31;1mred", flags);
    assert_eq!(out, "\u{1B}[1mred");
}

#[test]
fn process_sgr_that_becomes_empty_is_dropped_entirely() {
    let (out, _) = process("\u{1B}[31mred", ProcessorFlags::COLORLESS);
    assert_eq!(out, "red");
}

#[test]
fn rewrite_sgr_ignores_non_sgr_csi() {
    assert_eq!(rewrite_sgr("2J", ProcessorFlags::COLORLESS), None);
}
