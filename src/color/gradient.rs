//! OKLab-based luminance remap for the `time`/`size` color scale (spec.md
//! §4.2 "Gradient"), grounded on `original_source/colors.cpp`'s scale
//! post-processing step.

/// Extracts the final `38;2;R;G;B` / `38;5;N` / 4-bit foreground color from
/// an SGR string, or a small built-in table for the 4-bit codes, as the
/// starting point for the gradient remap.
fn base_rgb(sgr: &str) -> Option<(u8, u8, u8)> {
    let codes: Vec<&str> = sgr.split(';').collect();
    let mut i = 0;
    while i < codes.len() {
        match codes[i] {
            "38" if codes.get(i + 1) == Some(&"2") => {
                let r = codes.get(i + 2)?.parse().ok()?;
                let g = codes.get(i + 3)?.parse().ok()?;
                let b = codes.get(i + 4)?.parse().ok()?;
                return Some((r, g, b));
            }
            "38" if codes.get(i + 1) == Some(&"5") => {
                let n: u8 = codes.get(i + 2)?.parse().ok()?;
                return Some(ansi256_to_rgb(n));
            }
            code => {
                if let Ok(n) = code.parse::<u16>() {
                    if let Some(rgb) = four_bit_to_rgb(n) {
                        return Some(rgb);
                    }
                }
            }
        }
        i += 1;
    }
    None
}

const fn four_bit_to_rgb(code: u16) -> Option<(u8, u8, u8)> {
    let table: [(u8, u8, u8); 8] = [
        (0, 0, 0),
        (205, 0, 0),
        (0, 205, 0),
        (205, 205, 0),
        (0, 0, 238),
        (205, 0, 205),
        (0, 205, 205),
        (229, 229, 229),
    ];
    match code {
        30..=37 => Some(table[(code - 30) as usize]),
        90..=97 => Some(table[(code - 90) as usize]),
        _ => None,
    }
}

fn ansi256_to_rgb(n: u8) -> (u8, u8, u8) {
    if n < 16 {
        four_bit_to_rgb(u16::from(n) % 8 + 30).unwrap_or((0, 0, 0))
    } else if n < 232 {
        let idx = n - 16;
        let levels = [0u8, 95, 135, 175, 215, 255];
        let r = levels[(idx / 36) as usize];
        let g = levels[((idx / 6) % 6) as usize];
        let b = levels[(idx % 6) as usize];
        (r, g, b)
    } else {
        let level = 8 + (n - 232) * 10;
        (level, level, level)
    }
}

fn srgb_to_linear(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let out = if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (out.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Linear sRGB → OKLab, per Björn Ottosson's reference matrices.
fn linear_rgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let l = 0.412_221_46 * r + 0.536_332_55 * g + 0.051_445_99 * b;
    let m = 0.211_903_5 * r + 0.680_699_5 * g + 0.107_396_96 * b;
    let s = 0.088_302_46 * r + 0.281_718_85 * g + 0.629_978_7 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    (
        0.210_454_26 * l_ + 0.793_617_79 * m_ - 0.004_072_05 * s_,
        1.977_998_5 * l_ - 2.428_592_2 * m_ + 0.450_593_7 * s_,
        0.025_904_04 * l_ + 0.782_771_77 * m_ - 0.808_675_77 * s_,
    )
}

fn oklab_to_linear_rgb(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let l_ = l + 0.396_337_78 * a + 0.215_803_76 * b;
    let m_ = l - 0.105_561_346 * a - 0.063_854_17 * b;
    let s_ = l - 0.089_484_18 * a - 1.291_485_5 * b;

    let l3 = l_ * l_ * l_;
    let m3 = m_ * m_ * m_;
    let s3 = s_ * s_ * s_;

    (
        4.076_741_7 * l3 - 3.307_711_6 * m3 + 0.230_969_94 * s3,
        -1.268_438 * l3 + 2.609_757_4 * m3 - 0.341_319_38 * s3,
        -0.004_196_086 * l3 - 0.703_418_6 * m3 + 1.707_614_7 * s3,
    )
}

/// Remaps `sgr`'s foreground color's OKLab luminance toward `min_luminance`
/// (`[-1, 1]`, already scaled per spec.md §6) along
/// `L = L_min + (1 - L_min) * exp(-4 * (1 - t))` where `t` is the
/// normalized `[0, 1]` position, appending the new `38;2;R;G;B` to `sgr`.
#[must_use]
pub fn gradient_remap(sgr: &str, t: f64, min_luminance: f64) -> String {
    let Some((r, g, b)) = base_rgb(sgr) else {
        return sgr.to_string();
    };
    let t = t.clamp(0.0, 1.0);

    let (lr, lg, lb) = (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    let (l, a, ok_b) = linear_rgb_to_oklab(lr, lg, lb);

    let l_min = min_luminance.clamp(-1.0, 1.0).max(0.0);
    let new_l = l_min + (1.0 - l_min) * (-4.0 * (1.0 - t)).exp();
    let new_l = new_l.min(l.max(new_l));

    let (nr, ng, nb) = oklab_to_linear_rgb(new_l, a, ok_b);
    let (r, g, b) = (
        linear_to_srgb(nr),
        linear_to_srgb(ng),
        linear_to_srgb(nb),
    );

    format!("{sgr};38;2;{r};{g};{b}")
}

#[cfg(test)]
#[path = "gradient_tests.rs"]
mod tests;
