//! Candidate-per-column-count packer (spec.md §4.5), grounded directly on
//! `original_source/columns.cpp`'s single-pass candidate-invalidation loop.

/// Grid fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Fills rows first (item 0, 1, 2, ... go left to right along a row).
    Horizontal,
    /// Fills columns first (item 0, 1, 2, ... go top to bottom in a column).
    Vertical,
}

const MAX_COLUMNS: usize = 50;

struct Candidate {
    valid: bool,
    widths: Vec<usize>,
    stride: usize,
}

/// Computes per-column widths for `count` items whose widths are produced
/// lazily by `width`, under `direction`, with `padding` cells between
/// columns and a hard `max_width` budget.
///
/// Returns the column-width vector for the largest column count that still
/// fits; `count == 0` returns an empty vector.
#[must_use]
pub fn pack_columns(
    count: usize,
    mut width: impl FnMut(usize) -> usize,
    direction: Direction,
    padding: usize,
    max_width: usize,
) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }

    let max_k = count.min(MAX_COLUMNS);
    let mut candidates: Vec<Candidate> = (1..=max_k)
        .map(|k| Candidate {
            valid: true,
            widths: vec![0; k],
            stride: count.div_ceil(k),
        })
        .collect();

    for i in 0..count {
        let item_width = width(i);
        for (k_idx, candidate) in candidates.iter_mut().enumerate() {
            if !candidate.valid {
                continue;
            }
            let k = k_idx + 1;
            let col = match direction {
                Direction::Vertical => i / candidate.stride,
                Direction::Horizontal => i % k,
            };
            if item_width > candidate.widths[col] {
                candidate.widths[col] = item_width;
            }
            if k > 1 {
                let line_width: usize =
                    candidate.widths.iter().sum::<usize>() + padding * (k - 1);
                if line_width > max_width {
                    candidate.valid = false;
                }
            }
        }
    }

    candidates
        .into_iter()
        .rev()
        .find(|c| c.valid)
        .map(|c| c.widths)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "columns_tests.rs"]
mod tests;
