use std::ops::{Deref, Range};

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMaskPattern)
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(x: i32, y: i32) -> bool {
        (x + y) & 1 == 0
    }

    pub fn horizontal_lines(_: i32, y: i32) -> bool {
        y & 1 == 0
    }

    pub fn vertical_lines(x: i32, _: i32) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: i32, y: i32) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: i32, y: i32) -> bool {
        ((y >> 1) + (x / 3)) & 1 == 0
    }

    pub fn fields(x: i32, y: i32) -> bool {
        ((x * y) & 1) + ((x * y) % 3) == 0
    }

    pub fn diamonds(x: i32, y: i32) -> bool {
        (((x * y) & 1) + ((x * y) % 3)) & 1 == 0
    }

    pub fn meadow(x: i32, y: i32) -> bool {
        (((x + y) & 1) + ((x * y) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i32, i32) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern {}", self.0),
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Applies the pattern with the lowest penalty. Ties go to the lowest pattern index.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let best_mask = MaskPattern::all()
        .min_by_key(|&m| {
            let mut qr = qr.clone();
            qr.apply_mask(m);
            compute_total_penalty(&qr)
        })
        .unwrap_or(MaskPattern(0));
    qr.apply_mask(best_mask);
    best_mask
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// N1: runs of 5 or more same-colored modules in a row or column
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i32;
    let mut pen = 0;
    for i in 0..w {
        pen += run_penalty((0..w).map(|j| qr.color(j, i)));
        pen += run_penalty((0..w).map(|j| qr.color(i, j)));
    }
    pen
}

fn run_penalty(line: impl Iterator<Item = Color>) -> u32 {
    let mut pen = 0;
    let mut last = None;
    let mut run = 0;
    for clr in line {
        if last == Some(clr) {
            run += 1;
        } else {
            last = Some(clr);
            run = 1;
        }
        if run == 5 {
            pen += 3;
        } else if run > 5 {
            pen += 1;
        }
    }
    pen
}

// N2: 2x2 blocks of the same color
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i32;
    for y in 0..w - 1 {
        for x in 0..w - 1 {
            let clr = qr.color(x, y);
            if clr == qr.color(x + 1, y)
                && clr == qr.color(x, y + 1)
                && clr == qr.color(x + 1, y + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// N3: 1:1:3:1:1 finder-like runs with 4 light modules on either side
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];

    let mut pen = 0;
    let w = qr.width() as i32;
    for i in 0..w {
        // Modules beyond the symbol edge belong to the quiet zone
        let get = |j: i32| match (0..w).contains(&j) {
            true if is_hor => qr.color(j, i),
            true => qr.color(i, j),
            false => Color::Light,
        };
        let all_light = |r: Range<i32>| r.into_iter().all(|j| get(j) == Color::Light);
        for j in 0..w - 6 {
            if (0..7).all(|k| get(j + k) == PATTERN[k as usize])
                && (all_light(j - 4..j) || all_light(j + 7..j + 11))
            {
                pen += 40;
            }
        }
    }
    pen
}

// N4: 10 points per full 5% deviation of dark modules from half
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let percent = dark_cnt * 100 / (w * w);
    (percent.abs_diff(50) / 5 * 10) as u32
}
