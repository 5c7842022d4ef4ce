use std::ops::Deref;

use crate::common::{
    bitstream::BitStream,
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{format_info, Color, ECLevel, Version, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Square symbol matrix. Modules are addressed by (x, y) with x the column and y the
/// row; negative coordinates count back from the far edge.
///
/// Only the builder draws into it. A finished symbol can't be masked again:
///
/// ```compile_fail
/// use qrview::{encode, ECLevel, MaskPattern};
///
/// let mut qr = encode("HELLO", ECLevel::H).unwrap();
/// qr.apply_mask(MaskPattern::new(0).unwrap());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn metadata(&self) -> String {
        match self.mask {
            Some(m) => {
                format!("{{ Version: {}, Ec level: {}, Mask: {} }}", self.ver, self.ecl, *m)
            }
            None => format!("{{ Version: {}, Ec level: {}, Mask: None }}", self.ver, self.ecl),
        }
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i32;
        let mut res = String::with_capacity((w * (w + 1) + 1) as usize);
        res.push('\n');
        for y in 0..w {
            for x in 0..w {
                let c = match self.get(x, y) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, x: i32, y: i32) -> usize {
        let w = self.w as i32;
        debug_assert!(-w <= x && x < w, "x out of bounds: {x}");
        debug_assert!(-w <= y && y < w, "y out of bounds: {y}");

        let x = if x < 0 { x + w } else { x };
        let y = if y < 0 { y + w } else { y };
        (y * w + x) as _
    }

    pub fn get(&self, x: i32, y: i32) -> Module {
        self.grid[self.coord_to_index(x, y)]
    }

    pub fn color(&self, x: i32, y: i32) -> Color {
        *self.get(x, y)
    }

    pub fn is_dark(&self, x: i32, y: i32) -> bool {
        self.color(x, y) == Color::Dark
    }

    fn set(&mut self, x: i32, y: i32, module: Module) {
        let index = self.coord_to_index(x, y);
        self.grid[index] = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(-4, 3);
        self.draw_finder_pattern_at(3, -4);
    }

    // Includes the light separator on the sides facing the symbol
    fn draw_finder_pattern_at(&mut self, x: i32, y: i32) {
        let (dx_left, dx_right) = if x > 0 { (-3, 4) } else { (-4, 3) };
        let (dy_top, dy_bottom) = if y > 0 { (-3, 4) } else { (-4, 3) };
        for j in dy_top..=dy_bottom {
            for i in dx_left..=dx_right {
                let clr = match i32::max(i32::abs(i), i32::abs(j)) {
                    4 | 2 => Color::Light,
                    _ => Color::Dark,
                };
                self.set(x + i, y + j, Module::Func(clr));
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let last = self.w as i32 - 9;
        for i in 8..=last {
            let clr = if i & 1 == 0 { Color::Dark } else { Color::Light };
            self.set(i, 6, Module::Func(clr));
            self.set(6, i, Module::Func(clr));
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &y in &poses {
            for &x in &poses {
                self.draw_alignment_pattern_at(x, y)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, x: i32, y: i32) {
        let last = self.w as i32 - 7;
        // Overlaps a finder pattern
        if (x == 6 && (y == 6 || y == last)) || (x == last && y == 6) {
            return;
        }
        for j in -2..=2 {
            for i in -2..=2 {
                let clr = match i32::max(i32::abs(i), i32::abs(j)) {
                    1 => Color::Light,
                    _ => Color::Dark,
                };
                self.set(x + i, y + j, Module::Func(clr));
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
    }

    fn draw_format_info(&mut self, format_info: u32) {
        let (off, on) = (Module::Format(Color::Light), Module::Format(Color::Dark));
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_SIDE);
        self.set(8, -8, Module::Format(Color::Dark));
    }

    fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let ver_info = self.ver.info();
        let last = self.w as i32 - 11;
        for i in 0..VERSION_INFO_BIT_LEN as i32 {
            let clr = if (ver_info >> i) & 1 == 1 { Color::Dark } else { Color::Light };
            let (a, b) = (last + i % 3, i / 3);
            self.set(a, b, Module::Version(clr));
            self.set(b, a, Module::Version(clr));
        }
    }

    // Most significant bit goes to the first coordinate
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i32, i32)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for &(x, y) in coords {
            self.set(x, y, if number & mask == 0 { off_clr } else { on_clr });
            mask >>= 1;
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn draw_encoding_region(&mut self, payload: BitStream) {
        self.reserve_format_area();
        self.draw_version_info();
        self.draw_payload(payload);

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after placement");
    }

    // Modules left once the payload runs out are remainder bits and stay light
    fn draw_payload(&mut self, payload: BitStream) {
        debug_assert!(
            payload.len() == self.ver.total_codewords() << 3,
            "Payload length {} doesn't match total codewords {}",
            payload.len() >> 3,
            self.ver.total_codewords()
        );

        let mut bits = payload.bits();
        for (x, y) in EncRegionIter::new(self.ver) {
            if matches!(self.get(x, y), Module::Empty) {
                let clr = if bits.next() == Some(true) { Color::Dark } else { Color::Light };
                self.set(x, y, Module::Data(clr));
            }
        }
    }

    /// Flips data modules where the pattern is set and writes matching format info.
    pub(crate) fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_function();
        let w = self.w as i32;
        for y in 0..w {
            for x in 0..w {
                if mask_fn(x, y) {
                    if let Module::Data(clr) = self.get(x, y) {
                        self.set(x, y, Module::Data(!clr))
                    }
                }
            }
        }
        self.draw_format_info(format_info(self.ecl, pattern));
    }
}


// Global constants
//------------------------------------------------------------------------------

static FORMAT_INFO_COORDS_MAIN: [(i32, i32); 15] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

static FORMAT_INFO_COORDS_SIDE: [(i32, i32); 15] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (-8, 8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];
