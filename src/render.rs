use std::path::Path;

use image::{GrayImage, Luma};

use crate::builder::QR;
use crate::common::error::{QRError, QRResult};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

// Render options
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct RenderOptions {
    /// Pixels per module side
    pub module_sz: u32,
    /// Light modules around the symbol
    pub quiet_zone: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { module_sz: 8, quiet_zone: 4 }
    }
}

// Bitmap
//------------------------------------------------------------------------------

/// Greyscale raster of a symbol, dark modules at 0 and light ones at 255.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Bitmap {
    img: GrayImage,
    module_sz: u32,
    quiet_zone: u32,
}

impl Bitmap {
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn module_size(&self) -> u32 {
        self.module_sz
    }

    pub fn quiet_zone(&self) -> u32 {
        self.quiet_zone
    }

    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        self.img.get_pixel(x, y) == &DARK
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.img
    }

    pub fn into_image(self) -> GrayImage {
        self.img
    }

    /// One character per module, quiet zone included. Light modules are filled so
    /// the code reads correctly on a dark terminal.
    pub fn to_str(&self) -> String {
        let modules = self.width() / self.module_sz;
        let mut canvas = String::with_capacity((modules * (modules + 1)) as usize);
        for r in 0..modules {
            for c in 0..modules {
                let dark = self.is_dark(c * self.module_sz, r * self.module_sz);
                canvas.push(if dark { ' ' } else { '█' });
            }
            canvas.push('\n');
        }
        canvas
    }

    /// Writes the bitmap in the format implied by the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> QRResult<()> {
        self.img.save(path.as_ref()).map_err(|e| {
            log::error!("Failed to save {}: {e}", path.as_ref().display());
            QRError::ExportFailed
        })
    }
}

// Render
//------------------------------------------------------------------------------

impl QR {
    /// Nearest-neighbour expansion: each module becomes a uniform block of
    /// `module_sz` pixels square. A zero scale renders one pixel per module.
    pub fn render(&self, module_sz: u32, quiet_zone: u32) -> Bitmap {
        let module_sz = module_sz.max(1);
        let qz_sz = quiet_zone * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let img = GrayImage::from_fn(total_sz, total_sz, |j, i| {
            if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                return LIGHT;
            }
            let x = ((j - qz_sz) / module_sz) as i32;
            let y = ((i - qz_sz) / module_sz) as i32;
            self.color(x, y).select(DARK, LIGHT)
        });

        Bitmap { img, module_sz, quiet_zone }
    }

    pub fn render_with(&self, opts: &RenderOptions) -> Bitmap {
        self.render(opts.module_sz, opts.quiet_zone)
    }
}
