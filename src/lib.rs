//! # qrview
//!
//! Live QR code generation for host views. A text and an error correction level go in,
//! a greyscale bitmap comes out, ready to be displayed, dragged or saved.
//!
//! ## Features
//!
//! - **QR Code Generation**: Versions 1-40 with numeric, alphanumeric and byte segments,
//!   picked per character run to keep the symbol as small as possible
//! - **Reed-Solomon Error Correction**: Levels L, M, Q and H, with H as the default
//! - **Rendering**: Nearest-neighbour scaling with a configurable quiet zone
//! - **View Binding**: Reactive state for text fields and level pickers, with a fixed
//!   fallback message when a code can't be made
//! - **Export**: PNG or TIFF bytes for the host pasteboard, picked per target platform
//!
//! ## Quick Start
//!
//! ```rust
//! use qrview::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = encode("Hello, World!", ECLevel::H)?;
//! let bitmap = qr.render(4, 4); // 4 px per module, 4 module quiet zone
//! assert_eq!(bitmap.width(), (qr.width() as u32 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrview::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"Hello, World!")
//!     .version(Version::new(2)?)       // if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::M)            // if not provided, defaults to ECLevel::H
//!     .mask(MaskPattern::new(3)?)      // if not provided, finds best mask by penalty score
//!     .build()?;
//! println!("{}", qr.render(1, 2).to_str());
//! # Ok(())
//! # }
//! ```
//!
//! ### Binding to a View
//!
//! ```rust
//! use qrview::{ECLevel, QRView, Surface, ViewEvent, FALLBACK_MESSAGE};
//!
//! let mut view = QRView::default();
//! view.subscribe(|state| println!("{state:?}"));
//! view.handle(ViewEvent::TextChanged("Hello, World!".to_string()));
//! view.handle(ViewEvent::ECLevelChanged(ECLevel::L));
//! assert!(matches!(view.surface(), Surface::Image(_)));
//!
//! view.handle(ViewEvent::TextChanged("Hello, 🌎".to_string()));
//! assert_eq!(view.surface(), Surface::Fallback(FALLBACK_MESSAGE));
//! assert!(view.export_native().is_none());
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod export;
pub mod render;
pub mod view;

pub use builder::{encode, Module, QRBuilder, QR};
pub use common::codec::to_latin1;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use export::{NativeImage, PlatformImage, PngImage, TiffImage};
pub use render::{Bitmap, RenderOptions};
pub use view::{QRView, Surface, ViewEvent, ViewState, DEFAULT_TEXT, FALLBACK_MESSAGE};
