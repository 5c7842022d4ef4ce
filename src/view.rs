use crate::builder::encode;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::ECLevel;
use crate::export::{NativeImage, PlatformImage};
use crate::render::{Bitmap, RenderOptions};

/// Shown in place of the code when encoding fails.
pub const FALLBACK_MESSAGE: &str = "Failed to make code";

pub const DEFAULT_TEXT: &str = "Here's to the crazy ones. The misfits. The rebels.";

// View state & events
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Empty,
    Rendering,
    Rendered(Bitmap),
    Failed(QRError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    TextChanged(String),
    ECLevelChanged(ECLevel),
}

/// What the host should draw for the current state.
#[derive(Debug, PartialEq, Eq)]
pub enum Surface<'a> {
    Blank,
    Image(&'a Bitmap),
    Fallback(&'static str),
}

type Observer = Box<dyn FnMut(&ViewState)>;

// QR view
//------------------------------------------------------------------------------

/// Binds a text and an error correction level to a rendered code. Every change of
/// either input starts a new generation; results from older generations are dropped.
pub struct QRView {
    text: String,
    ec_level: ECLevel,
    opts: RenderOptions,
    state: ViewState,
    current_generation_id: u64,
    observers: Vec<Observer>,
}

impl Default for QRView {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl QRView {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            text: String::new(),
            ec_level: ECLevel::default(),
            opts,
            state: ViewState::Empty,
            current_generation_id: 0,
            observers: Vec::new(),
        }
    }

    /// View preloaded with the stock text at the default level.
    pub fn with_defaults() -> Self {
        let mut view = Self::default();
        view.handle(ViewEvent::TextChanged(DEFAULT_TEXT.to_string()));
        view
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn options(&self) -> RenderOptions {
        self.opts
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.current_generation_id
    }

    pub fn subscribe<F: FnMut(&ViewState) + 'static>(&mut self, observer: F) {
        self.observers.push(Box::new(observer));
    }

    /// Applies an input change and recomputes the code. Repeating the current value
    /// is a no-op.
    pub fn handle(&mut self, event: ViewEvent) {
        let changed = match event {
            ViewEvent::TextChanged(text) if text != self.text => {
                self.text = text;
                true
            }
            ViewEvent::ECLevelChanged(ecl) if ecl != self.ec_level => {
                log::debug!("Error correction level changed from {} to {}", self.ec_level, ecl);
                self.ec_level = ecl;
                true
            }
            _ => false,
        };
        if changed {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.current_generation_id += 1;
        let generation_id = self.current_generation_id;
        self.set_state(ViewState::Rendering);

        let result = encode(&self.text, self.ec_level).map(|qr| qr.render_with(&self.opts));
        self.publish(generation_id, result);
    }

    /// Stores the outcome of a recomputation. Returns false and leaves the state
    /// untouched when a newer generation has started since.
    pub fn publish(&mut self, generation_id: u64, result: QRResult<Bitmap>) -> bool {
        if generation_id != self.current_generation_id {
            log::debug!(
                "Ignoring outdated result from generation {} (current: {})",
                generation_id,
                self.current_generation_id
            );
            return false;
        }

        let state = match result {
            Ok(bitmap) => {
                log::debug!("Accepting result from generation {}", generation_id);
                ViewState::Rendered(bitmap)
            }
            Err(e) => {
                log::warn!("Failed to make code from generation {}: {e}", generation_id);
                ViewState::Failed(e)
            }
        };
        self.set_state(state);
        true
    }

    fn set_state(&mut self, state: ViewState) {
        self.state = state;
        for observer in self.observers.iter_mut() {
            observer(&self.state);
        }
    }

    pub fn surface(&self) -> Surface<'_> {
        match &self.state {
            ViewState::Empty | ViewState::Rendering => Surface::Blank,
            ViewState::Rendered(bitmap) => Surface::Image(bitmap),
            ViewState::Failed(_) => Surface::Fallback(FALLBACK_MESSAGE),
        }
    }

    /// Bitmap offered for drag and save, only while the current code is rendered.
    pub fn bitmap(&self) -> Option<&Bitmap> {
        match &self.state {
            ViewState::Rendered(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn export<P: PlatformImage>(&self) -> Option<QRResult<P>> {
        self.bitmap().map(P::from_bitmap)
    }

    pub fn export_native(&self) -> Option<QRResult<NativeImage>> {
        self.export::<NativeImage>()
    }
}
