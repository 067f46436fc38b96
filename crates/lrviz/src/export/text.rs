//! Text measurement for item-set labels.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use lrviz_core::geometry::Size;

/// Measures text with real font metrics.
///
/// Holds one [`FontSystem`], which is expensive to create.
struct TextMeasurer {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextMeasurer {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    fn measure(&self, text: &str, font_family: &str, font_size: u16) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Points to pixels at standard DPI
        let font_size_px = f32::from(font_size) * 1.33;
        let metrics = Metrics::new(font_size_px, line_height(font_size));

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(font_family));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        let runs: Vec<_> = buffer.layout_runs().collect();
        if runs.is_empty() {
            max_width = longest_line(text) as f32 * font_size_px * 0.6;
            total_height = text.lines().count().max(1) as f32 * metrics.line_height;
        } else {
            for last in runs.iter().map(|run| run.glyphs.last()) {
                if let Some(last) = last {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        }

        // Without usable fonts shaping yields no glyphs.
        if max_width == 0.0 {
            max_width = longest_line(text) as f32 * font_size_px * 0.6;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MEASURER: OnceLock<TextMeasurer> = OnceLock::new();

/// Height of one text line in pixels.
pub(super) fn line_height(font_size: u16) -> f32 {
    f32::from(font_size) * 1.33 * 1.15
}

/// Size of `text` rendered in the given font, one line per `\n`.
pub(super) fn measure(text: &str, font_family: &str, font_size: u16) -> Size {
    TEXT_MEASURER
        .get_or_init(TextMeasurer::new)
        .measure(text, font_family, font_size)
}

fn longest_line(text: &str) -> usize {
    text.lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}
