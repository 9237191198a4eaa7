//! Display shaping for option labels.

/// Turns stored text into what the front-end should draw.
///
/// Meanings may be in a right-to-left script; a platform front-end can plug
/// in a shaping/bidi implementation here. Grading always uses the raw text.
pub trait TextRenderer: Send + Sync {
    fn render(&self, text: &str) -> String;
}

/// Identity renderer for terminals and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl TextRenderer for PlainTextRenderer {
    fn render(&self, text: &str) -> String {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_renderer_is_identity() {
        assert_eq!(PlainTextRenderer.render("كتاب"), "كتاب");
    }
}
