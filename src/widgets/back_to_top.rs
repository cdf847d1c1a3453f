use crate::*;

#[derive(Debug, Clone)]
pub(crate) struct BackToTop {
    pub(crate) button: NodeId,
    threshold: f64,
}

impl BackToTop {
    pub(crate) fn bind(dom: &Dom, threshold: f64) -> Option<Self> {
        Some(Self {
            button: dom.by_id("backToTop")?,
            threshold,
        })
    }

    /// Shows the button strictly past the threshold. Returns the visibility.
    pub(crate) fn on_scroll(&self, dom: &mut Dom, scroll_y: f64) -> Result<bool> {
        let visible = scroll_y > self.threshold;
        dom.style_set(self.button, "display", if visible { "block" } else { "none" })?;
        Ok(visible)
    }
}
