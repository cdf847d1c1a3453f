use super::*;

/// How the mocked browser answers `navigator.clipboard.writeText`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardPermission {
    #[default]
    Granted,
    Denied,
    /// No clipboard API at all.
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardError {
    Denied,
    Unsupported,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied => write!(f, "clipboard write denied"),
            Self::Unsupported => write!(f, "clipboard api unavailable"),
        }
    }
}

impl StdError for ClipboardError {}

#[derive(Debug, Clone, Default)]
pub(crate) struct ClipboardMock {
    pub(crate) text: String,
    pub(crate) permission: ClipboardPermission,
}

impl ClipboardMock {
    pub(crate) fn write_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
        match self.permission {
            ClipboardPermission::Granted => {
                self.text = text.to_string();
                Ok(())
            }
            ClipboardPermission::Denied => Err(ClipboardError::Denied),
            ClipboardPermission::Unsupported => Err(ClipboardError::Unsupported),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CopyOutcome {
    Copied { chars: usize },
    Failed(ClipboardError),
}

/// The "copy summary" button and the summary it copies.
#[derive(Debug, Clone)]
pub(crate) struct CopySummaryButton {
    pub(crate) button: NodeId,
    pub(crate) summary: NodeId,
}

impl CopySummaryButton {
    pub(crate) fn bind(dom: &Dom) -> Option<Self> {
        Some(Self {
            button: dom.by_id("copySummary")?,
            summary: dom.by_id("contactSummary")?,
        })
    }

    /// Copies the summary text and relabels the button with the outcome.
    pub(crate) fn copy(
        &self,
        dom: &mut Dom,
        clipboard: &mut ClipboardMock,
        config: &SiteConfig,
    ) -> Result<CopyOutcome> {
        let text = dom.text_content(self.summary);
        match clipboard.write_text(&text) {
            Ok(()) => {
                dom.set_text_content(self.button, &config.copy_success_label)?;
                Ok(CopyOutcome::Copied {
                    chars: text.chars().count(),
                })
            }
            Err(err) => {
                dom.set_text_content(self.button, &config.copy_failure_label)?;
                Ok(CopyOutcome::Failed(err))
            }
        }
    }

    pub(crate) fn restore_label(&self, dom: &mut Dom, config: &SiteConfig) -> Result<()> {
        dom.set_text_content(self.button, &config.copy_idle_label)
    }
}
