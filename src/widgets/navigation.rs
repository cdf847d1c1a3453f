use crate::*;

const OPEN_CLASS: &str = "open";

/// Mobile menu: `.nav-toggle` opens and closes `.nav-links`, and following
/// any link inside it closes the menu.
#[derive(Debug, Clone)]
pub(crate) struct NavMenu {
    pub(crate) toggle: Option<NodeId>,
    pub(crate) links: NodeId,
    pub(crate) anchors: Vec<NodeId>,
}

impl NavMenu {
    pub(crate) fn bind(dom: &Dom) -> Result<Option<Self>> {
        let Some(links) = dom.query_selector(".nav-links")? else {
            return Ok(None);
        };
        Ok(Some(Self {
            toggle: dom.query_selector(".nav-toggle")?,
            links,
            anchors: dom.query_selector_all_from(&links, "a")?,
        }))
    }

    /// Returns whether the menu is open afterwards.
    pub(crate) fn toggle(&self, dom: &mut Dom) -> Result<bool> {
        dom.class_toggle(self.links, OPEN_CLASS)
    }

    pub(crate) fn close(&self, dom: &mut Dom) -> Result<()> {
        dom.class_remove(self.links, OPEN_CLASS)
    }
}
