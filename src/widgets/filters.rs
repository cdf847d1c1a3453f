use crate::*;

const ACTIVE_CLASS: &str = "active";

/// `.filter-btn` buttons narrowing the `.service-card` grid by `data-category`.
#[derive(Debug, Clone)]
pub(crate) struct FilterBar {
    pub(crate) buttons: Vec<NodeId>,
    cards: Vec<NodeId>,
}

impl FilterBar {
    pub(crate) fn bind(dom: &Dom) -> Result<Option<Self>> {
        let buttons = dom.query_selector_all(".filter-btn")?;
        if buttons.is_empty() {
            return Ok(None);
        }
        let cards = dom.query_selector_all(".service-card")?;
        Ok(Some(Self { buttons, cards }))
    }

    /// Activates `button` alone and shows the cards its filter matches.
    /// Returns the number of visible cards.
    pub(crate) fn apply(&self, dom: &mut Dom, button: NodeId) -> Result<usize> {
        for other in &self.buttons {
            dom.class_remove(*other, ACTIVE_CLASS)?;
        }
        dom.class_add(button, ACTIVE_CLASS)?;

        let filter = dom.dataset_get(button, "filter")?;
        let mut shown = 0;
        for card in &self.cards {
            let matched = filter == "all" || dom.dataset_get(*card, "category")? == filter;
            dom.style_set(*card, "display", if matched { "block" } else { "none" })?;
            shown += usize::from(matched);
        }
        Ok(shown)
    }
}
