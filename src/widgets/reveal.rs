use crate::*;

const VISIBLE_CLASS: &str = "visible";

/// One-shot reveal of `.reveal` elements once enough of them is on screen.
#[derive(Debug, Clone)]
pub(crate) struct RevealObserver {
    threshold: f64,
    observed: Vec<NodeId>,
}

impl RevealObserver {
    pub(crate) fn bind(dom: &Dom, threshold: f64) -> Result<Self> {
        Ok(Self {
            threshold,
            observed: dom.query_selector_all(".reveal")?,
        })
    }

    pub(crate) fn is_observed(&self, node: NodeId) -> bool {
        self.observed.contains(&node)
    }

    pub(crate) fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Feeds an intersection ratio for `node`. Returns whether it was revealed
    /// by this report; revealed elements stop being observed.
    pub(crate) fn report(&mut self, dom: &mut Dom, node: NodeId, ratio: f64) -> Result<bool> {
        if !self.is_observed(node) || ratio <= 0.0 || ratio < self.threshold {
            return Ok(false);
        }
        dom.class_add(node, VISIBLE_CLASS)?;
        self.observed.retain(|observed| *observed != node);
        Ok(true)
    }
}
