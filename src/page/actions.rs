use super::*;

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

impl Page {
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) || self.dom.readonly(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !is_text_entry(&self.dom, target) {
            let actual = if tag == "input" {
                format!(
                    "input[type={}]",
                    self.dom.attr(target, "type").unwrap_or_default()
                )
            } else {
                tag
            };
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual,
            });
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input")
    }

    /// Picks the `<option>` whose value is `value`, like a user choosing it.
    pub fn select_value(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "select" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "select".into(),
                actual: tag,
            });
        }
        if self.dom.disabled(target) {
            return Ok(());
        }
        if !self.dom.select_has_option(target, value)? {
            return Err(Error::Runtime(format!(
                "select {selector} has no option with value {value:?}"
            )));
        }

        self.dom.set_value(target, value)?;
        self.dispatch_event(target, "input")?;
        self.dispatch_event(target, "change")
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        if !is_checkbox_input(&self.dom, target) && !is_radio_input(&self.dom, target) {
            let tag = self
                .dom
                .tag_name(target)
                .unwrap_or_default()
                .to_ascii_lowercase();
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox|radio]".into(),
                actual: tag,
            });
        }

        if self.dom.checked(target)? != checked {
            self.dom.set_checked(target, checked)?;
            if checked && is_radio_input(&self.dom, target) {
                self.uncheck_radio_group(target)?;
            }
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
        }
        Ok(())
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.click_node(target)
    }

    fn click_node(&mut self, target: NodeId) -> Result<()> {
        if is_form_control(&self.dom, target) && self.dom.disabled(target) {
            return Ok(());
        }

        self.dispatch_event(target, "click")?;

        if is_checkbox_input(&self.dom, target) {
            let current = self.dom.checked(target)?;
            self.dom.set_checked(target, !current)?;
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
        } else if is_radio_input(&self.dom, target) && !self.dom.checked(target)? {
            self.dom.set_checked(target, true)?;
            self.uncheck_radio_group(target)?;
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = owner_form(&self.dom, target) {
                self.dispatch_event(form, "submit")?;
            }
        }
        Ok(())
    }

    fn uncheck_radio_group(&mut self, target: NodeId) -> Result<()> {
        let (Some(form), Some(name)) = (owner_form(&self.dom, target), self.dom.attr(target, "name"))
        else {
            return Ok(());
        };
        for other in named_controls(&self.dom, form, &name) {
            if other != target && is_radio_input(&self.dom, other) {
                self.dom.set_checked(other, false)?;
            }
        }
        Ok(())
    }

    /// Submits the form matched by `selector`, or the form owning the matched
    /// control. Submission never navigates.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let form = if self
            .dom
            .tag_name(target)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
        {
            Some(target)
        } else {
            owner_form(&self.dom, target)
        };
        match form {
            Some(form) => self.dispatch_event(form, "submit"),
            None => Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form or form control".into(),
                actual: self.dom.tag_name(target).unwrap_or_default().to_string(),
            }),
        }
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, event)
    }

    /// Sets the window's vertical scroll offset (clamped at 0) and fires the
    /// scroll handlers.
    pub fn scroll_to(&mut self, y: f64) -> Result<()> {
        let y = if y.is_finite() { y.max(0.0) } else { 0.0 };
        self.scroll_y = y;
        self.trace_state.event_line(format!("[event] scroll y={y}"));
        if let Some(back_to_top) = &self.back_to_top {
            back_to_top.on_scroll(&mut self.dom, y)?;
        }
        Ok(())
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Id of the last element scrolled into view by the page.
    pub fn last_scroll_into_view(&self) -> Option<&str> {
        self.last_scroll_into_view.as_deref()
    }

    /// Reports how much of the matched element is visible. Returns whether
    /// this report revealed it.
    pub fn set_intersection_ratio(&mut self, selector: &str, ratio: f64) -> Result<bool> {
        let target = self.select_one(selector)?;
        let revealed = self.reveal.report(&mut self.dom, target, ratio)?;
        self.trace_state.event_line(format!(
            "[event] intersect target={} ratio={ratio} revealed={revealed}",
            self.trace_node_label(target)
        ));
        Ok(revealed)
    }

    /// Number of `.reveal` elements still waiting to be revealed.
    pub fn pending_reveals(&self) -> usize {
        self.reveal.observed_count()
    }

    // Runs listeners on the target, then on each ancestor.
    pub(crate) fn dispatch_event(&mut self, target: NodeId, event: &str) -> Result<()> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            let mut path = vec![target];
            let mut cursor = self.dom.parent(target);
            while let Some(node) = cursor {
                path.push(node);
                cursor = self.dom.parent(node);
            }

            for current in path {
                let actions = self.listeners.actions(current, event);
                if actions.is_empty() {
                    continue;
                }
                if self.trace_state.enabled {
                    let target_label = self.trace_node_label(target);
                    let current_label = self.trace_node_label(current);
                    self.trace_state.event_line(format!(
                        "[event] {event} target={target_label} current={current_label}"
                    ));
                }
                for action in actions {
                    self.run_action(action, current)?;
                }
            }
            Ok(())
        })
    }
}
