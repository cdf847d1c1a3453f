use super::*;

fn input_type(dom: &Dom, node_id: NodeId) -> Option<String> {
    let element = dom.element(node_id)?;
    if !element.tag_name.eq_ignore_ascii_case("input") {
        return None;
    }
    Some(
        element
            .attrs
            .get("type")
            .map(|kind| kind.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string()),
    )
}

pub(crate) fn is_form_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };

    element.tag_name.eq_ignore_ascii_case("input")
        || element.tag_name.eq_ignore_ascii_case("select")
        || element.tag_name.eq_ignore_ascii_case("textarea")
        || element.tag_name.eq_ignore_ascii_case("button")
}

pub(crate) fn is_checkbox_input(dom: &Dom, node_id: NodeId) -> bool {
    input_type(dom, node_id).is_some_and(|kind| kind == "checkbox")
}

pub(crate) fn is_radio_input(dom: &Dom, node_id: NodeId) -> bool {
    input_type(dom, node_id).is_some_and(|kind| kind == "radio")
}

/// Controls whose value can be typed: text-like inputs and textareas.
pub(crate) fn is_text_entry(dom: &Dom, node_id: NodeId) -> bool {
    if dom
        .tag_name(node_id)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("textarea"))
    {
        return true;
    }
    input_type(dom, node_id).is_some_and(|kind| {
        !matches!(
            kind.as_str(),
            "checkbox"
                | "radio"
                | "submit"
                | "reset"
                | "button"
                | "image"
                | "file"
                | "hidden"
        )
    })
}

pub(crate) fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };

    if element.tag_name.eq_ignore_ascii_case("button") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true);
    }

    input_type(dom, node_id).is_some_and(|kind| kind == "submit" || kind == "image")
}

// Buttons never contribute to form data, whatever their type.
fn is_button_control(dom: &Dom, node_id: NodeId) -> bool {
    if dom
        .tag_name(node_id)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("button"))
    {
        return true;
    }
    input_type(dom, node_id).is_some_and(|kind| {
        matches!(kind.as_str(), "submit" | "reset" | "button" | "image")
    })
}

pub(crate) fn owner_form(dom: &Dom, node_id: NodeId) -> Option<NodeId> {
    if let Some(form_id) = dom.attr(node_id, "form") {
        return dom.by_id(&form_id).filter(|candidate| {
            dom.tag_name(*candidate)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
        });
    }
    dom.find_ancestor_by_tag(node_id, "form")
}

pub(crate) fn form_elements(dom: &Dom, form: NodeId) -> Vec<NodeId> {
    dom.all_element_nodes()
        .into_iter()
        .filter(|node| is_form_control(dom, *node) && owner_form(dom, *node) == Some(form))
        .collect()
}

/// Controls of `form` whose `name` attribute equals `name`.
pub(crate) fn named_controls(dom: &Dom, form: NodeId, name: &str) -> Vec<NodeId> {
    form_elements(dom, form)
        .into_iter()
        .filter(|node| dom.attr(*node, "name").as_deref() == Some(name))
        .collect()
}

/// Name/value pairs a browser would submit for `form`, in document order.
pub(crate) fn form_data_entries(dom: &Dom, form: NodeId) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for control in form_elements(dom, form) {
        if dom.disabled(control) || is_button_control(dom, control) {
            continue;
        }
        let Some(name) = dom.attr(control, "name") else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if (is_checkbox_input(dom, control) || is_radio_input(dom, control))
            && !dom.checked(control)?
        {
            continue;
        }
        out.push((name, dom.value(control)?));
    }
    Ok(out)
}
