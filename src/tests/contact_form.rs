use super::*;

fn fill_contact_form(page: &mut Page) -> Result<()> {
    page.type_text("#lastName", "Durand")?;
    page.type_text("#firstName", "Léa")?;
    page.type_text("#email", "lea@exemple.fr")?;
    page.type_text("#phone", "06 12 34 56 78")?;
    page.select_value("#service", "Jardinage")?;
    page.select_value("#frequency", "Hebdomadaire")?;
    page.click("#slotMatin")?;
    page.click("#slotSoir")?;
    page.type_text("#message", "Portail à tailler")?;
    Ok(())
}

const FILLED_SUMMARY: &str = "Nom : Durand\n\
Prénom : Léa\n\
Email : lea@exemple.fr\n\
Téléphone : 06 12 34 56 78\n\
Service souhaité : Jardinage\n\
Fréquence : Hebdomadaire\n\
Créneaux préférés : Matin, Soir\n\
Message : Portail à tailler";

#[test]
fn summary_follows_every_keystroke() -> Result<()> {
    let mut page = Page::from_html(SITE_HTML)?;
    page.type_text("#lastName", "Durand")?;
    page.assert_text(
        "#contactSummary",
        &EMPTY_SUMMARY.replacen("Nom : -", "Nom : Durand", 1),
    )?;

    fill_contact_form(&mut page)?;
    page.assert_text("#contactSummary", FILLED_SUMMARY)?;
    Ok(())
}

#[test]
fn filled_form_is_persisted_as_flat_json() -> Result<()> {
    let mut page = Page::from_html(SITE_HTML)?;
    fill_contact_form(&mut page)?;
    assert_eq!(
        page.stored_item(StorageKey::Contact),
        Some(
            r#"{"email":"lea@exemple.fr","firstName":"Léa","frequency":"Hebdomadaire","lastName":"Durand","message":"Portail à tailler","phone":"06 12 34 56 78","service":"Jardinage","slots":["Matin","Soir"]}"#
        )
    );

    let state = page.contact_state()?.expect("contact form present");
    assert_eq!(state.field(ContactField::FirstName), Some("Léa"));
    assert_eq!(state.slots(), ["Matin".to_string(), "Soir".to_string()]);
    Ok(())
}

#[test]
fn submitting_the_contact_form_refreshes_the_summary() -> Result<()> {
    let mut page = Page::from_html(SITE_HTML)?;
    fill_contact_form(&mut page)?;
    page.storage_mut().insert(SITE_ORIGIN, "presenceplus_contact", "");
    page.click("#contactSubmit")?;
    page.assert_text("#contactSummary", FILLED_SUMMARY)?;
    assert!(page.stored_item(StorageKey::Contact).is_some_and(|text| !text.is_empty()));
    Ok(())
}

#[test]
fn reload_restores_fields_and_checked_slots() -> Result<()> {
    let mut page = Page::from_html(SITE_HTML)?;
    fill_contact_form(&mut page)?;

    let page = page.reload()?;
    page.assert_value("#lastName", "Durand")?;
    page.assert_value("#service", "Jardinage")?;
    page.assert_value("#message", "Portail à tailler")?;
    page.assert_checked("#slotMatin", true)?;
    page.assert_checked("#slotMidi", false)?;
    page.assert_checked("#slotSoir", true)?;
    page.assert_text("#contactSummary", FILLED_SUMMARY)?;
    Ok(())
}

#[test]
fn unchecking_a_slot_drops_it_from_the_saved_list() -> Result<()> {
    let mut page = Page::from_html(SITE_HTML)?;
    fill_contact_form(&mut page)?;
    page.set_checked("#slotMatin", false)?;

    let page = page.reload()?;
    page.assert_checked("#slotMatin", false)?;
    page.assert_checked("#slotSoir", true)?;
    assert!(page.text("#contactSummary")?.contains("Créneaux préférés : Soir\n"));
    Ok(())
}

#[test]
fn single_string_slot_is_restored() -> Result<()> {
    let mut storage = LocalStorage::new();
    storage.insert(
        SITE_ORIGIN,
        "presenceplus_contact",
        r#"{"lastName":"Martin","slots":"Midi"}"#,
    );
    let page = Page::from_html_with_storage(SITE_HTML, storage)?;
    page.assert_value("#lastName", "Martin")?;
    page.assert_checked("#slotMidi", true)?;
    page.assert_checked("#slotMatin", false)?;
    assert!(page.text("#contactSummary")?.contains("Créneaux préférés : Midi"));
    Ok(())
}

#[test]
fn loosely_typed_members_are_written_as_text() -> Result<()> {
    let mut storage = LocalStorage::new();
    storage.insert(
        SITE_ORIGIN,
        "presenceplus_contact",
        r#"{"phone":612345678,"message":null,"firstName":true}"#,
    );
    let page = Page::from_html_with_storage(SITE_HTML, storage)?;
    page.assert_value("#phone", "612345678")?;
    page.assert_value("#message", "")?;
    page.assert_value("#firstName", "true")?;
    Ok(())
}

#[test]
fn persisted_contact_decodes_leniently() {
    let state: ContactState = serde_json::from_str(
        r#"{"slots":["Matin",3,"Soir"],"phone":6.5,"message":null,"extra":{"a":1},"tags":["a",null,"b"]}"#,
    )
    .expect("object decodes");
    assert_eq!(state.slots(), ["Matin".to_string(), "Soir".to_string()]);
    assert_eq!(state.get("phone"), Some("6.5"));
    assert_eq!(state.get("message"), Some(""));
    assert_eq!(state.get("extra"), Some("[object Object]"));
    assert_eq!(state.get("tags"), Some("a,,b"));
    assert_eq!(state.get("slots"), None);

    for text in ["[\"Durand\"]", "42", "\"Durand\"", "false"] {
        let state: ContactState = serde_json::from_str(text).expect("non-object decodes");
        assert_eq!(state, ContactState::new(), "{text}");
    }
    assert!(serde_json::from_str::<ContactState>("null").is_err());
}

#[test]
fn unknown_names_and_groups_are_not_restored() -> Result<()> {
    let html = r#"
        <form id="contactForm">
          <input id="lastName" name="lastName">
          <input type="radio" id="freqA" name="frequency" value="Ponctuel">
          <input type="radio" id="freqB" name="frequency" value="Hebdomadaire">
          <input id="nickname" name="nickname">
        </form>
        <pre id="contactSummary"></pre>
    "#;
    let mut storage = LocalStorage::new();
    storage.insert(
        SITE_ORIGIN,
        "presenceplus_contact",
        r#"{"lastName":"Leroy","frequency":"Hebdomadaire","nickname":"Lolo"}"#,
    );
    let page = Page::from_html_with_storage(html, storage)?;
    page.assert_value("#lastName", "Leroy")?;
    page.assert_checked("#freqA", false)?;
    page.assert_checked("#freqB", false)?;
    page.assert_value("#nickname", "")?;
    assert!(page.text("#contactSummary")?.contains("Fréquence : -"));
    Ok(())
}

#[test]
fn corrupt_contact_blob_is_cleared() -> Result<()> {
    let mut storage = LocalStorage::new();
    storage.insert(SITE_ORIGIN, "presenceplus_contact", r#"{"lastName":"#);
    let mut page = Page::from_html_with_storage(SITE_HTML, storage)?;
    page.assert_text("#contactSummary", EMPTY_SUMMARY)?;
    assert_eq!(
        page.stored_item(StorageKey::Contact),
        Some(
            r#"{"email":"","firstName":"","frequency":"","lastName":"","message":"","phone":"","service":"","slots":[]}"#
        )
    );

    quiet_trace(&mut page);
    page.storage_mut()
        .insert(SITE_ORIGIN, "presenceplus_contact", "null");
    let mut page = page.reload()?;
    let logs = page.take_trace_logs();
    assert!(logs.contains(&"[storage] clear key=presenceplus_contact".to_string()));
    Ok(())
}

#[test]
fn non_object_contact_json_only_unchecks_slots() -> Result<()> {
    let html = r#"
        <form id="contactForm">
          <input id="lastName" name="lastName" value="Martin">
          <input type="checkbox" id="slotMatin" name="slots" value="Matin" checked>
        </form>
        <pre id="contactSummary"></pre>
    "#;
    let mut storage = LocalStorage::new();
    storage.insert(SITE_ORIGIN, "presenceplus_contact", "42");
    let mut page = Page::with_config(html, SiteConfig::default(), storage)?;
    page.assert_value("#lastName", "Martin")?;
    page.assert_checked("#slotMatin", false)?;
    assert_eq!(
        page.stored_item(StorageKey::Contact),
        Some(r#"{"lastName":"Martin","slots":[]}"#)
    );

    quiet_trace(&mut page);
    page.storage_mut()
        .insert(SITE_ORIGIN, "presenceplus_contact", "[1,2]");
    let mut page = page.reload()?;
    let logs = page.take_trace_logs();
    assert!(logs.contains(&"[storage] load key=presenceplus_contact found".to_string()));
    assert!(!logs.iter().any(|line| line.contains("clear key=presenceplus_contact")));
    Ok(())
}

#[test]
fn duplicate_scalar_names_keep_the_first_value() -> Result<()> {
    let html = r#"
        <form id="contactForm">
          <input id="first" name="lastName" value="Bernard">
          <input id="second" name="lastName" value="Petit">
        </form>
        <pre id="contactSummary"></pre>
    "#;
    let mut storage = LocalStorage::new();
    storage.insert(SITE_ORIGIN, "presenceplus_contact", r#"{"lastName":"Roux"}"#);
    let page = Page::from_html_with_storage(html, storage)?;

    let state = page.contact_state()?.expect("contact form present");
    assert_eq!(state.field(ContactField::LastName), Some("Bernard"));
    page.assert_value("#first", "Bernard")?;
    page.assert_value("#second", "Petit")?;
    assert!(page.text("#contactSummary")?.starts_with("Nom : Bernard\n"));
    Ok(())
}

#[test]
fn disabled_and_unnamed_controls_are_not_collected() -> Result<()> {
    let html = r#"
        <form id="contactForm">
          <input name="email" value="x@y.fr" disabled>
          <input value="anonyme">
          <input name="phone" value="0102030405">
          <button name="lastName" value="bouton">Envoyer</button>
        </form>
        <pre id="contactSummary"></pre>
    "#;
    let page = Page::from_html(html)?;
    let state = page.contact_state()?.expect("contact form present");
    assert_eq!(state.field(ContactField::Email), None);
    assert_eq!(state.field(ContactField::LastName), None);
    assert_eq!(state.field(ContactField::Phone), Some("0102030405"));
    assert_eq!(state.fields().count(), 1);
    assert!(page.text("#contactSummary")?.contains("Email : -"));
    Ok(())
}

#[test]
fn summary_of_an_empty_state_uses_placeholders() {
    assert_eq!(build_summary(&ContactState::new()), EMPTY_SUMMARY);

    let mut state = ContactState::new();
    state.push_entry("slots", "Matin");
    state.push_entry("slots", "Midi");
    state.push_entry("message", "");
    let summary = build_summary(&state);
    assert!(summary.contains("Créneaux préférés : Matin, Midi"));
    assert!(summary.ends_with("Message : -"));
}

#[test]
fn field_names_map_to_kinds_and_labels() {
    assert_eq!(ContactField::from_name("slots"), Some(ContactField::Slots));
    assert_eq!(ContactField::Slots.kind(), FieldKind::MultiOption);
    assert_eq!(ContactField::from_name("phone"), Some(ContactField::Phone));
    assert_eq!(ContactField::Phone.kind(), FieldKind::Scalar);
    assert_eq!(ContactField::Phone.summary_label(), "Téléphone");
    assert_eq!(ContactField::from_name("nickname"), None);
    assert_eq!(ContactField::ALL[0], ContactField::LastName);
}

#[test]
fn copying_the_summary_flashes_the_button_label() -> Result<()> {
    let mut page = Page::from_html(SITE_HTML)?;
    fill_contact_form(&mut page)?;
    page.click("#copySummary")?;
    assert_eq!(page.clipboard_text(), FILLED_SUMMARY);
    page.assert_text("#copySummary", "Récapitulatif copié")?;

    page.advance_time(1999)?;
    page.assert_text("#copySummary", "Récapitulatif copié")?;
    page.advance_time(1)?;
    page.assert_text("#copySummary", "Copier le récapitulatif")?;
    Ok(())
}

#[test]
fn denied_clipboard_keeps_the_failure_label() -> Result<()> {
    let mut page = Page::from_html(SITE_HTML)?;
    quiet_trace(&mut page);
    page.set_clipboard_text("avant");
    page.set_clipboard_permission(ClipboardPermission::Denied);
    page.click("#copySummary")?;
    page.assert_text("#copySummary", "Copie impossible")?;
    assert_eq!(page.clipboard_text(), "avant");

    page.advance_time(5000)?;
    page.assert_text("#copySummary", "Copie impossible")?;
    let logs = page.take_trace_logs();
    assert!(logs.contains(&"[clipboard] write failed: clipboard write denied".to_string()));
    Ok(())
}

#[test]
fn missing_clipboard_api_fails_the_same_way() -> Result<()> {
    let mut page = Page::from_html(SITE_HTML)?;
    page.set_clipboard_permission(ClipboardPermission::Unsupported);
    page.click("#copySummary")?;
    page.assert_text("#copySummary", "Copie impossible")?;
    assert_eq!(page.clipboard_text(), "");
    assert_eq!(page.pending_timers().len(), 1);
    Ok(())
}
