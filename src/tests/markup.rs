use super::*;

#[test]
fn character_references_are_decoded_in_text() -> Result<()> {
    let page = Page::from_html(
        "<p id='quote'>&laquo;Top&raquo; &amp; &#233;t&#xE9;&nbsp;!</p><p id='raw'>5 &unknown; 6</p>",
    )?;
    page.assert_text("#quote", "«Top» & été\u{00A0}!")?;
    page.assert_text("#raw", "5 &unknown; 6")?;
    Ok(())
}

#[test]
fn form_controls_take_their_initial_values_from_markup() -> Result<()> {
    let html = r#"
        <textarea id="note">Bonjour &amp; merci</textarea>
        <select id="plain"><option>A</option><option>B</option></select>
        <select id="chosen"><option value="a">A</option><option value="b" selected>B</option></select>
        <input type="checkbox" id="box">
        <input type="checkbox" id="ticked" value="oui" checked>
    "#;
    let page = Page::from_html(html)?;
    page.assert_value("#note", "Bonjour & merci")?;
    page.assert_value("#plain", "A")?;
    page.assert_value("#chosen", "b")?;
    page.assert_value("#box", "on")?;
    page.assert_checked("#box", false)?;
    page.assert_checked("#ticked", true)?;
    Ok(())
}

#[test]
fn stray_end_tags_are_ignored() -> Result<()> {
    let page = Page::from_html("<div id='x'>a</span>b</div><p id='after'>c</p>")?;
    page.assert_text("#x", "ab")?;
    page.assert_text("#after", "c")?;
    Ok(())
}

#[test]
fn broken_markup_is_reported() {
    assert!(matches!(
        Page::from_html("<p>texte <!-- jamais fermé"),
        Err(Error::HtmlParse(_))
    ));
    assert!(matches!(
        Page::from_html("<textarea id='t'>sans fin"),
        Err(Error::HtmlParse(_))
    ));
    assert!(matches!(
        Page::from_html("<div id='x'"),
        Err(Error::HtmlParse(_))
    ));
}

#[test]
fn selectors_cover_what_the_page_queries() -> Result<()> {
    let page = Page::from_html(SITE_HTML)?;
    assert_eq!(page.count(r#"input[name="slots"]"#)?, 3);
    assert_eq!(page.count(".nav-links a")?, 3);
    assert_eq!(page.count("#contactForm > input")?, 4);
    assert_eq!(page.count("select, textarea")?, 5);
    assert_eq!(page.count("[data-filter]")?, 3);
    assert_eq!(page.count(".service-card[data-category=famille]")?, 2);
    assert_eq!(page.count("section.reveal")?, 3);
    assert_eq!(page.count("*")?, page.count("*, *")?);
    Ok(())
}

#[test]
fn unsupported_selectors_are_rejected() {
    let page = Page::from_html(SITE_HTML).expect("fixture parses");
    for selector in [
        "a + b",
        "li ~ li",
        "a:hover",
        "",
        "div >",
        "[name",
        "a,",
        "[data-filter^=f]",
        "[data-category~=maison]",
    ] {
        assert!(
            matches!(page.count(selector), Err(Error::UnsupportedSelector(_))),
            "{selector:?}"
        );
    }
}

#[test]
fn missing_targets_and_wrong_controls_are_errors() -> Result<()> {
    let mut page = Page::from_html(SITE_HTML)?;
    assert_eq!(
        page.text("#missing"),
        Err(Error::SelectorNotFound("#missing".into()))
    );

    let err = page.type_text("#slotMatin", "x").expect_err("checkbox");
    assert_eq!(
        err,
        Error::TypeMismatch {
            selector: "#slotMatin".into(),
            expected: "input or textarea".into(),
            actual: "input[type=checkbox]".into(),
        }
    );

    assert!(matches!(
        page.set_checked("#lastName", true),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        page.submit("#backToTop"),
        Err(Error::TypeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn disabled_and_readonly_fields_ignore_typing() -> Result<()> {
    let html = r#"
        <form id="contactForm">
          <input id="locked" name="lastName" value="Fixe" readonly>
          <input id="off" name="email" value="" disabled>
        </form>
    "#;
    let mut page = Page::from_html(html)?;
    page.type_text("#locked", "Autre")?;
    page.type_text("#off", "a@b.fr")?;
    page.assert_value("#locked", "Fixe")?;
    page.assert_value("#off", "")?;
    Ok(())
}

#[test]
fn failed_assertions_carry_a_dom_snippet() -> Result<()> {
    let page = Page::from_html(SITE_HTML)?;
    let err = page.assert_text("#simNet", "1,00 €").expect_err("amount differs");
    match err {
        Error::AssertionFailed {
            selector,
            expected,
            actual,
            dom_snippet,
        } => {
            assert_eq!(selector, "#simNet");
            assert_eq!(expected, "1,00 €");
            assert_eq!(actual, "0,00 €");
            assert_eq!(dom_snippet, r#"<dd id="simNet">0,00 €</dd>"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = page
        .assert_class("#filterAll", "active", false)
        .expect_err("filterAll starts active");
    assert!(err.to_string().contains("expected no class active, actual class active"));

    let snippet = match page.assert_exists("#contact").and(page.assert_text("#contact", "")) {
        Err(Error::AssertionFailed { dom_snippet, .. }) => dom_snippet,
        other => panic!("unexpected result: {other:?}"),
    };
    assert!(snippet.ends_with("..."));
    assert_eq!(snippet.chars().count(), 203);
    Ok(())
}

#[test]
fn dump_dom_serializes_attributes_in_order() -> Result<()> {
    let page = Page::from_html(r#"<p id="n" class="a" data-x='"q"'>1 &lt; 2</p>"#)?;
    assert_eq!(
        page.dump_dom("#n")?,
        r#"<p class="a" data-x="&quot;q&quot;" id="n">1 &lt; 2</p>"#
    );
    Ok(())
}
