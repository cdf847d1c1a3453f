use presence_plus::{Page, PriceBreakdown, build_summary, format_currency, parse_hours};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const PAGE_PROPTEST_REGRESSION_FILE: &str = "tests/proptest-regressions/page_property_test.txt";
const DEFAULT_PAGE_PROPTEST_CASES: u32 = 64;

const SITE_HTML: &str = include_str!("fixtures/site.html");

const SERVICES: [&str; 7] = [
    "",
    "entretien",
    "jardinage",
    "bricolage",
    "garde",
    "soutien",
    "courses",
];
const FREQUENCIES: [&str; 3] = ["ponctuel", "hebdomadaire", "mensuel"];
const CONTACT_INPUTS: [&str; 5] = ["#lastName", "#firstName", "#email", "#phone", "#message"];
const CONTACT_SELECTS: [(&str, &[&str]); 2] = [
    (
        "#service",
        &["", "Entretien de la maison", "Jardinage", "Garde d'enfants"],
    ),
    ("#frequency", &["", "Ponctuel", "Hebdomadaire"]),
];
const SLOTS: [&str; 3] = ["#slotMatin", "#slotMidi", "#slotSoir"];
const FILTERS: [&str; 3] = ["#filterAll", "#filterMaison", "#filterFamille"];

#[derive(Clone, Debug)]
enum VisitorAction {
    SelectService(usize),
    TypeHours(String),
    SelectFrequency(usize),
    TypeContact(usize, String),
    SelectContact(usize, usize),
    ToggleSlot(usize),
    SubmitContact,
    CopySummary,
    ClickFilter(usize),
    NextTestimonial,
    Scroll(u16),
    AdvanceTime(u16),
    Reload,
}

fn env_proptest_cases(var_name: &str, default_cases: u32) -> u32 {
    std::env::var(var_name)
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default_cases)
}

fn page_proptest_cases() -> u32 {
    std::env::var("PRESENCE_PLUS_PAGE_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or_else(|| {
            env_proptest_cases("PRESENCE_PLUS_PROPTEST_CASES", DEFAULT_PAGE_PROPTEST_CASES)
        })
}

fn hours_text_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            4 => prop::char::range('0', '9'),
            1 => Just('.'),
            1 => Just(','),
            1 => Just('-'),
            1 => Just('e'),
            1 => Just('x'),
            1 => Just(' '),
        ],
        0..=6,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn free_text_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just('a'),
            Just('é'),
            Just('Z'),
            Just('0'),
            Just(' '),
            Just('"'),
            Just('\''),
            Just(':'),
            Just('\n'),
            Just('€'),
        ],
        0..=12,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn visitor_action_strategy() -> BoxedStrategy<VisitorAction> {
    prop_oneof![
        3 => (0..SERVICES.len()).prop_map(VisitorAction::SelectService),
        4 => hours_text_strategy().prop_map(VisitorAction::TypeHours),
        1 => (0..FREQUENCIES.len()).prop_map(VisitorAction::SelectFrequency),
        4 => (0..CONTACT_INPUTS.len(), free_text_strategy())
            .prop_map(|(field, text)| VisitorAction::TypeContact(field, text)),
        2 => (0..CONTACT_SELECTS.len(), 0..3usize)
            .prop_map(|(select, option)| VisitorAction::SelectContact(select, option)),
        2 => (0..SLOTS.len()).prop_map(VisitorAction::ToggleSlot),
        1 => Just(VisitorAction::SubmitContact),
        1 => Just(VisitorAction::CopySummary),
        1 => (0..FILTERS.len()).prop_map(VisitorAction::ClickFilter),
        1 => Just(VisitorAction::NextTestimonial),
        1 => any::<u16>().prop_map(VisitorAction::Scroll),
        2 => (0u16..=7000).prop_map(VisitorAction::AdvanceTime),
        2 => Just(VisitorAction::Reload),
    ]
    .boxed()
}

fn visitor_action_sequence_strategy() -> BoxedStrategy<Vec<VisitorAction>> {
    vec(visitor_action_strategy(), 1..=24).boxed()
}

fn run_action(page: Page, action: &VisitorAction) -> presence_plus::Result<Page> {
    let mut page = page;
    match action {
        VisitorAction::SelectService(idx) => page.select_value("#simService", SERVICES[*idx])?,
        VisitorAction::TypeHours(text) => page.type_text("#simHours", text)?,
        VisitorAction::SelectFrequency(idx) => {
            page.select_value("#simFrequency", FREQUENCIES[*idx])?
        }
        VisitorAction::TypeContact(field, text) => page.type_text(CONTACT_INPUTS[*field], text)?,
        VisitorAction::SelectContact(select, option) => {
            let (selector, options) = CONTACT_SELECTS[*select];
            page.select_value(selector, options[*option % options.len()])?
        }
        VisitorAction::ToggleSlot(idx) => page.click(SLOTS[*idx])?,
        VisitorAction::SubmitContact => page.click("#contactSubmit")?,
        VisitorAction::CopySummary => page.click("#copySummary")?,
        VisitorAction::ClickFilter(idx) => page.click(FILTERS[*idx])?,
        VisitorAction::NextTestimonial => page.click("#nextTestimonial")?,
        VisitorAction::Scroll(y) => page.scroll_to(f64::from(*y))?,
        VisitorAction::AdvanceTime(ms) => page.advance_time(i64::from(*ms))?,
        VisitorAction::Reload => return page.reload(),
    }
    Ok(page)
}

fn fail(err: presence_plus::Error) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn assert_page_is_consistent(page: &Page) -> TestCaseResult {
    let service = page.value("#simService").map_err(fail)?;
    let hours = page.value("#simHours").map_err(fail)?;
    let breakdown = PriceBreakdown::for_service(&service, parse_hours(&hours));
    prop_assert_eq!(page.text("#simBrut").map_err(fail)?, format_currency(breakdown.gross));
    prop_assert_eq!(page.text("#simCredit").map_err(fail)?, format_currency(breakdown.credit));
    prop_assert_eq!(page.text("#simNet").map_err(fail)?, format_currency(breakdown.net));

    let state = page
        .contact_state()
        .map_err(fail)?
        .ok_or_else(|| TestCaseError::fail("contact form missing"))?;
    prop_assert_eq!(page.text("#contactSummary").map_err(fail)?, build_summary(&state));
    Ok(())
}

fn assert_visitor_sequence_is_stable(actions: &[VisitorAction]) -> TestCaseResult {
    let mut page = Page::from_html(SITE_HTML).map_err(fail)?;

    for (step, action) in actions.iter().enumerate() {
        let before_reload = matches!(action, VisitorAction::Reload).then(|| {
            (
                page.text("#simNet").ok(),
                page.text("#contactSummary").ok(),
            )
        });

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            run_action(page, action)
        }));
        page = match outcome {
            Err(_) => {
                return Err(TestCaseError::fail(format!(
                    "action panicked at step {step}: {action:?}, actions={actions:?}"
                )));
            }
            Ok(Err(error)) => {
                return Err(TestCaseError::fail(format!(
                    "action returned error at step {step}: {action:?}, error={error:?}, actions={actions:?}"
                )));
            }
            Ok(Ok(page)) => page,
        };

        assert_page_is_consistent(&page)?;

        if let Some((net, summary)) = before_reload {
            prop_assert_eq!(
                page.text("#simNet").ok(),
                net,
                "simulator amount changed across reload at step {}",
                step
            );
            prop_assert_eq!(
                page.text("#contactSummary").ok(),
                summary,
                "contact summary changed across reload at step {}",
                step
            );
        }
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: page_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(PAGE_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn visitor_sequences_keep_page_consistent(actions in visitor_action_sequence_strategy()) {
        assert_visitor_sequence_is_stable(&actions)?;
    }
}
