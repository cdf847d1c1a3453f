use super::*;
use crate::clipboard::{ClipboardMock, CopyOutcome, CopySummaryButton};
use crate::contact::ContactController;
use crate::scheduler::{SchedulerState, TimerAction};
use crate::simulator::SimulatorController;
use crate::storage::Persistence;
use crate::widgets::{BackToTop, FilterBar, NavMenu, RevealObserver, TestimonialCarousel};

mod actions;
mod assertions;
mod timers;

/// Page behaviour reachable from a DOM event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageAction {
    RecomputeSimulator,
    SubmitSimulator,
    UpdateContact,
    SubmitContact,
    CopySummary,
    ApplyFilter,
    PrevTestimonial,
    NextTestimonial,
    ToggleNav,
    CloseNav,
    BackToTop,
}

#[derive(Debug, Clone)]
struct Listener {
    event: &'static str,
    action: PageAction,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, Vec<Listener>>,
}

impl ListenerStore {
    fn add(&mut self, node: NodeId, event: &'static str, action: PageAction) {
        self.map
            .entry(node)
            .or_default()
            .push(Listener { event, action });
    }

    fn actions(&self, node: NodeId, event: &str) -> Vec<PageAction> {
        self.map
            .get(&node)
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.event == event)
                    .map(|listener| listener.action)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One loaded visit of the site: the DOM plus everything the page script
/// keeps alive (controllers, widgets, timers, clipboard and local store).
pub struct Page {
    dom: Dom,
    listeners: ListenerStore,
    config: SiteConfig,
    origin: String,
    source_html: String,
    storage: LocalStorage,
    clipboard: ClipboardMock,
    scheduler: SchedulerState,
    trace_state: TraceState,
    simulator: SimulatorController,
    contact: Option<ContactController>,
    copy: Option<CopySummaryButton>,
    filters: Option<FilterBar>,
    reveal: RevealObserver,
    carousel: Option<TestimonialCarousel>,
    nav: Option<NavMenu>,
    back_to_top: Option<BackToTop>,
    scroll_y: f64,
    last_scroll_into_view: Option<String>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("origin", &self.origin)
            .field("now_ms", &self.scheduler.now_ms)
            .field("scroll_y", &self.scroll_y)
            .field("pending_timers", &self.scheduler.task_queue.len())
            .finish_non_exhaustive()
    }
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::with_config(html, SiteConfig::default(), LocalStorage::new())
    }

    /// Loads `html` against an existing browser profile, as a returning visitor.
    pub fn from_html_with_storage(html: &str, storage: LocalStorage) -> Result<Self> {
        Self::with_config(html, SiteConfig::default(), storage)
    }

    pub fn with_config(html: &str, config: SiteConfig, storage: LocalStorage) -> Result<Self> {
        Self::load(
            html,
            config,
            storage,
            ClipboardMock::default(),
            TraceState::default(),
        )
    }

    fn load(
        html: &str,
        config: SiteConfig,
        storage: LocalStorage,
        clipboard: ClipboardMock,
        trace_state: TraceState,
    ) -> Result<Self> {
        config.validate()?;
        let dom = parse_html(html)?;
        let origin = origin_of(&config.document_url);

        let simulator = SimulatorController::bind(&dom);
        let contact = ContactController::bind(&dom);
        let copy = CopySummaryButton::bind(&dom);
        let filters = FilterBar::bind(&dom)?;
        let reveal = RevealObserver::bind(&dom, config.reveal_threshold)?;
        let carousel = TestimonialCarousel::bind(&dom, config.testimonials.clone());
        let nav = NavMenu::bind(&dom)?;
        let back_to_top = BackToTop::bind(&dom, config.back_to_top_threshold);

        let mut page = Self {
            dom,
            listeners: ListenerStore::default(),
            config,
            origin,
            source_html: html.to_string(),
            storage,
            clipboard,
            scheduler: SchedulerState::default(),
            trace_state,
            simulator,
            contact,
            copy,
            filters,
            reveal,
            carousel,
            nav,
            back_to_top,
            scroll_y: 0.0,
            last_scroll_into_view: None,
        };
        page.start()?;
        Ok(page)
    }

    // Same order as the page script: widgets first, then the two restores.
    fn start(&mut self) -> Result<()> {
        if let Some(filters) = &self.filters {
            for button in &filters.buttons {
                self.listeners.add(*button, "click", PageAction::ApplyFilter);
            }
        }

        if let Some(carousel) = &self.carousel {
            if let Some(next) = carousel.next {
                self.listeners.add(next, "click", PageAction::NextTestimonial);
            }
            if let Some(prev) = carousel.prev {
                self.listeners.add(prev, "click", PageAction::PrevTestimonial);
            }
            carousel.render(&mut self.dom)?;
            let interval = self.config.testimonial_interval_ms;
            let id = self
                .scheduler
                .schedule(TimerAction::NextTestimonial, interval, true);
            self.trace_state.timer_line(format!(
                "[timer] schedule id={id} action=next_testimonial interval_ms={interval}"
            ));
        }

        if let Some(nav) = &self.nav {
            if let Some(toggle) = nav.toggle {
                self.listeners.add(toggle, "click", PageAction::ToggleNav);
            }
            for anchor in &nav.anchors {
                self.listeners.add(*anchor, "click", PageAction::CloseNav);
            }
        }

        if let Some(back_to_top) = &self.back_to_top {
            self.listeners
                .add(back_to_top.button, "click", PageAction::BackToTop);
        }

        if let Some(form) = self.simulator.form {
            self.listeners
                .add(form, "input", PageAction::RecomputeSimulator);
            self.listeners
                .add(form, "submit", PageAction::SubmitSimulator);
        }
        if let Some(contact) = &self.contact {
            self.listeners
                .add(contact.form, "input", PageAction::UpdateContact);
            self.listeners
                .add(contact.form, "submit", PageAction::SubmitContact);
        }
        if let Some(copy) = &self.copy {
            self.listeners.add(copy.button, "click", PageAction::CopySummary);
        }

        self.restore_simulator()?;
        self.restore_contact()?;
        Ok(())
    }

    /// A fresh visit of the same markup with the same browser profile.
    /// Timers, scroll position and in-memory widget state start over; the
    /// local store, clipboard and trace settings carry across.
    pub fn reload(self) -> Result<Self> {
        let Self {
            source_html,
            config,
            storage,
            clipboard,
            trace_state,
            ..
        } = self;
        Self::load(&source_html, config, storage, clipboard, trace_state)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut LocalStorage {
        &mut self.storage
    }

    pub fn into_storage(self) -> LocalStorage {
        self.storage
    }

    /// Raw text persisted under `key` for this page's origin.
    pub fn stored_item(&self, key: StorageKey) -> Option<&str> {
        self.storage.get(&self.origin, key.as_str())
    }

    pub fn set_clipboard_permission(&mut self, permission: ClipboardPermission) {
        self.clipboard.permission = permission;
    }

    pub fn clipboard_text(&self) -> &str {
        &self.clipboard.text
    }

    pub fn set_clipboard_text(&mut self, text: &str) {
        self.clipboard.text = text.to_string();
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.take_logs()
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_state.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    pub fn set_trace_storage(&mut self, enabled: bool) {
        self.trace_state.storage = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.trace_state.set_log_limit(max_entries)
    }

    fn restore_simulator(&mut self) -> Result<SimulatorState> {
        let mut backend = self.storage.scoped(&self.origin);
        let mut store = Persistence::traced(&mut backend, &mut self.trace_state);
        self.simulator.restore(&mut self.dom, &mut store)
    }

    fn recompute_simulator(&mut self) -> Result<SimulatorDisplay> {
        let mut backend = self.storage.scoped(&self.origin);
        let mut store = Persistence::traced(&mut backend, &mut self.trace_state);
        self.simulator.recompute(&mut self.dom, &mut store)
    }

    fn restore_contact(&mut self) -> Result<Option<String>> {
        let Some(contact) = &self.contact else {
            return Ok(None);
        };
        let mut backend = self.storage.scoped(&self.origin);
        let mut store = Persistence::traced(&mut backend, &mut self.trace_state);
        contact.restore(&mut self.dom, &mut store).map(Some)
    }

    fn update_contact(&mut self) -> Result<Option<String>> {
        let Some(contact) = &self.contact else {
            return Ok(None);
        };
        let mut backend = self.storage.scoped(&self.origin);
        let mut store = Persistence::traced(&mut backend, &mut self.trace_state);
        contact.update(&mut self.dom, &mut store).map(Some)
    }

    fn copy_summary(&mut self) -> Result<()> {
        let Some(copy) = &self.copy else {
            return Ok(());
        };
        match copy.copy(&mut self.dom, &mut self.clipboard, &self.config)? {
            CopyOutcome::Copied { chars } => {
                self.trace_state
                    .line(format!("[clipboard] write chars={chars} ok"));
                let delay = self.config.copy_label_reset_ms;
                let id = self
                    .scheduler
                    .schedule(TimerAction::RestoreCopyLabel, delay, false);
                self.trace_state.timer_line(format!(
                    "[timer] schedule id={id} action=restore_copy_label delay_ms={delay}"
                ));
            }
            CopyOutcome::Failed(err) => {
                self.trace_state
                    .line(format!("[clipboard] write failed: {err}"));
            }
        }
        Ok(())
    }

    fn scroll_into_view(&mut self, id: &str) {
        if self.dom.by_id(id).is_some() {
            self.last_scroll_into_view = Some(id.to_string());
        }
    }

    fn run_action(&mut self, action: PageAction, target: NodeId) -> Result<()> {
        match action {
            PageAction::RecomputeSimulator => {
                self.recompute_simulator()?;
            }
            PageAction::SubmitSimulator => {
                self.recompute_simulator()?;
                self.scroll_into_view("contact");
            }
            PageAction::UpdateContact | PageAction::SubmitContact => {
                self.update_contact()?;
            }
            PageAction::CopySummary => self.copy_summary()?,
            PageAction::ApplyFilter => {
                if let Some(filters) = &self.filters {
                    filters.apply(&mut self.dom, target)?;
                }
            }
            PageAction::PrevTestimonial => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.prev(&mut self.dom)?;
                }
            }
            PageAction::NextTestimonial => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.next(&mut self.dom)?;
                }
            }
            PageAction::ToggleNav => {
                if let Some(nav) = &self.nav {
                    nav.toggle(&mut self.dom)?;
                }
            }
            PageAction::CloseNav => {
                if let Some(nav) = &self.nav {
                    nav.close(&mut self.dom)?;
                }
            }
            PageAction::BackToTop => self.scroll_to(0.0)?,
        }
        Ok(())
    }

    pub(crate) fn trace_node_label(&self, node: NodeId) -> String {
        if let Some(id) = self.dom.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }
}
