use super::*;
use crate::number::{format_currency, format_number, parse_hours};
use crate::pricing::PriceBreakdown;
use crate::storage::{LoadOutcome, Persistence, StorageKey, json_text, json_truthy};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Inputs of the price simulator, persisted as
/// `{"service": .., "hours": .., "frequency": ..}`.
///
/// Decoding accepts any JSON except `null`: falsy or missing members read as
/// empty, other members as the text a control would show, and `hours` goes
/// through [`parse_hours`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct SimulatorState {
    pub service: String,
    #[serde(serialize_with = "serialize_hours")]
    pub hours: f64,
    pub frequency: String,
}

// Whole hours are written as JSON integers (`5`, not `5.0`).
fn serialize_hours<S: Serializer>(hours: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if hours.fract() == 0.0 && hours.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*hours as i64)
    } else {
        serializer.serialize_f64(*hours)
    }
}

impl TryFrom<Value> for SimulatorState {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        if value.is_null() {
            return Err("saved simulator state is null".to_string());
        }
        let member = |name: &str| {
            value
                .get(name)
                .filter(|member| json_truthy(member))
                .map(json_text)
                .unwrap_or_default()
        };
        Ok(Self::from_inputs(
            &member("service"),
            &member("hours"),
            &member("frequency"),
        ))
    }
}

impl SimulatorState {
    pub fn from_inputs(service: &str, hours: &str, frequency: &str) -> Self {
        Self {
            service: service.to_string(),
            hours: parse_hours(hours),
            frequency: frequency.to_string(),
        }
    }

    pub fn breakdown(&self) -> PriceBreakdown {
        PriceBreakdown::for_service(&self.service, self.hours)
    }

    pub fn display(&self) -> SimulatorDisplay {
        let breakdown = self.breakdown();
        SimulatorDisplay {
            gross: format_currency(breakdown.gross),
            credit: format_currency(breakdown.credit),
            net: format_currency(breakdown.net),
            state: self.clone(),
        }
    }
}

/// Formatted amounts shown by the simulator, with the state they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorDisplay {
    pub gross: String,
    pub credit: String,
    pub net: String,
    pub state: SimulatorState,
}

/// Simulator controls bound by id. Every control is optional; a missing
/// input reads as empty and a missing output is not written.
#[derive(Debug, Clone, Default)]
pub(crate) struct SimulatorController {
    pub(crate) form: Option<NodeId>,
    service: Option<NodeId>,
    hours: Option<NodeId>,
    frequency: Option<NodeId>,
    gross: Option<NodeId>,
    credit: Option<NodeId>,
    net: Option<NodeId>,
    last: Option<SimulatorDisplay>,
}

impl SimulatorController {
    pub(crate) fn bind(dom: &Dom) -> Self {
        Self {
            form: dom.by_id("simulatorForm"),
            service: dom.by_id("simService"),
            hours: dom.by_id("simHours"),
            frequency: dom.by_id("simFrequency"),
            gross: dom.by_id("simBrut"),
            credit: dom.by_id("simCredit"),
            net: dom.by_id("simNet"),
            last: None,
        }
    }

    pub(crate) fn last_display(&self) -> Option<&SimulatorDisplay> {
        self.last.as_ref()
    }

    fn read(dom: &Dom, node: Option<NodeId>) -> Result<String> {
        match node {
            Some(node) => dom.value(node),
            None => Ok(String::new()),
        }
    }

    pub(crate) fn read_state(&self, dom: &Dom) -> Result<SimulatorState> {
        Ok(SimulatorState::from_inputs(
            &Self::read(dom, self.service)?,
            &Self::read(dom, self.hours)?,
            &Self::read(dom, self.frequency)?,
        ))
    }

    /// Reads the inputs, writes the three amounts and persists the state.
    pub(crate) fn recompute(
        &mut self,
        dom: &mut Dom,
        store: &mut Persistence<'_>,
    ) -> Result<SimulatorDisplay> {
        let display = self.read_state(dom)?.display();
        for (node, text) in [
            (self.gross, &display.gross),
            (self.credit, &display.credit),
            (self.net, &display.net),
        ] {
            if let Some(node) = node {
                dom.set_text_content(node, text)?;
            }
        }
        store.save(StorageKey::Simulator, &display.state);
        self.last = Some(display.clone());
        Ok(display)
    }

    /// Applies the persisted state (truthy members only), then recomputes.
    pub(crate) fn restore(
        &mut self,
        dom: &mut Dom,
        store: &mut Persistence<'_>,
    ) -> Result<SimulatorState> {
        match store.load::<SimulatorState>(StorageKey::Simulator) {
            LoadOutcome::Found(saved) => {
                if let Some(node) = self.service.filter(|_| !saved.service.is_empty()) {
                    dom.set_value(node, &saved.service)?;
                }
                if let Some(node) = self.hours.filter(|_| saved.hours != 0.0) {
                    dom.set_value(node, &format_number(saved.hours))?;
                }
                if let Some(node) = self.frequency.filter(|_| !saved.frequency.is_empty()) {
                    dom.set_value(node, &saved.frequency)?;
                }
            }
            LoadOutcome::Absent => {}
            LoadOutcome::Corrupt { .. } => store.clear(StorageKey::Simulator),
        }
        Ok(self.recompute(dom, store)?.state)
    }
}
