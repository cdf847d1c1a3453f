use super::*;
use crate::storage::{LoadOutcome, Persistence, StorageKey, json_text};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    /// A checkbox group submitting every checked value.
    MultiOption,
}

/// The contact form fields, in summary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    LastName,
    FirstName,
    Email,
    Phone,
    Service,
    Frequency,
    Slots,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 8] = [
        Self::LastName,
        Self::FirstName,
        Self::Email,
        Self::Phone,
        Self::Service,
        Self::Frequency,
        Self::Slots,
        Self::Message,
    ];

    /// Form control name.
    pub fn name(self) -> &'static str {
        match self {
            Self::LastName => "lastName",
            Self::FirstName => "firstName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Service => "service",
            Self::Frequency => "frequency",
            Self::Slots => "slots",
            Self::Message => "message",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Slots => FieldKind::MultiOption,
            _ => FieldKind::Scalar,
        }
    }

    pub fn summary_label(self) -> &'static str {
        match self {
            Self::LastName => "Nom",
            Self::FirstName => "Prénom",
            Self::Email => "Email",
            Self::Phone => "Téléphone",
            Self::Service => "Service souhaité",
            Self::Frequency => "Fréquence",
            Self::Slots => "Créneaux préférés",
            Self::Message => "Message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Submitted contact form values.
///
/// Scalar entries keep the first value submitted under their name; `slots`
/// keeps every checked value in document order. Serialized as one flat JSON
/// object with `slots` written last as an array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ContactState {
    fields: BTreeMap<String, String>,
    slots: Vec<String>,
}

impl ContactState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one form-data entry.
    pub fn push_entry(&mut self, name: &str, value: &str) {
        if name == ContactField::Slots.name() {
            self.slots.push(value.to_string());
        } else {
            self.fields
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn field(&self, field: ContactField) -> Option<&str> {
        self.get(field.name())
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl Serialize for ContactState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(ContactField::Slots.name(), &self.slots)?;
        map.end()
    }
}

// Members of any JSON type are read back as control text; `slots` may be an
// array or a single string.
#[derive(Deserialize)]
struct PersistedContact {
    #[serde(default)]
    slots: Value,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

// `null` has no members to read. Other non-object JSON restores no field and
// leaves every slot unchecked.
impl TryFrom<Value> for ContactState {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Null => Err("saved contact form is null".to_string()),
            Value::Object(members) => PersistedContact::deserialize(Value::Object(members))
                .map(Self::from)
                .map_err(|err| err.to_string()),
            _ => Ok(Self::new()),
        }
    }
}

impl From<PersistedContact> for ContactState {
    fn from(persisted: PersistedContact) -> Self {
        let fields = persisted
            .fields
            .into_iter()
            .map(|(name, value)| (name, json_text(&value)))
            .collect();
        let slots = match persisted.slots {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect(),
            Value::String(text) if !text.is_empty() => vec![text],
            _ => Vec::new(),
        };
        Self { fields, slots }
    }
}

/// Fixed-order report, one `Label : value` line per field. Empty values and
/// an empty slot list render as `-`.
pub fn build_summary(state: &ContactState) -> String {
    ContactField::ALL
        .into_iter()
        .map(|field| {
            let value = match field.kind() {
                FieldKind::MultiOption if !state.slots.is_empty() => state.slots.join(", "),
                FieldKind::MultiOption => "-".to_string(),
                FieldKind::Scalar => match state.field(field) {
                    Some(value) if !value.is_empty() => value.to_string(),
                    _ => "-".to_string(),
                },
            };
            format!("{} : {}", field.summary_label(), value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone)]
pub(crate) struct ContactController {
    pub(crate) form: NodeId,
    summary: Option<NodeId>,
}

impl ContactController {
    pub(crate) fn bind(dom: &Dom) -> Option<Self> {
        Some(Self {
            form: dom.by_id("contactForm")?,
            summary: dom.by_id("contactSummary"),
        })
    }

    pub(crate) fn collect(&self, dom: &Dom) -> Result<ContactState> {
        let mut state = ContactState::new();
        for (name, value) in form_data_entries(dom, self.form)? {
            state.push_entry(&name, &value);
        }
        Ok(state)
    }

    pub(crate) fn persist(&self, store: &mut Persistence<'_>, state: &ContactState) {
        store.save(StorageKey::Contact, state);
    }

    /// Collects the form, rewrites the summary and persists. Returns the summary.
    pub(crate) fn update(&self, dom: &mut Dom, store: &mut Persistence<'_>) -> Result<String> {
        let state = self.collect(dom)?;
        let summary = build_summary(&state);
        if let Some(node) = self.summary {
            dom.set_text_content(node, &summary)?;
        }
        self.persist(store, &state);
        Ok(summary)
    }

    pub(crate) fn restore(&self, dom: &mut Dom, store: &mut Persistence<'_>) -> Result<String> {
        match store.load::<ContactState>(StorageKey::Contact) {
            LoadOutcome::Found(saved) => self.apply(dom, &saved)?,
            LoadOutcome::Absent => {}
            LoadOutcome::Corrupt { .. } => store.clear(StorageKey::Contact),
        }
        self.update(dom, store)
    }

    fn apply(&self, dom: &mut Dom, saved: &ContactState) -> Result<()> {
        for (name, value) in saved.fields() {
            let Some(field) = ContactField::from_name(name) else {
                continue;
            };
            if field.kind() == FieldKind::MultiOption {
                continue;
            }
            // A name shared by several controls is a radio or checkbox group.
            let controls = named_controls(dom, self.form, field.name());
            let [control] = controls[..] else {
                continue;
            };
            dom.set_value(control, value)?;
        }

        let slot_boxes = dom.query_selector_all_from(&self.form, "input[name=\"slots\"]")?;
        for checkbox in slot_boxes {
            let value = dom.value(checkbox)?;
            dom.set_checked(checkbox, saved.slots.contains(&value))?;
        }
        Ok(())
    }
}
