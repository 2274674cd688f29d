//! Error presentation state for one form.
//!
//! A [`FormView`] owns everything the user sees as feedback: the banner,
//! the highlighted containers and their inline messages, the focus target and
//! any blocking alert. Field containers are resolved through a
//! [`FieldRegistry`] built once per form instead of walking up the markup.

use std::collections::HashMap;

use tracing::debug;

use crate::dom_ids::{BANNER_CLASS, ERROR_MARKER_CLASS, INLINE_ERROR_CLASS};

pub const ERROR_HEADING: &str = "Please fix the following errors:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Grouping wrapper for radio sets.
    Fieldset,
    /// `.form-row`
    Row,
    /// `.field`
    Field,
    Parent,
}

/// Lookup order when a field has several candidate containers. First match wins.
pub const CONTAINER_PRIORITY: [ContainerKind; 4] = [
    ContainerKind::Fieldset,
    ContainerKind::Row,
    ContainerKind::Field,
    ContainerKind::Parent,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub kind: ContainerKind,
    pub element_id: String,
}

impl Container {
    pub fn new(kind: ContainerKind, element_id: impl Into<String>) -> Self {
        Self {
            kind,
            element_id: element_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    entries: HashMap<String, Vec<Container>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `field` inside its conventional `.form-row` wrapper.
    pub fn with_row(mut self, field: &str) -> Self {
        self.register(
            field,
            vec![Container::new(ContainerKind::Row, crate::dom_ids::row_id(field))],
        );
        self
    }

    pub fn with_fieldset(mut self, field: &str, fieldset_id: &str) -> Self {
        self.register(field, vec![Container::new(ContainerKind::Fieldset, fieldset_id)]);
        self
    }

    pub fn register(&mut self, field: impl Into<String>, containers: Vec<Container>) {
        self.entries.insert(field.into(), containers);
    }

    pub fn unregister(&mut self, field: &str) {
        self.entries.remove(field);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn resolve(&self, field: &str) -> Option<&Container> {
        let candidates = self.entries.get(field)?;
        CONTAINER_PRIORITY
            .iter()
            .find_map(|kind| candidates.iter().find(|c| c.kind == *kind))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerStatus {
    Idle,
    Errors { heading: String, items: Vec<String> },
    Success(String),
    Failure(String),
}

/// The single page-level feedback element of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: &'static str,
    pub status: BannerStatus,
}

impl Banner {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            status: BannerStatus::Idle,
        }
    }

    pub fn class(&self) -> String {
        match self.status {
            BannerStatus::Idle => BANNER_CLASS.to_string(),
            BannerStatus::Errors { .. } | BannerStatus::Failure(_) => {
                format!("{} error", BANNER_CLASS)
            }
            BannerStatus::Success(_) => format!("{} success", BANNER_CLASS),
        }
    }

    pub fn text(&self) -> String {
        match &self.status {
            BannerStatus::Idle => String::new(),
            BannerStatus::Errors { heading, items } => {
                let mut lines = vec![heading.clone()];
                lines.extend(items.iter().cloned());
                lines.join("\n")
            }
            BannerStatus::Success(msg) | BannerStatus::Failure(msg) => msg.clone(),
        }
    }

    pub fn items(&self) -> &[String] {
        match &self.status {
            BannerStatus::Errors { items, .. } => items,
            _ => &[],
        }
    }

    pub fn to_html(&self) -> String {
        let inner = match &self.status {
            BannerStatus::Idle => String::new(),
            BannerStatus::Errors { heading, items } => {
                let list: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>", escape_html(item)))
                    .collect();
                format!("<p>{}</p><ul>{}</ul>", escape_html(heading), list)
            }
            BannerStatus::Success(msg) | BannerStatus::Failure(msg) => escape_html(msg),
        };

        format!(
            r#"<div id="{}" class="{}" role="alert" aria-live="polite" tabindex="-1">{}</div>"#,
            self.id,
            self.class(),
            inner
        )
    }
}

/// A highlighted container and its one inline message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMarker {
    pub container_id: String,
    pub message: String,
}

impl FieldMarker {
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="{} {}" data-for="{}">{}</div>"#,
            INLINE_ERROR_CLASS,
            ERROR_MARKER_CLASS,
            escape_html(&self.container_id),
            escape_html(&self.message)
        )
    }
}

#[derive(Debug, Clone)]
pub struct FormView {
    form_id: &'static str,
    banner_id: &'static str,
    registry: FieldRegistry,
    banner: Option<Banner>,
    markers: Vec<FieldMarker>,
    focused: Option<String>,
    alert: Option<String>,
}

impl FormView {
    pub fn new(form_id: &'static str, banner_id: &'static str, registry: FieldRegistry) -> Self {
        Self {
            form_id,
            banner_id,
            registry,
            banner: None,
            markers: Vec::new(),
            focused: None,
            alert: None,
        }
    }

    pub fn form_id(&self) -> &'static str {
        self.form_id
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FieldRegistry {
        &mut self.registry
    }

    /// Creates the banner on first use; later calls return the same one.
    pub fn ensure_error_box(&mut self) -> &mut Banner {
        let banner_id = self.banner_id;
        self.banner.get_or_insert_with(|| {
            debug!("creating banner #{}", banner_id);
            Banner::new(banner_id)
        })
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Id of the form's first child. The banner always takes that slot once it exists.
    pub fn first_child_id(&self) -> Option<&'static str> {
        self.banner.as_ref().map(|b| b.id)
    }

    pub fn clear_form_errors(&mut self) {
        self.markers.clear();
        self.focused = None;
        self.alert = None;
        if let Some(banner) = self.banner.as_mut() {
            banner.status = BannerStatus::Idle;
        }
    }

    pub fn show_field_error(&mut self, field: &str, message: &str) {
        let Some(container) = self.registry.resolve(field) else {
            debug!("no container registered for field {}", field);
            return;
        };

        let container_id = container.element_id.clone();
        match self
            .markers
            .iter_mut()
            .find(|m| m.container_id == container_id)
        {
            Some(marker) => marker.message = message.to_string(),
            None => self.markers.push(FieldMarker {
                container_id,
                message: message.to_string(),
            }),
        }
    }

    /// Renders the banner as an error list and moves focus onto it.
    pub fn show_errors(&mut self, messages: Vec<String>) {
        let banner = self.ensure_error_box();
        banner.status = BannerStatus::Errors {
            heading: ERROR_HEADING.to_string(),
            items: messages,
        };
        let id = banner.id.to_string();
        self.focused = Some(id);
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.ensure_error_box().status = BannerStatus::Success(message.into());
    }

    pub fn show_failure(&mut self, message: impl Into<String>) {
        self.ensure_error_box().status = BannerStatus::Failure(message.into());
    }

    /// Records a blocking alert for the host to display.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn alert_message(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn markers(&self) -> &[FieldMarker] {
        &self.markers
    }

    /// Whether `container_id` carries the `has-error` marker.
    pub fn has_error(&self, container_id: &str) -> bool {
        self.markers.iter().any(|m| m.container_id == container_id)
    }

    pub fn inline_message(&self, container_id: &str) -> Option<&str> {
        self.markers
            .iter()
            .find(|m| m.container_id == container_id)
            .map(|m| m.message.as_str())
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
