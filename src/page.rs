use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::api::SiteApi;
use crate::config::SiteConfig;
use crate::dom_ids::{CONTACT_FORM, LOOKUP_FORM, PROJECT_FORM, PROJECTS_BODY, PROJECTS_STATUS};
use crate::forms::{ContactForm, LookupForm, ProjectForm, SubmitState};
use crate::listing::ProjectsList;

/// Controllers for whatever the current page contains.
///
/// [`Page::load`] runs one initialiser per target. Each does nothing when its
/// element is missing or its controller already exists, so loading twice is
/// harmless.
pub struct Page {
    api: Arc<dyn SiteApi>,
    config: SiteConfig,
    contact: Option<ContactForm>,
    project: Option<ProjectForm>,
    lookup: Option<LookupForm>,
    listing: Option<ProjectsList>,
}

impl Page {
    pub fn new(api: Arc<dyn SiteApi>, config: SiteConfig) -> Self {
        Self {
            api,
            config,
            contact: None,
            project: None,
            lookup: None,
            listing: None,
        }
    }

    pub async fn load<'a, I>(&mut self, present_ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids: HashSet<&str> = present_ids.into_iter().collect();

        self.init_contact(&ids);
        self.init_project(&ids);
        self.init_lookup(&ids);
        self.init_listing(&ids).await;
    }

    fn init_contact(&mut self, ids: &HashSet<&str>) {
        if self.contact.is_none() && ids.contains(CONTACT_FORM) {
            debug!("initialising #{}", CONTACT_FORM);
            self.contact = Some(ContactForm::new(&self.config));
        }
    }

    fn init_project(&mut self, ids: &HashSet<&str>) {
        if self.project.is_none() && ids.contains(PROJECT_FORM) {
            debug!("initialising #{}", PROJECT_FORM);
            self.project = Some(ProjectForm::new());
        }
    }

    fn init_lookup(&mut self, ids: &HashSet<&str>) {
        if self.lookup.is_none() && ids.contains(LOOKUP_FORM) {
            debug!("initialising #{}", LOOKUP_FORM);
            self.lookup = Some(LookupForm::new());
        }
    }

    async fn init_listing(&mut self, ids: &HashSet<&str>) {
        if self.listing.is_some()
            || !ids.contains(PROJECTS_BODY)
            || !ids.contains(PROJECTS_STATUS)
        {
            return;
        }

        debug!("initialising #{}", PROJECTS_BODY);
        let mut listing = ProjectsList::new();
        listing.load(self.api.as_ref()).await;
        self.listing = Some(listing);
    }

    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    pub fn contact_mut(&mut self) -> Option<&mut ContactForm> {
        self.contact.as_mut()
    }

    pub fn project(&self) -> Option<&ProjectForm> {
        self.project.as_ref()
    }

    pub fn project_mut(&mut self) -> Option<&mut ProjectForm> {
        self.project.as_mut()
    }

    pub fn lookup_mut(&mut self) -> Option<&mut LookupForm> {
        self.lookup.as_mut()
    }

    pub fn listing(&self) -> Option<&ProjectsList> {
        self.listing.as_ref()
    }

    /// Submits the contact form if this page has one.
    pub async fn submit_contact(&mut self) -> Option<SubmitState> {
        let form = self.contact.as_mut()?;
        Some(form.submit(self.api.as_ref()).await)
    }

    pub async fn submit_project(&mut self) -> Option<SubmitState> {
        let form = self.project.as_mut()?;
        Some(form.submit(self.api.as_ref()).await)
    }

    pub fn submit_lookup(&mut self) -> Option<SubmitState> {
        self.lookup.as_mut().map(LookupForm::submit)
    }
}
