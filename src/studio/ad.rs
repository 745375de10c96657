use super::{StudioModel, Transition};
use crate::{
    error::{Result, StudioError},
    gateway::Backend,
    models::{Ad, AdRequest, Company, NewCompany},
    state::{
        AdDraft, Collection, CompanyDraft, Draft, Pending, RequestTicket, RequestTracker,
        Resource, View, ViewError,
    },
};
use async_trait::async_trait;
use serde::Serialize;

const LOAD_COMPANIES_FAILED: &str = "Failed to load companies";
const LOAD_ADS_FAILED: &str = "Failed to load ads";

/// State of the company / ad generation app.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdStudio {
    pub view: View,
    pub companies: Collection<Company>,
    pub selected_company: Option<String>,
    pub ads: Collection<Ad>,
    pub company_draft: CompanyDraft,
    pub ad_draft: AdDraft,
    pub create_form: Pending,
    pub generate_form: Pending,
    pub error: Option<ViewError>,
    requests: RequestTracker,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdAction {
    LoadCompanies,
    CompaniesLoaded(RequestTicket, Result<Vec<Company>>),
    Navigate(View),
    EditCompany { field: String, value: String },
    SubmitCompany,
    CompanyCreated(RequestTicket, Result<Company>),
    SelectCompany(String),
    AdsLoaded(RequestTicket, Result<Vec<Ad>>),
    EditAd { field: String, value: String },
    GenerateAd,
    AdGenerated(RequestTicket, Result<Ad>),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdEffect {
    LoadCompanies(RequestTicket),
    CreateCompany(RequestTicket, NewCompany),
    LoadAds(RequestTicket, String),
    GenerateAd(RequestTicket, AdRequest),
}

impl AdStudio {
    pub fn selected_company(&self) -> Option<&Company> {
        self.selected_company
            .as_deref()
            .and_then(|id| self.companies.get(id))
    }

    pub fn create_label(&self) -> &'static str {
        self.create_form.label("Create Company", "Creating...")
    }

    pub fn generate_label(&self) -> &'static str {
        self.generate_form.label("Generate Ad", "Generating...")
    }

    /// File name offered when saving `ad`.
    pub fn download_name(&self, ad: &Ad) -> String {
        let company = self
            .companies
            .get(&ad.company_id)
            .map(|c| c.name.as_str())
            .unwrap_or("company");
        ad.download_name(company)
    }

    fn load_companies(mut self) -> Transition<Self, AdEffect> {
        let ticket = self.requests.issue(Resource::Companies);
        Transition::with_effect(self, AdEffect::LoadCompanies(ticket))
    }

    fn companies_loaded(
        mut self,
        ticket: RequestTicket,
        result: Result<Vec<Company>>,
    ) -> Transition<Self, AdEffect> {
        if !self.requests.settle(ticket) {
            return Transition::idle(self);
        }
        match result {
            Ok(companies) => {
                log::debug!("loaded {} companies", companies.len());
                self.companies.replace_all(companies);
            }
            Err(err) => {
                log::error!("{}: {}", LOAD_COMPANIES_FAILED, err);
                self.error = Some(ViewError::with_message(&err, LOAD_COMPANIES_FAILED));
            }
        }
        Transition::idle(self)
    }

    fn submit_company(mut self) -> Transition<Self, AdEffect> {
        if let Err(err) = self.company_draft.validate() {
            self.error = Some(err.into());
            return Transition::idle(self);
        }
        if !self.create_form.begin() {
            return Transition::idle(self);
        }
        self.error = None;
        let ticket = self.requests.issue(Resource::CreateCompany);
        let body = self.company_draft.to_new_company();
        Transition::with_effect(self, AdEffect::CreateCompany(ticket, body))
    }

    fn company_created(
        mut self,
        ticket: RequestTicket,
        result: Result<Company>,
    ) -> Transition<Self, AdEffect> {
        if !self.requests.settle(ticket) {
            return Transition::idle(self);
        }
        self.create_form.finish();
        match result {
            Ok(company) => {
                log::info!("company '{}' registered as {}", company.name, company.id);
                self.companies.append(company);
                self.company_draft = CompanyDraft::default();
                self.view = View::Companies;
            }
            Err(err) => {
                log::error!("company creation failed: {}", err);
                self.error = Some(err.into());
            }
        }
        Transition::idle(self)
    }

    fn select_company(mut self, company_id: String) -> Transition<Self, AdEffect> {
        if !self.companies.contains(&company_id) {
            log::warn!("ignoring selection of unknown company {}", company_id);
            return Transition::idle(self);
        }
        if self.selected_company.as_deref() != Some(company_id.as_str()) {
            self.ads.clear();
            self.ad_draft = AdDraft::default();
            // A generation for the previous company must not land in this list.
            self.requests.invalidate(Resource::GenerateAd);
            self.generate_form.finish();
        }
        self.selected_company = Some(company_id.clone());
        self.view = View::Generate;
        let ticket = self.requests.issue(Resource::Ads);
        Transition::with_effect(self, AdEffect::LoadAds(ticket, company_id))
    }

    fn ads_loaded(
        mut self,
        ticket: RequestTicket,
        result: Result<Vec<Ad>>,
    ) -> Transition<Self, AdEffect> {
        if !self.requests.settle(ticket) {
            return Transition::idle(self);
        }
        match result {
            Ok(ads) => self.ads.replace_all(ads),
            Err(err) => {
                log::error!("{}: {}", LOAD_ADS_FAILED, err);
                self.error = Some(ViewError::with_message(&err, LOAD_ADS_FAILED));
            }
        }
        Transition::idle(self)
    }

    fn generate_ad(mut self) -> Transition<Self, AdEffect> {
        let Some(company_id) = self.selected_company().map(|c| c.id.clone()) else {
            return Transition::idle(self);
        };
        if !self.generate_form.begin() {
            return Transition::idle(self);
        }
        self.error = None;
        let ticket = self.requests.issue(Resource::GenerateAd);
        let request = self.ad_draft.to_request(&company_id);
        Transition::with_effect(self, AdEffect::GenerateAd(ticket, request))
    }

    fn ad_generated(
        mut self,
        ticket: RequestTicket,
        result: Result<Ad>,
    ) -> Transition<Self, AdEffect> {
        if !self.requests.settle(ticket) {
            return Transition::idle(self);
        }
        self.generate_form.finish();
        match result {
            Ok(ad) => {
                log::info!("ad {} generated for company {}", ad.id, ad.company_id);
                self.ads.prepend(ad);
                self.ad_draft = AdDraft::default();
            }
            Err(err) => {
                log::error!("ad generation failed: {}", err);
                self.error = Some(err.into());
            }
        }
        Transition::idle(self)
    }
}

fn edit<D: Draft>(draft: &mut D, error: &mut Option<ViewError>, field: &str, value: &str) {
    match draft.with_field(field, value) {
        Ok(next) => *draft = next,
        Err(err) => *error = Some(err.into()),
    }
}

#[async_trait]
impl StudioModel for AdStudio {
    type Action = AdAction;
    type Effect = AdEffect;

    fn reduce(mut self, action: AdAction) -> Transition<Self, AdEffect> {
        match action {
            AdAction::LoadCompanies => self.load_companies(),
            AdAction::CompaniesLoaded(ticket, result) => self.companies_loaded(ticket, result),
            AdAction::Navigate(view) => {
                if view.needs_selection() && self.selected_company().is_none() {
                    return Transition::idle(self);
                }
                self.view = view;
                Transition::idle(self)
            }
            AdAction::EditCompany { field, value } => {
                edit(&mut self.company_draft, &mut self.error, &field, &value);
                Transition::idle(self)
            }
            AdAction::SubmitCompany => self.submit_company(),
            AdAction::CompanyCreated(ticket, result) => self.company_created(ticket, result),
            AdAction::SelectCompany(id) => self.select_company(id),
            AdAction::AdsLoaded(ticket, result) => self.ads_loaded(ticket, result),
            AdAction::EditAd { field, value } => {
                edit(&mut self.ad_draft, &mut self.error, &field, &value);
                Transition::idle(self)
            }
            AdAction::GenerateAd => self.generate_ad(),
            AdAction::AdGenerated(ticket, result) => self.ad_generated(ticket, result),
            AdAction::DismissError => {
                self.error = None;
                Transition::idle(self)
            }
        }
    }

    fn ticket(effect: &AdEffect) -> RequestTicket {
        match effect {
            AdEffect::LoadCompanies(ticket)
            | AdEffect::CreateCompany(ticket, _)
            | AdEffect::LoadAds(ticket, _)
            | AdEffect::GenerateAd(ticket, _) => *ticket,
        }
    }

    fn failed(effect: AdEffect, error: StudioError) -> AdAction {
        match effect {
            AdEffect::LoadCompanies(ticket) => AdAction::CompaniesLoaded(ticket, Err(error)),
            AdEffect::CreateCompany(ticket, _) => AdAction::CompanyCreated(ticket, Err(error)),
            AdEffect::LoadAds(ticket, _) => AdAction::AdsLoaded(ticket, Err(error)),
            AdEffect::GenerateAd(ticket, _) => AdAction::AdGenerated(ticket, Err(error)),
        }
    }

    async fn perform(backend: &dyn Backend, effect: AdEffect) -> AdAction {
        match effect {
            AdEffect::LoadCompanies(ticket) => {
                AdAction::CompaniesLoaded(ticket, backend.list_companies().await)
            }
            AdEffect::CreateCompany(ticket, body) => {
                AdAction::CompanyCreated(ticket, backend.create_company(body).await)
            }
            AdEffect::LoadAds(ticket, company_id) => {
                AdAction::AdsLoaded(ticket, backend.list_ads(&company_id).await)
            }
            AdEffect::GenerateAd(ticket, request) => {
                AdAction::AdGenerated(ticket, backend.generate_ad(request).await)
            }
        }
    }
}
