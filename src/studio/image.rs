use super::{StudioModel, Transition};
use crate::{
    error::{Result, StudioError},
    gateway::Backend,
    models::{DeleteReceipt, GeneratedImage, ImageHistory, ImageRequest},
    state::{
        Collection, Draft, ImagePromptDraft, Pending, RequestTicket, RequestTracker, Resource,
        ViewError,
    },
};
use async_trait::async_trait;
use serde::Serialize;

const LOAD_HISTORY_FAILED: &str = "Failed to load image history";
const CLEAR_HISTORY_FAILED: &str = "Failed to clear image history";
const DELETE_IMAGE_FAILED: &str = "Failed to delete image";

/// State of the prompt-to-image app.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageStudio {
    pub images: Collection<GeneratedImage>,
    /// Total reported by the backend, which may exceed `images.len()`.
    pub total: u64,
    /// Page size for history loads; the backend defaults to 50 when unset.
    pub history_limit: Option<u32>,
    pub current_image: Option<String>,
    pub draft: ImagePromptDraft,
    pub history_visible: bool,
    pub confirming_clear: bool,
    pub generate_form: Pending,
    pub error: Option<ViewError>,
    requests: RequestTracker,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageAction {
    LoadHistory,
    HistoryLoaded(RequestTicket, Result<ImageHistory>),
    ToggleHistory,
    EditPrompt { field: String, value: String },
    UseExample(usize),
    Generate,
    ImageGenerated(RequestTicket, Result<GeneratedImage>),
    SelectImage(String),
    RefreshImage(String),
    ImageFetched(RequestTicket, Result<GeneratedImage>),
    DeleteImage(String),
    ImageDeleted(RequestTicket, String, Result<DeleteReceipt>),
    RequestClear,
    CancelClear,
    ConfirmClear,
    HistoryCleared(RequestTicket, Result<DeleteReceipt>),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageEffect {
    LoadHistory(RequestTicket, Option<u32>),
    Generate(RequestTicket, ImageRequest),
    FetchImage(RequestTicket, String),
    DeleteImage(RequestTicket, String),
    ClearHistory(RequestTicket),
}

impl ImageStudio {
    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// The image on display, resolved from the history list.
    pub fn current_image(&self) -> Option<&GeneratedImage> {
        self.current_image
            .as_deref()
            .and_then(|id| self.images.get(id))
    }

    pub fn generate_label(&self) -> &'static str {
        self.generate_form.label("Generate Image", "Generating...")
    }

    fn load_history(mut self) -> Transition<Self, ImageEffect> {
        let ticket = self.requests.issue(Resource::Images);
        let limit = self.history_limit;
        Transition::with_effect(self, ImageEffect::LoadHistory(ticket, limit))
    }

    fn history_loaded(
        mut self,
        ticket: RequestTicket,
        result: Result<ImageHistory>,
    ) -> Transition<Self, ImageEffect> {
        if !self.requests.settle(ticket) {
            return Transition::idle(self);
        }
        match result {
            Ok(history) => {
                log::debug!("loaded {} of {} images", history.images.len(), history.total);
                self.total = history.total.max(history.images.len() as u64);
                self.images.replace_all(history.images);
                if let Some(id) = &self.current_image {
                    if !self.images.contains(id) {
                        self.current_image = None;
                    }
                }
            }
            Err(err) => {
                log::error!("{}: {}", LOAD_HISTORY_FAILED, err);
                self.error = Some(ViewError::with_message(&err, LOAD_HISTORY_FAILED));
            }
        }
        Transition::idle(self)
    }

    fn generate(mut self) -> Transition<Self, ImageEffect> {
        if let Err(err) = self.draft.validate() {
            self.error = Some(err.into());
            return Transition::idle(self);
        }
        if !self.generate_form.begin() {
            return Transition::idle(self);
        }
        self.error = None;
        let ticket = self.requests.issue(Resource::GenerateImage);
        let request = self.draft.to_request();
        Transition::with_effect(self, ImageEffect::Generate(ticket, request))
    }

    fn image_generated(
        mut self,
        ticket: RequestTicket,
        result: Result<GeneratedImage>,
    ) -> Transition<Self, ImageEffect> {
        if !self.requests.settle(ticket) {
            return Transition::idle(self);
        }
        self.generate_form.finish();
        match result {
            Ok(image) => {
                log::info!("image {} generated", image.id);
                self.current_image = Some(image.id.clone());
                // A history load may already have brought this image in.
                if self.images.prepend(image) {
                    self.total += 1;
                }
                self.draft = ImagePromptDraft::default();
            }
            Err(err) => {
                log::error!("image generation failed: {}", err);
                self.error = Some(err.into());
            }
        }
        Transition::idle(self)
    }

    fn image_fetched(
        mut self,
        ticket: RequestTicket,
        result: Result<GeneratedImage>,
    ) -> Transition<Self, ImageEffect> {
        if !self.requests.settle(ticket) {
            return Transition::idle(self);
        }
        match result {
            Ok(image) => {
                if !self.images.replace(image) {
                    log::debug!("refreshed image is no longer in the history");
                }
            }
            Err(err) => {
                log::warn!("could not refresh image: {}", err);
                self.error = Some(err.into());
            }
        }
        Transition::idle(self)
    }

    fn image_deleted(
        mut self,
        ticket: RequestTicket,
        image_id: String,
        result: Result<DeleteReceipt>,
    ) -> Transition<Self, ImageEffect> {
        // Deletes never supersede each other, so the outcome always applies.
        self.requests.settle(ticket);
        match result {
            Ok(_) => {
                if self.images.remove(&image_id).is_some() {
                    self.total = self.total.saturating_sub(1);
                }
                if self.current_image.as_deref() == Some(image_id.as_str()) {
                    self.current_image = None;
                }
            }
            Err(err) => {
                log::error!("{} {}: {}", DELETE_IMAGE_FAILED, image_id, err);
                self.error = Some(ViewError::with_message(&err, DELETE_IMAGE_FAILED));
            }
        }
        Transition::idle(self)
    }

    fn confirm_clear(mut self) -> Transition<Self, ImageEffect> {
        if !self.confirming_clear {
            return Transition::idle(self);
        }
        self.confirming_clear = false;
        // Loads or refreshes finishing after the clear would resurrect entries.
        self.requests.invalidate(Resource::Images);
        self.requests.invalidate(Resource::ImageDetail);
        let ticket = self.requests.issue(Resource::ClearImages);
        Transition::with_effect(self, ImageEffect::ClearHistory(ticket))
    }

    /// The local list is emptied whether or not the DELETE succeeded; a
    /// failure is still reported.
    fn history_cleared(
        mut self,
        ticket: RequestTicket,
        result: Result<DeleteReceipt>,
    ) -> Transition<Self, ImageEffect> {
        if !self.requests.settle(ticket) {
            return Transition::idle(self);
        }
        self.images.clear();
        self.total = 0;
        self.current_image = None;
        match result {
            Ok(receipt) => {
                log::info!(
                    "image history cleared: {}",
                    receipt.message.as_deref().unwrap_or("ok")
                );
                self.error = None;
            }
            Err(err) => {
                log::error!("{}: {}", CLEAR_HISTORY_FAILED, err);
                self.error = Some(ViewError::with_message(&err, CLEAR_HISTORY_FAILED));
            }
        }
        Transition::idle(self)
    }
}

#[async_trait]
impl StudioModel for ImageStudio {
    type Action = ImageAction;
    type Effect = ImageEffect;

    fn reduce(mut self, action: ImageAction) -> Transition<Self, ImageEffect> {
        match action {
            ImageAction::LoadHistory => self.load_history(),
            ImageAction::HistoryLoaded(ticket, result) => self.history_loaded(ticket, result),
            ImageAction::ToggleHistory => {
                self.history_visible = !self.history_visible;
                Transition::idle(self)
            }
            ImageAction::EditPrompt { field, value } => {
                match self.draft.with_field(&field, &value) {
                    Ok(draft) => self.draft = draft,
                    Err(err) => self.error = Some(err.into()),
                }
                Transition::idle(self)
            }
            ImageAction::UseExample(index) => {
                match self.draft.with_example(index) {
                    Ok(draft) => self.draft = draft,
                    Err(err) => self.error = Some(err.into()),
                }
                Transition::idle(self)
            }
            ImageAction::Generate => self.generate(),
            ImageAction::ImageGenerated(ticket, result) => self.image_generated(ticket, result),
            ImageAction::SelectImage(id) => {
                if self.images.contains(&id) {
                    self.current_image = Some(id);
                }
                Transition::idle(self)
            }
            ImageAction::RefreshImage(id) => {
                let ticket = self.requests.issue(Resource::ImageDetail);
                Transition::with_effect(self, ImageEffect::FetchImage(ticket, id))
            }
            ImageAction::ImageFetched(ticket, result) => self.image_fetched(ticket, result),
            ImageAction::DeleteImage(id) => {
                let ticket = self.requests.issue(Resource::DeleteImage);
                Transition::with_effect(self, ImageEffect::DeleteImage(ticket, id))
            }
            ImageAction::ImageDeleted(ticket, id, result) => self.image_deleted(ticket, id, result),
            ImageAction::RequestClear => {
                if !self.images.is_empty() {
                    self.confirming_clear = true;
                }
                Transition::idle(self)
            }
            ImageAction::CancelClear => {
                self.confirming_clear = false;
                Transition::idle(self)
            }
            ImageAction::ConfirmClear => self.confirm_clear(),
            ImageAction::HistoryCleared(ticket, result) => self.history_cleared(ticket, result),
            ImageAction::DismissError => {
                self.error = None;
                Transition::idle(self)
            }
        }
    }

    fn ticket(effect: &ImageEffect) -> RequestTicket {
        match effect {
            ImageEffect::LoadHistory(ticket, _)
            | ImageEffect::Generate(ticket, _)
            | ImageEffect::FetchImage(ticket, _)
            | ImageEffect::DeleteImage(ticket, _)
            | ImageEffect::ClearHistory(ticket) => *ticket,
        }
    }

    fn failed(effect: ImageEffect, error: StudioError) -> ImageAction {
        match effect {
            ImageEffect::LoadHistory(ticket, _) => ImageAction::HistoryLoaded(ticket, Err(error)),
            ImageEffect::Generate(ticket, _) => ImageAction::ImageGenerated(ticket, Err(error)),
            ImageEffect::FetchImage(ticket, _) => ImageAction::ImageFetched(ticket, Err(error)),
            ImageEffect::DeleteImage(ticket, id) => {
                ImageAction::ImageDeleted(ticket, id, Err(error))
            }
            ImageEffect::ClearHistory(ticket) => ImageAction::HistoryCleared(ticket, Err(error)),
        }
    }

    async fn perform(backend: &dyn Backend, effect: ImageEffect) -> ImageAction {
        match effect {
            ImageEffect::LoadHistory(ticket, limit) => {
                ImageAction::HistoryLoaded(ticket, backend.list_images(limit).await)
            }
            ImageEffect::Generate(ticket, request) => {
                ImageAction::ImageGenerated(ticket, backend.generate_image(request).await)
            }
            ImageEffect::FetchImage(ticket, id) => {
                ImageAction::ImageFetched(ticket, backend.get_image(&id).await)
            }
            ImageEffect::DeleteImage(ticket, id) => {
                let result = backend.delete_image(&id).await;
                ImageAction::ImageDeleted(ticket, id, result)
            }
            ImageEffect::ClearHistory(ticket) => {
                ImageAction::HistoryCleared(ticket, backend.clear_images().await)
            }
        }
    }
}
