use serde::Serialize;
use std::collections::HashMap;

/// Logical resources a request can target. Exclusive resources have at most
/// one current request at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Companies,
    CreateCompany,
    Ads,
    GenerateAd,
    Images,
    ImageDetail,
    GenerateImage,
    DeleteImage,
    ClearImages,
}

impl Resource {
    /// Exclusive resources allow one live request; a new one supersedes the
    /// old. Per-image deletes and refreshes target different images and must
    /// all run to completion.
    pub fn is_exclusive(&self) -> bool {
        !matches!(self, Resource::DeleteImage | Resource::ImageDetail)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestTicket {
    pub resource: Resource,
    pub generation: u64,
}

/// Hands out tickets and remembers which ones are still current per resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestTracker {
    next_generation: u64,
    current: HashMap<Resource, Vec<u64>>,
}

impl RequestTracker {
    /// Issues a ticket. For exclusive resources every earlier ticket becomes
    /// stale; otherwise earlier tickets stay current alongside it.
    pub fn issue(&mut self, resource: Resource) -> RequestTicket {
        self.next_generation += 1;
        let live = self.current.entry(resource).or_default();
        if resource.is_exclusive() {
            live.clear();
        }
        live.push(self.next_generation);
        RequestTicket {
            resource,
            generation: self.next_generation,
        }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.current
            .get(&ticket.resource)
            .map_or(false, |live| live.contains(&ticket.generation))
    }

    /// Consumes a completed ticket. Returns false for stale tickets, whose
    /// results must be dropped.
    pub fn settle(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "dropping stale {:?} response (generation {})",
                ticket.resource,
                ticket.generation
            );
            return false;
        }
        if let Some(live) = self.current.get_mut(&ticket.resource) {
            live.retain(|generation| *generation != ticket.generation);
            if live.is_empty() {
                self.current.remove(&ticket.resource);
            }
        }
        true
    }

    /// Makes every outstanding request for `resource` stale without issuing a new one.
    pub fn invalidate(&mut self, resource: Resource) {
        self.current.remove(&resource);
    }

    pub fn is_outstanding(&self, resource: Resource) -> bool {
        self.current.contains_key(&resource)
    }
}
