use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::repository::ResourceRepository;
use crate::domain::types::{Resource, ResourceGroup};
use crate::error::PulseServiceError;

/// Category that must be replaced by a custom one.
pub const OTHER_CATEGORY: &str = "Other";
pub const MIN_CONTENT_LEN: usize = 10;

// ── AddResource ──────────────────────────────────────────────────────────────

pub struct AddResourceInput {
    pub category: String,
    pub custom_category: Option<String>,
    pub title: String,
    pub content: String,
}

pub struct AddResourceUseCase<R: ResourceRepository> {
    pub repo: R,
}

impl<R: ResourceRepository> AddResourceUseCase<R> {
    pub async fn execute(
        &self,
        input: AddResourceInput,
        now: DateTime<Utc>,
    ) -> Result<Resource, PulseServiceError> {
        let category = resolve_category(&input.category, input.custom_category.as_deref())?;
        let title = input.title.trim();
        if title.is_empty() {
            return Err(PulseServiceError::InvalidResource("title is required".into()));
        }
        let content = input.content.trim();
        if content.chars().count() < MIN_CONTENT_LEN {
            return Err(PulseServiceError::InvalidResource(format!(
                "content must be at least {MIN_CONTENT_LEN} characters"
            )));
        }
        let resource = Resource {
            id: Uuid::now_v7(),
            category,
            title: title.to_owned(),
            content: content.to_owned(),
            created_at: now,
        };
        self.repo.create(&resource).await?;
        Ok(resource)
    }
}

fn resolve_category(category: &str, custom: Option<&str>) -> Result<String, PulseServiceError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(PulseServiceError::InvalidResource("category is required".into()));
    }
    if category != OTHER_CATEGORY {
        return Ok(category.to_owned());
    }
    match custom.map(str::trim).filter(|c| !c.is_empty()) {
        Some(custom) => Ok(custom.to_owned()),
        None => Err(PulseServiceError::InvalidResource(
            "custom category is required for Other".into(),
        )),
    }
}

// ── ListResources ────────────────────────────────────────────────────────────

pub struct ListResourcesUseCase<R: ResourceRepository> {
    pub repo: R,
}

impl<R: ResourceRepository> ListResourcesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<ResourceGroup>, PulseServiceError> {
        Ok(group_by_category(self.repo.list().await?))
    }
}

/// Group resources by category; groups appear in first-seen order.
pub fn group_by_category(resources: Vec<Resource>) -> Vec<ResourceGroup> {
    let mut groups: Vec<ResourceGroup> = Vec::new();
    for resource in resources {
        match groups.iter_mut().find(|g| g.category == resource.category) {
            Some(group) => group.resources.push(resource),
            None => groups.push(ResourceGroup {
                category: resource.category.clone(),
                resources: vec![resource],
            }),
        }
    }
    groups
}

// ── DeleteResource ───────────────────────────────────────────────────────────

pub struct DeleteResourceUseCase<R: ResourceRepository> {
    pub repo: R,
}

impl<R: ResourceRepository> DeleteResourceUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), PulseServiceError> {
        if !self.repo.delete(id).await? {
            return Err(PulseServiceError::ResourceNotFound);
        }
        Ok(())
    }
}

// ── SeedResources ────────────────────────────────────────────────────────────

const STARTER_LIBRARY: &[(&str, &str, &str)] = &[
    ("Email Templates", "Cold Outreach", "Hi [Name], I saw..."),
    ("Email Templates", "Follow-up Emails", "Hi [Name], just following up on..."),
    ("Email Templates", "Meeting Request", "Hi [Name], are you available for a brief chat..."),
    ("Lead Generation Tools & Links", "Apollo.io free sign-up link", "https://www.apollo.io/"),
    ("Lead Generation Tools & Links", "Hunter.io free email extractor link", "https://hunter.io/"),
    ("Scripts", "Cold Calling Script", "Hello, am I speaking with [Name]?"),
    ("Scripts", "Demo Pitch Script", "In this demo, I'll walk you through..."),
    ("Training & Tutorials", "How to qualify a lead", "A qualified lead is someone who..."),
    (
        "Motivation & Guidelines",
        "Do's & Don'ts in Client Outreach",
        "DO: Personalize every message. DON'T: Use a generic template without changes.",
    ),
];

/// Populates an empty library with a starter set.
pub struct SeedResourcesUseCase<R: ResourceRepository> {
    pub repo: R,
}

impl<R: ResourceRepository> SeedResourcesUseCase<R> {
    /// Returns how many resources were added; `0` when the library already
    /// had entries.
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<usize, PulseServiceError> {
        let seed = starter_library(now);
        if self.repo.seed_if_empty(&seed).await? {
            tracing::info!(count = seed.len(), "resource library seeded");
            Ok(seed.len())
        } else {
            Ok(0)
        }
    }
}

/// Creation times are staggered so listing keeps the catalogue order.
fn starter_library(now: DateTime<Utc>) -> Vec<Resource> {
    STARTER_LIBRARY
        .iter()
        .zip(0i64..)
        .map(|((category, title, content), i)| Resource {
            id: Uuid::now_v7(),
            category: (*category).to_owned(),
            title: (*title).to_owned(),
            content: (*content).to_owned(),
            created_at: now + Duration::milliseconds(i),
        })
        .collect()
}
