use chrono::{DateTime, Utc};

use crate::domain::repository::AnnouncementRepository;
use crate::domain::types::Announcement;
use crate::error::PulseServiceError;

pub struct BroadcastUseCase<A: AnnouncementRepository> {
    pub repo: A,
}

impl<A: AnnouncementRepository> BroadcastUseCase<A> {
    /// Replace the announcement. Last write wins; no history is kept.
    pub async fn execute(
        &self,
        message: &str,
        updated_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Announcement, PulseServiceError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(PulseServiceError::EmptyAnnouncement);
        }
        let announcement = Announcement {
            message: message.to_owned(),
            updated_at: now,
            updated_by: updated_by.to_owned(),
        };
        self.repo.put(&announcement).await?;
        Ok(announcement)
    }
}

pub struct GetAnnouncementUseCase<A: AnnouncementRepository> {
    pub repo: A,
}

impl<A: AnnouncementRepository> GetAnnouncementUseCase<A> {
    pub async fn execute(&self) -> Result<Announcement, PulseServiceError> {
        self.repo
            .latest()
            .await?
            .ok_or(PulseServiceError::AnnouncementNotFound)
    }
}
