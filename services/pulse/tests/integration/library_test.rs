use chrono::{Duration, Utc};
use uuid::Uuid;

use leadtrack_pulse::error::PulseServiceError;
use leadtrack_pulse::usecase::announcement::{BroadcastUseCase, GetAnnouncementUseCase};
use leadtrack_pulse::usecase::resource::{
    AddResourceInput, AddResourceUseCase, DeleteResourceUseCase, ListResourcesUseCase,
    SeedResourcesUseCase,
};
use leadtrack_pulse::usecase::settings::{GetWebhookUseCase, SetWebhookUseCase};

use crate::helpers::{MockAnnouncementRepo, MockConfigRepo, MockResourceRepo};

// ── Announcement ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_overwrite_announcement_on_broadcast() {
    let repo = MockAnnouncementRepo::default();
    let broadcast = BroadcastUseCase { repo: repo.clone() };
    let get = GetAnnouncementUseCase { repo };

    let missing = get.execute().await;
    assert!(matches!(missing, Err(PulseServiceError::AnnouncementNotFound)));

    let now = Utc::now();
    broadcast.execute("Team call at 4", "Admin", now).await.unwrap();
    broadcast
        .execute("  Team call moved to 5 ", "Dana", now + Duration::minutes(1))
        .await
        .unwrap();

    let latest = get.execute().await.unwrap();
    assert_eq!(latest.message, "Team call moved to 5");
    assert_eq!(latest.updated_by, "Dana");
}

#[tokio::test]
async fn should_reject_blank_announcement() {
    let repo = MockAnnouncementRepo::default();
    let uc = BroadcastUseCase { repo: repo.clone() };

    let result = uc.execute(" \n ", "Admin", Utc::now()).await;

    assert!(matches!(result, Err(PulseServiceError::EmptyAnnouncement)));
    assert!(repo.latest.lock().unwrap().is_none());
}

// ── Resources ────────────────────────────────────────────────────────────────

fn resource_input(category: &str, custom: Option<&str>, content: &str) -> AddResourceInput {
    AddResourceInput {
        category: category.to_owned(),
        custom_category: custom.map(str::to_owned),
        title: "Opening lines".to_owned(),
        content: content.to_owned(),
    }
}

#[tokio::test]
async fn should_add_resource_under_custom_category() {
    let repo = MockResourceRepo::empty();
    let add = AddResourceUseCase { repo: repo.clone() };
    let list = ListResourcesUseCase { repo };

    add.execute(
        resource_input("Other", Some("Playbooks"), "Start with a question."),
        Utc::now(),
    )
    .await
    .unwrap();

    let groups = list.execute().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].category, "Playbooks");
}

#[tokio::test]
async fn should_reject_short_content_and_missing_custom_category() {
    let uc = AddResourceUseCase {
        repo: MockResourceRepo::empty(),
    };

    let short = uc
        .execute(resource_input("Scripts", None, "too short"), Utc::now())
        .await;
    assert!(matches!(short, Err(PulseServiceError::InvalidResource(_))));

    let other = uc
        .execute(resource_input("Other", Some(" "), "Long enough content"), Utc::now())
        .await;
    assert!(matches!(other, Err(PulseServiceError::InvalidResource(_))));
}

#[tokio::test]
async fn should_seed_only_an_empty_library() {
    let repo = MockResourceRepo::empty();
    let seed = SeedResourcesUseCase { repo: repo.clone() };

    let first = seed.execute(Utc::now()).await.unwrap();
    let second = seed.execute(Utc::now()).await.unwrap();

    assert_eq!(first, 9);
    assert_eq!(second, 0);

    let groups = ListResourcesUseCase { repo }.execute().await.unwrap();
    let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(
        categories,
        vec![
            "Email Templates",
            "Lead Generation Tools & Links",
            "Scripts",
            "Training & Tutorials",
            "Motivation & Guidelines",
        ]
    );
}

#[tokio::test]
async fn should_report_deleting_missing_resource() {
    let uc = DeleteResourceUseCase {
        repo: MockResourceRepo::empty(),
    };
    let result = uc.execute(Uuid::now_v7()).await;
    assert!(matches!(result, Err(PulseServiceError::ResourceNotFound)));
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_valid_webhook_url() {
    let config = MockConfigRepo::default();
    let set = SetWebhookUseCase {
        config: config.clone(),
    };
    let get = GetWebhookUseCase { config };

    assert_eq!(get.execute().await.unwrap(), None);
    let stored = set.execute(" https://sheets.example.com/hook ").await.unwrap();
    assert_eq!(stored, "https://sheets.example.com/hook");
    assert_eq!(get.execute().await.unwrap().as_deref(), Some(stored.as_str()));

    let invalid = set.execute("ftp://example.com").await;
    assert!(matches!(invalid, Err(PulseServiceError::InvalidWebhookUrl)));
}
