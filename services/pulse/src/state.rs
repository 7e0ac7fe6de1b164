use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::PulseSettings;
use crate::infra::db::{
    DbAnnouncementRepository, DbConfigRepository, DbDailyLogRepository, DbFieldRepository,
    DbResourceRepository, DbTaskRepository, DbUserRepository, DbVisitorLogRepository,
};
use crate::infra::feed::ChangeFeed;
use crate::infra::http::{HttpAnalysisService, HttpIpLookup, HttpLogMirror};
use crate::infra::identity::HttpIdentityGateway;
use crate::usecase::optimistic::TaskStatusView;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
    pub http: reqwest::Client,
    pub identity: HttpIdentityGateway,
    pub settings: Arc<PulseSettings>,
    pub task_view: TaskStatusView,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
            feed: self.feed.clone(),
        }
    }

    pub fn field_repo(&self) -> DbFieldRepository {
        DbFieldRepository {
            db: self.db.clone(),
            feed: self.feed.clone(),
        }
    }

    pub fn daily_log_repo(&self) -> DbDailyLogRepository {
        DbDailyLogRepository {
            db: self.db.clone(),
            feed: self.feed.clone(),
        }
    }

    pub fn task_repo(&self) -> DbTaskRepository {
        DbTaskRepository {
            db: self.db.clone(),
            feed: self.feed.clone(),
        }
    }

    pub fn announcement_repo(&self) -> DbAnnouncementRepository {
        DbAnnouncementRepository {
            db: self.db.clone(),
            feed: self.feed.clone(),
        }
    }

    pub fn resource_repo(&self) -> DbResourceRepository {
        DbResourceRepository {
            db: self.db.clone(),
            feed: self.feed.clone(),
        }
    }

    pub fn visitor_repo(&self) -> DbVisitorLogRepository {
        DbVisitorLogRepository {
            db: self.db.clone(),
            feed: self.feed.clone(),
        }
    }

    pub fn config_repo(&self) -> DbConfigRepository {
        DbConfigRepository {
            db: self.db.clone(),
            feed: self.feed.clone(),
        }
    }

    pub fn log_mirror(&self) -> HttpLogMirror {
        HttpLogMirror {
            client: self.http.clone(),
        }
    }

    pub fn ip_lookup(&self) -> HttpIpLookup {
        HttpIpLookup {
            client: self.http.clone(),
            url: self.settings.ip_lookup_url.clone(),
        }
    }

    pub fn analysis(&self) -> HttpAnalysisService {
        HttpAnalysisService {
            client: self.http.clone(),
            url: self.settings.analysis_url.clone(),
        }
    }
}
