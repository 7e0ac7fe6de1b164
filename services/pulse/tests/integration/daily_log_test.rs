use chrono::Utc;
use serde_json::{Map, Value, json};

use leadtrack_domain::role::UserRole;
use leadtrack_pulse::domain::types::DailyLogMode;
use leadtrack_pulse::usecase::daily_log::{
    MirrorDailyLogUseCase, SubmitDailyLogInput, SubmitDailyLogUseCase,
};
use leadtrack_pulse_schema::app_config::SHEET_WEBHOOK_URL;

use crate::helpers::{
    MockConfigRepo, MockDailyLogRepo, MockMirror, at, daily_log, day, schema, test_user,
};

fn values(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(map) => map,
        _ => panic!("values must be an object"),
    }
}

fn input(hour: u32, v: Value, notes: Option<&str>) -> SubmitDailyLogInput {
    let date = day(2024, 3, 4);
    SubmitDailyLogInput {
        employee_id: "uid-ana".into(),
        date,
        timestamp: at(date, hour),
        values: values(v),
        notes: notes.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_coerce_values_against_schema() {
    let repo = MockDailyLogRepo::empty();
    let uc = SubmitDailyLogUseCase {
        repo,
        mode: DailyLogMode::Upsert,
    };
    let schema = schema(&["calls", "coldEmails", "meetings", "followUps"]);

    let log = uc
        .execute(
            &schema,
            input(
                17,
                json!({
                    "calls": "12",
                    "coldEmails": 4.5,
                    "meetings": "abc",
                    "legacy": 99,
                }),
                Some("   "),
            ),
        )
        .await
        .unwrap();

    assert_eq!(log.metrics.len(), 4);
    assert_eq!(log.metrics["calls"], 12.0);
    assert_eq!(log.metrics["coldEmails"], 4.5);
    assert_eq!(log.metrics["meetings"], 0.0);
    assert_eq!(log.metrics["followUps"], 0.0);
    assert!(!log.metrics.contains_key("legacy"));
    assert_eq!(log.notes, None);
}

#[tokio::test]
async fn should_replace_same_day_log_in_upsert_mode() {
    let repo = MockDailyLogRepo::empty();
    let logs = repo.logs.clone();
    let uc = SubmitDailyLogUseCase {
        repo,
        mode: DailyLogMode::Upsert,
    };
    let schema = schema(&["calls"]);

    uc.execute(&schema, input(10, json!({"calls": 3}), None)).await.unwrap();
    uc.execute(&schema, input(17, json!({"calls": 8}), Some("late push")))
        .await
        .unwrap();

    let logs = logs.lock().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, "uid-ana_2024-03-04");
    assert_eq!(logs[0].metrics["calls"], 8.0);
    assert_eq!(logs[0].notes.as_deref(), Some("late push"));
}

#[tokio::test]
async fn should_keep_every_submission_in_append_mode() {
    let repo = MockDailyLogRepo::empty();
    let logs = repo.logs.clone();
    let uc = SubmitDailyLogUseCase {
        repo,
        mode: DailyLogMode::Append,
    };
    let schema = schema(&["calls"]);

    uc.execute(&schema, input(10, json!({"calls": 3}), None)).await.unwrap();
    uc.execute(&schema, input(17, json!({"calls": 8}), None)).await.unwrap();

    let logs = logs.lock().unwrap();
    assert_eq!(logs.len(), 2);
    assert_ne!(logs[0].id, logs[1].id);
}

#[tokio::test]
async fn should_mirror_log_when_webhook_configured() {
    let mirror = MockMirror::default();
    let sent = mirror.sent.clone();
    let uc = MirrorDailyLogUseCase {
        config: MockConfigRepo::with(SHEET_WEBHOOK_URL, "https://sheets.example.com/hook"),
        mirror,
    };
    let ana = test_user("uid-ana", UserRole::Employee);
    let log = daily_log("uid-ana", day(2024, 3, 4), &[("calls", 5.0)]);

    assert!(uc.execute(&log, &ana).await);

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "https://sheets.example.com/hook");
    assert_eq!(sent[0].1["calls"], 5.0);
    assert_eq!(sent[0].1["employeeEmail"], "uid-ana@example.com");
}

#[tokio::test]
async fn should_skip_mirror_without_webhook() {
    let mirror = MockMirror::default();
    let sent = mirror.sent.clone();
    let uc = MirrorDailyLogUseCase {
        config: MockConfigRepo::default(),
        mirror,
    };
    let log = daily_log("uid-ana", day(2024, 3, 4), &[]);

    assert!(!uc.execute(&log, &test_user("uid-ana", UserRole::Employee)).await);
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_swallow_mirror_failure() {
    let uc = MirrorDailyLogUseCase {
        config: MockConfigRepo::with(SHEET_WEBHOOK_URL, "https://sheets.example.com/hook"),
        mirror: MockMirror {
            fail: true,
            ..MockMirror::default()
        },
    };
    let mut log = daily_log("uid-ana", day(2024, 3, 4), &[]);
    log.timestamp = Utc::now();

    assert!(!uc.execute(&log, &test_user("uid-ana", UserRole::Employee)).await);
}
