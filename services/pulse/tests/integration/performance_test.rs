use leadtrack_domain::role::UserRole;
use leadtrack_pulse::domain::schema::MetricCell;
use leadtrack_pulse::error::PulseServiceError;
use leadtrack_pulse::usecase::performance::{
    LatestPerformanceUseCase, LeaderboardUseCase, WeeklySeriesUseCase,
};

use crate::helpers::{MockDailyLogRepo, at, daily_log, day, schema, test_user};

#[tokio::test]
async fn should_return_last_seven_logs_in_chronological_order() {
    let logs = (1..=9)
        .map(|d| daily_log("uid-ana", day(2024, 3, d), &[("calls", f64::from(d))]))
        .collect();
    let uc = WeeklySeriesUseCase {
        repo: MockDailyLogRepo::new(logs),
    };

    let points = uc.execute(&schema(&["calls", "meetings"]), "uid-ana").await.unwrap();

    let dates: Vec<u32> = points
        .iter()
        .map(|p| p.date.format("%d").to_string().parse().unwrap())
        .collect();
    assert_eq!(dates, vec![3, 4, 5, 6, 7, 8, 9]);
    // 2024-03-04 is a Monday.
    assert_eq!(points[1].day, "Mon");
    assert_eq!(points[0].values["calls"], 3.0);
    assert_eq!(points[0].values["meetings"], 0.0);
}

#[tokio::test]
async fn should_prefer_latest_timestamp_on_same_date() {
    let date = day(2024, 3, 4);
    let mut morning = daily_log("uid-ana", date, &[("calls", 1.0)]);
    morning.id = "a".into();
    morning.timestamp = at(date, 9);
    let mut evening = daily_log("uid-ana", date, &[("calls", 7.0)]);
    evening.id = "b".into();
    evening.timestamp = at(date, 20);
    let uc = LatestPerformanceUseCase {
        repo: MockDailyLogRepo::new(vec![evening, morning]),
    };

    let rows = uc
        .execute(&schema(&["calls"]), vec![test_user("uid-ana", UserRole::Employee)])
        .await
        .unwrap();

    assert_eq!(rows[0].cells, vec![MetricCell::Value(7.0)]);
}

#[tokio::test]
async fn should_mark_missing_values_not_available() {
    let logs = vec![
        daily_log("uid-ana", day(2024, 3, 4), &[("calls", 5.0), ("legacy", 40.0)]),
        daily_log("uid-ana", day(2024, 3, 1), &[("meetings", 2.0)]),
    ];
    let uc = LatestPerformanceUseCase {
        repo: MockDailyLogRepo::new(logs),
    };
    let employees = vec![
        test_user("uid-ana", UserRole::Employee),
        test_user("uid-bo", UserRole::Employee),
    ];

    let rows = uc
        .execute(&schema(&["calls", "meetings"]), employees)
        .await
        .unwrap();

    // Only the latest log counts; older values do not fill gaps.
    assert_eq!(
        rows[0].cells,
        vec![MetricCell::Value(5.0), MetricCell::NotAvailable]
    );
    assert_eq!(
        rows[1].cells,
        vec![MetricCell::NotAvailable, MetricCell::NotAvailable]
    );
    assert_eq!(serde_json::to_value(&rows[1].cells).unwrap(), serde_json::json!(["N/A", "N/A"]));
}

#[tokio::test]
async fn should_rank_leaderboard_with_not_available_last() {
    let logs = vec![
        daily_log("uid-ana", day(2024, 3, 4), &[("calls", 5.0), ("meetings", 1.0)]),
        daily_log("uid-bo", day(2024, 3, 4), &[("calls", 9.0), ("meetings", 3.0)]),
    ];
    let uc = LeaderboardUseCase {
        repo: MockDailyLogRepo::new(logs),
    };
    let employees = vec![
        test_user("uid-ana", UserRole::Employee),
        test_user("uid-bo", UserRole::Employee),
        test_user("uid-cy", UserRole::Employee),
    ];
    let schema = schema(&["calls", "meetings"]);

    let board = uc
        .execute(&schema, employees.clone(), Some("calls"))
        .await
        .unwrap();
    let order: Vec<(&str, usize)> = board
        .entries
        .iter()
        .map(|e| (e.employee.id.as_str(), e.rank))
        .collect();
    assert_eq!(order, vec![("uid-bo", 1), ("uid-ana", 2), ("uid-cy", 3)]);
    assert_eq!(board.entries[2].value, MetricCell::NotAvailable);

    let default_board = uc.execute(&schema, employees.clone(), None).await.unwrap();
    assert_eq!(default_board.field.as_deref(), Some("meetings"));

    let unknown = uc.execute(&schema, employees, Some("legacy")).await;
    assert!(matches!(unknown, Err(PulseServiceError::InvalidField(_))));
}

#[tokio::test]
async fn should_return_empty_board_for_empty_schema() {
    let uc = LeaderboardUseCase {
        repo: MockDailyLogRepo::empty(),
    };
    let employees = vec![test_user("uid-ana", UserRole::Employee)];

    let board = uc.execute(&schema(&[]), employees, None).await.unwrap();

    assert_eq!(board.field, None);
    assert!(board.entries.is_empty());
}
