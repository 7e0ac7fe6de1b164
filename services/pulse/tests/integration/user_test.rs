use leadtrack_domain::role::UserRole;
use leadtrack_pulse::error::PulseServiceError;
use leadtrack_pulse::usecase::user::{
    CreateUserInput, CreateUserUseCase, ListEmployeesUseCase, UpdateProfileUseCase,
};

use crate::helpers::{MockGateway, MockUserRepo, test_user};

fn create_input(email: &str, password: &str, name: Option<&str>) -> CreateUserInput {
    CreateUserInput {
        email: email.to_owned(),
        password: password.to_owned(),
        role: UserRole::Employee,
        name: name.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_create_principal_and_record() {
    let repo = MockUserRepo::empty();
    let users = repo.users.clone();
    let gateway = MockGateway::default();
    let uc = CreateUserUseCase {
        repo,
        gateway: gateway.clone(),
    };

    let user = uc
        .execute(create_input(" ana@example.com ", "secret1", None))
        .await
        .unwrap();

    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.name, "ana");
    assert_eq!(user.role, UserRole::Employee);
    assert_eq!(users.lock().unwrap().as_slice(), std::slice::from_ref(&user));
    assert_eq!(gateway.principals.lock().unwrap()[0].0.id, user.id);
}

#[tokio::test]
async fn should_reject_short_password_before_calling_gateway() {
    let gateway = MockGateway::default();
    let uc = CreateUserUseCase {
        repo: MockUserRepo::empty(),
        gateway: gateway.clone(),
    };

    let result = uc.execute(create_input("ana@example.com", "12345", None)).await;

    assert!(matches!(result, Err(PulseServiceError::InvalidUser(_))));
    assert!(gateway.principals.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_taken_email() {
    let gateway = MockGateway::default();
    let uc = CreateUserUseCase {
        repo: MockUserRepo::empty(),
        gateway,
    };
    uc.execute(create_input("ana@example.com", "secret1", Some("Ana")))
        .await
        .unwrap();

    let result = uc
        .execute(create_input("ana@example.com", "secret2", Some("Ana")))
        .await;
    assert!(matches!(result, Err(PulseServiceError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_list_only_employees_by_name() {
    let mut zoe = test_user("uid-zoe", UserRole::Employee);
    zoe.name = "Zoe".into();
    let mut ana = test_user("uid-ana", UserRole::Employee);
    ana.name = "Ana".into();
    let admin = test_user("uid-admin", UserRole::Admin);
    let uc = ListEmployeesUseCase {
        repo: MockUserRepo::new(vec![zoe, admin, ana]),
    };

    let names: Vec<String> = uc.execute().await.unwrap().into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["Ana", "Zoe"]);
}

#[tokio::test]
async fn should_rename_record_and_sync_display_name() {
    let repo = MockUserRepo::new(vec![test_user("uid-ana", UserRole::Employee)]);
    let users = repo.users.clone();
    let gateway = MockGateway::default();
    let uc = UpdateProfileUseCase {
        repo,
        gateway: gateway.clone(),
    };

    let name = uc.execute("uid-ana", "  Ana Lima ").await.unwrap();

    assert_eq!(name, "Ana Lima");
    assert_eq!(users.lock().unwrap()[0].name, "Ana Lima");
    assert_eq!(
        gateway.display_names.lock().unwrap().as_slice(),
        &[("uid-ana".to_owned(), "Ana Lima".to_owned())]
    );
}

#[tokio::test]
async fn should_remove_principal_when_record_write_fails() {
    let gateway = MockGateway::default();
    let failing = CreateUserUseCase {
        repo: MockUserRepo::failing(),
        gateway: gateway.clone(),
    };

    let result = failing
        .execute(create_input("ana@example.com", "secret1", Some("Ana")))
        .await;
    assert!(matches!(result, Err(PulseServiceError::Internal(_))));
    assert!(gateway.principals.lock().unwrap().is_empty());

    let retry = CreateUserUseCase {
        repo: MockUserRepo::empty(),
        gateway,
    };
    let user = retry
        .execute(create_input("ana@example.com", "secret1", Some("Ana")))
        .await
        .unwrap();
    assert_eq!(user.email, "ana@example.com");
}

#[tokio::test]
async fn should_create_record_when_stale_record_shares_email() {
    let mut stale = test_user("uid-old", UserRole::Employee);
    stale.email = "ana@example.com".into();
    let repo = MockUserRepo::new(vec![stale]);
    let users = repo.users.clone();
    let uc = CreateUserUseCase {
        repo,
        gateway: MockGateway::default(),
    };

    let user = uc
        .execute(create_input("ana@example.com", "secret1", None))
        .await
        .unwrap();

    assert_ne!(user.id, "uid-old");
    assert_eq!(users.lock().unwrap().len(), 2);
}
