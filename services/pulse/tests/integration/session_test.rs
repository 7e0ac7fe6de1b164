use leadtrack_domain::role::UserRole;
use leadtrack_pulse::domain::types::{Portal, Principal};
use leadtrack_pulse::error::PulseServiceError;
use leadtrack_pulse::usecase::role::{GuardPortalUseCase, ResolveRoleUseCase};
use leadtrack_pulse::usecase::session::{SignInInput, SignInUseCase};

use crate::helpers::{MockGateway, MockUserRepo, principal_of, test_user};

const BOSS: &str = "boss@example.com";

fn sign_in(repo: MockUserRepo, gateway: MockGateway) -> SignInUseCase<MockUserRepo, MockGateway> {
    SignInUseCase {
        guard: GuardPortalUseCase {
            resolver: ResolveRoleUseCase {
                repo,
                super_admin_email: Some(BOSS.to_owned()),
            },
            gateway,
        },
    }
}

fn input(email: &str, password: &str, portal: Portal) -> SignInInput {
    SignInInput {
        email: email.to_owned(),
        password: password.to_owned(),
        portal,
    }
}

#[tokio::test]
async fn should_sign_in_employee_through_employee_portal() {
    let ana = test_user("uid-ana", UserRole::Employee);
    let gateway = MockGateway::with_principal(principal_of(&ana), "secret1");
    let uc = sign_in(MockUserRepo::new(vec![ana.clone()]), gateway);

    let signed_in = uc
        .execute(input(&ana.email, "secret1", Portal::Employee))
        .await
        .unwrap();

    assert_eq!(signed_in.user, ana);
    assert_eq!(signed_in.token, "token-uid-ana");
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let ana = test_user("uid-ana", UserRole::Employee);
    let gateway = MockGateway::with_principal(principal_of(&ana), "secret1");
    let uc = sign_in(MockUserRepo::new(vec![ana.clone()]), gateway);

    let result = uc.execute(input(&ana.email, "nope", Portal::Employee)).await;
    assert!(matches!(result, Err(PulseServiceError::AuthRejected)));
}

#[tokio::test]
async fn should_require_email_and_password() {
    let uc = sign_in(MockUserRepo::empty(), MockGateway::default());
    let result = uc.execute(input("  ", "secret1", Portal::Any)).await;
    assert!(matches!(result, Err(PulseServiceError::MissingData)));
}

#[tokio::test]
async fn should_sign_out_employee_entering_admin_portal() {
    let ana = test_user("uid-ana", UserRole::Employee);
    let gateway = MockGateway::with_principal(principal_of(&ana), "secret1");
    let uc = sign_in(MockUserRepo::new(vec![ana.clone()]), gateway.clone());

    let result = uc.execute(input(&ana.email, "secret1", Portal::Admin)).await;

    assert!(matches!(result, Err(PulseServiceError::AuthorizationMismatch)));
    assert_eq!(gateway.signed_out(), vec!["uid-ana".to_owned()]);
}

#[tokio::test]
async fn should_bootstrap_super_admin_on_first_admin_sign_in() {
    let repo = MockUserRepo::empty();
    let users = repo.users.clone();
    let gateway = MockGateway::default();
    let uc = sign_in(repo, gateway.clone());

    let signed_in = uc.execute(input(BOSS, "secret1", Portal::Admin)).await.unwrap();

    assert_eq!(signed_in.user.role, UserRole::Admin);
    assert_eq!(signed_in.user.name, "Admin");
    assert_eq!(signed_in.user.email, BOSS);
    assert_eq!(users.lock().unwrap().len(), 1);
    assert_eq!(gateway.principals.lock().unwrap().len(), 1);
    assert_eq!(
        gateway.display_names.lock().unwrap().as_slice(),
        &[(signed_in.user.id.clone(), "Admin".to_owned())]
    );
}

#[tokio::test]
async fn should_not_bootstrap_outside_admin_portal() {
    let uc = sign_in(MockUserRepo::empty(), MockGateway::default());
    let result = uc.execute(input(BOSS, "secret1", Portal::Employee)).await;
    assert!(matches!(result, Err(PulseServiceError::UnknownPrincipal)));
}

#[tokio::test]
async fn should_not_bootstrap_other_unknown_emails() {
    let uc = sign_in(MockUserRepo::empty(), MockGateway::default());
    let result = uc
        .execute(input("someone@example.com", "secret1", Portal::Admin))
        .await;
    assert!(matches!(result, Err(PulseServiceError::UnknownPrincipal)));
}

#[tokio::test]
async fn should_heal_existing_super_admin_principal_on_sign_in() {
    let principal = Principal {
        id: "uid-boss".into(),
        email: BOSS.into(),
        display_name: Some("Chief".into()),
    };
    let gateway = MockGateway::with_principal(principal, "secret1");
    let uc = sign_in(MockUserRepo::empty(), gateway);

    let signed_in = uc.execute(input(BOSS, "secret1", Portal::Admin)).await.unwrap();
    assert_eq!(signed_in.user.id, "uid-boss");
    assert_eq!(signed_in.user.name, "Chief");
}
