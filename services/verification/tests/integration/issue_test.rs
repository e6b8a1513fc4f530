use chrono::Utc;

use chow_verification::error::VerificationServiceError;
use chow_verification::usecase::issue::{IssueCodeInput, IssueCodeUseCase};

use crate::helpers::{MockCodeRepo, MockEmailSender, TEST_EMAIL, test_record};

fn input(first_name: Option<&str>) -> IssueCodeInput {
    IssueCodeInput {
        email: TEST_EMAIL.to_owned(),
        first_name: first_name.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_store_code_and_email_it() {
    let repo = MockCodeRepo::empty();
    let records = repo.records_handle();
    let mailer = MockEmailSender::default();
    let sent = mailer.sent_handle();

    let uc = IssueCodeUseCase {
        codes: repo,
        mailer,
    };
    let record = uc.execute(input(Some("Ada"))).await.unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1, "expected exactly one stored record");
    let stored = &records[0];
    assert_eq!(stored.id, record.id);
    assert_eq!(stored.email, TEST_EMAIL);
    assert_eq!(stored.code.len(), 6);
    assert!(stored.code.bytes().all(|b| b.is_ascii_digit()));
    assert!(!stored.verified, "new code should not be verified");
    assert_eq!(
        (stored.expires_at - stored.created_at).num_seconds(),
        600,
        "code should live ten minutes"
    );
    assert!(stored.expires_at > Utc::now());

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, TEST_EMAIL);
    assert_eq!(sent[0].subject, "Verify your email address");
    assert!(sent[0].html.contains(&stored.code), "email must carry the code");
    assert!(sent[0].html.contains("Hello Ada,"));
    assert!(sent[0].html.contains("10 minutes"));
}

#[tokio::test]
async fn should_greet_generically_without_first_name() {
    let mailer = MockEmailSender::default();
    let sent = mailer.sent_handle();

    let uc = IssueCodeUseCase {
        codes: MockCodeRepo::empty(),
        mailer,
    };
    uc.execute(input(None)).await.unwrap();

    let sent = sent.lock().unwrap();
    assert!(sent[0].html.contains("Hello,"));
}

#[tokio::test]
async fn should_keep_previous_codes_when_reissuing() {
    let earlier = test_record("111111", 30);
    let repo = MockCodeRepo::new(vec![earlier.clone()]);
    let records = repo.records_handle();

    let uc = IssueCodeUseCase {
        codes: repo,
        mailer: MockEmailSender::default(),
    };
    uc.execute(input(None)).await.unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 2, "reissue must not delete older codes");
    assert_eq!(records[0].id, earlier.id);
    assert!(!records[0].verified);
}

#[tokio::test]
async fn should_reject_empty_email_without_storing() {
    let repo = MockCodeRepo::empty();
    let records = repo.records_handle();
    let mailer = MockEmailSender::default();
    let sent = mailer.sent_handle();

    let uc = IssueCodeUseCase {
        codes: repo,
        mailer,
    };
    let result = uc
        .execute(IssueCodeInput {
            email: "  ".to_owned(),
            first_name: None,
        })
        .await;

    assert!(
        matches!(&result, Err(VerificationServiceError::InvalidInput(m)) if m == "email is required"),
        "expected InvalidInput, got {result:?}"
    );
    assert!(records.lock().unwrap().is_empty());
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_keep_stored_code_when_delivery_fails() {
    let repo = MockCodeRepo::empty();
    let records = repo.records_handle();

    let uc = IssueCodeUseCase {
        codes: repo,
        mailer: MockEmailSender::failing(),
    };
    let result = uc.execute(input(Some("Ada"))).await;

    assert!(
        matches!(result, Err(VerificationServiceError::Delivery(_))),
        "expected Delivery, got {result:?}"
    );
    assert_eq!(
        records.lock().unwrap().len(),
        1,
        "record stays stored after a failed send"
    );
}
