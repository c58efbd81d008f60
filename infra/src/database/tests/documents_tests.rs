use chrono::{TimeZone, Utc};
use mongodb::bson::{self, Bson};

use sl_core::domain::entities::{
    Expense, ExpenseChanges, MailCode, MailType, NewUser, UsedRefreshToken, User, UserRole,
};

use crate::database::documents::{
    from_bson, to_bson, ExpenseDocument, MailDocument, UsedRefreshTokenDocument, UserDocument,
};
use crate::database::mongo::{changes_document, expired_filter, is_duplicate_key};
use crate::InfrastructureError;

fn sample_user() -> User {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    User::new(
        NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 0000 0000".to_string(),
            password: "secret".to_string(),
            user_role: Some(UserRole::Admin),
        },
        "$2b$04$hash".to_string(),
        now,
    )
}

#[test]
fn test_user_document_uses_snake_case_fields() {
    let document = bson::to_document(&UserDocument::from(&sample_user())).unwrap();

    for field in [
        "user_id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "password",
        "user_role",
        "is_email_verified",
        "access_token",
        "refresh_token",
        "created_at",
        "updated_at",
    ] {
        assert!(document.contains_key(field), "missing field {field}");
    }
    assert_eq!(document.get_str("user_role").unwrap(), "ADMIN");
    assert!(matches!(document.get("created_at"), Some(Bson::DateTime(_))));
}

#[test]
fn test_user_document_keeps_password_hash() {
    let user = sample_user();
    let restored = User::try_from(UserDocument::from(&user)).unwrap();

    assert_eq!(restored, user);
    assert_eq!(restored.password, "$2b$04$hash");
}

#[test]
fn test_mail_document_stores_type_field() {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let code = MailCode::new(
        "ada@example.com",
        "123456",
        MailType::PasswordReset,
        now,
        chrono::Duration::hours(1),
    );

    let document = bson::to_document(&MailDocument::from(&code)).unwrap();
    assert_eq!(document.get_str("type").unwrap(), "PasswordReset");

    let restored = MailCode::try_from(MailDocument::from(&code)).unwrap();
    assert_eq!(restored.expires_at, now + chrono::Duration::hours(1));
}

#[test]
fn test_used_token_document_fields() {
    let record = UsedRefreshToken {
        token_id: "jti-1".to_string(),
        refresh_token: "ab".repeat(32),
        issued_at_unix: 10,
        expired_at_unix: 20,
    };

    let document = bson::to_document(&UsedRefreshTokenDocument::from(&record)).unwrap();
    assert_eq!(document.get_str("token_id").unwrap(), "jti-1");
    assert_eq!(document.get_i64("expired_at_unix").unwrap(), 20);
}

#[test]
fn test_bson_dates_truncate_to_millis() {
    let precise = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
    let restored = from_bson(to_bson(precise)).unwrap();

    assert_eq!(restored.timestamp_millis(), precise.timestamp_millis());
    assert_eq!(restored.timestamp_subsec_nanos(), 123_000_000);
}

#[test]
fn test_expense_document_round_trip() {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let expense = Expense::new("user-1", "food".to_string(), "lunch".to_string(), 1200, now, now);

    let restored = Expense::try_from(ExpenseDocument::from(&expense)).unwrap();
    assert_eq!(restored, expense);
}

#[test]
fn test_changes_document_sets_only_present_fields() {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let changes = ExpenseChanges {
        expense_type: None,
        expense_label: Some("dinner".to_string()),
        expense_time: None,
        expense_amount: Some(0),
        updated_at: now,
    };

    let update = changes_document(&changes);
    let set = update.get_document("$set").unwrap();

    assert_eq!(set.get_str("expense_label").unwrap(), "dinner");
    assert_eq!(set.get_i64("expense_amount").unwrap(), 0);
    assert!(set.contains_key("updated_at"));
    assert!(!set.contains_key("expense_type"));
    assert!(!set.contains_key("expense_time"));
}

#[test]
fn test_expired_filter_is_inclusive() {
    let filter = expired_filter(1_700_000_000);
    let bound = filter.get_document("expired_at_unix").unwrap();
    assert_eq!(bound.get_i64("$lte").unwrap(), 1_700_000_000);
}

#[test]
fn test_non_database_errors_are_not_duplicates() {
    assert!(!is_duplicate_key(&InfrastructureError::Timeout("op".to_string())));
}
