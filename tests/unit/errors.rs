use snowflake_sdk::common::{In, Like};
use snowflake_sdk::identifiers::AccountObjectIdentifier;
use snowflake_sdk::objects::role::AlterRoleOptions;
use snowflake_sdk::objects::stream::ShowStreamRequest;
use snowflake_sdk::{Error, ErrorKind, Validate};

#[test]
fn test_every_violation_is_reported() {
    let opts = AlterRoleOptions {
        name: AccountObjectIdentifier::new(""),
        ..Default::default()
    };

    let err = opts.validate().unwrap_err();
    assert_eq!(err.kind(), None);
    assert_eq!(
        err.kinds(),
        vec![ErrorKind::InvalidObjectIdentifier, ErrorKind::ExactlyOneOf]
    );

    let message = err.to_string();
    assert!(message.contains("AlterRoleOptions"), "{message}");
    assert_eq!(message.lines().count(), 2, "{message}");
}

#[test]
fn test_single_violation_is_not_wrapped() {
    let opts = AlterRoleOptions {
        name: AccountObjectIdentifier::new("R1"),
        set_comment: Some("c".to_string()),
        unset_comment: true,
        ..Default::default()
    };

    let err = opts.validate().unwrap_err();
    assert!(matches!(err, Error::ExactlyOneOf { .. }));
    assert_eq!(err.leaves().len(), 1);
}

#[test]
fn test_show_filters_need_content() {
    let opts = ShowStreamRequest::new()
        .with_like(Like::default())
        .with_in_scope(In::default())
        .to_options();

    assert_eq!(
        opts.validate().unwrap_err().kinds(),
        vec![ErrorKind::PatternRequiredForLike, ErrorKind::ScopeRequiredForIn]
    );
}

#[test]
fn test_not_found_names_the_object() {
    let err = Error::not_found("warehouse", AccountObjectIdentifier::new("WH9"));
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "warehouse \"WH9\" not found");
}
