use proptest::prelude::*;
use shedu_core::{sanitize_name, FolderNaming, FORBIDDEN_CHARS};

proptest! {
    #[test]
    fn sanitize_is_idempotent(input in ".*") {
        let once = sanitize_name(&input);
        prop_assert_eq!(sanitize_name(&once), once);
    }

    #[test]
    fn sanitize_removes_forbidden_characters(input in r#"[a-z <>:"/\\|?*_]{0,40}"#) {
        let out = sanitize_name(&input);
        prop_assert!(!out.contains(&FORBIDDEN_CHARS[..]));
        prop_assert!(!out.contains("__"));
    }

    #[test]
    fn sanitize_never_has_padding(input in r#"[ _a-z<>|]{0,30}"#) {
        let out = sanitize_name(&input);
        if !out.is_empty() {
            prop_assert!(!out.starts_with([' ', '_']));
            prop_assert!(!out.ends_with([' ', '_']));
        }
    }
}

#[test]
fn folder_naming_templates() {
    let code = "12345678";
    let title = "English: Book 1";
    assert_eq!(FolderNaming::None.subfolder(code, title), None);
    assert_eq!(
        FolderNaming::CodeTitle.subfolder(code, title).as_deref(),
        Some("12345678-English_ Book 1")
    );
    assert_eq!(FolderNaming::Code.subfolder(code, title).as_deref(), Some("12345678"));
    assert_eq!(
        FolderNaming::Title.subfolder(code, title).as_deref(),
        Some("English_ Book 1")
    );
    assert_eq!(
        FolderNaming::TitleCode.subfolder(code, title).as_deref(),
        Some("English_ Book 1-12345678")
    );
}

#[test]
fn title_that_sanitizes_to_nothing_means_no_subfolder() {
    assert_eq!(FolderNaming::Title.subfolder("12345678", "???"), None);
}

#[test]
fn folder_naming_parses_short_keys() {
    for naming in FolderNaming::ALL {
        assert_eq!(naming.key().parse::<FolderNaming>(), Ok(naming));
    }
    assert_eq!("CT".parse::<FolderNaming>(), Ok(FolderNaming::CodeTitle));
    assert!("x".parse::<FolderNaming>().is_err());
}
