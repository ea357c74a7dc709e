use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_lang_defaults_to_english() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("lang"));

    Ok(())
}

#[test]
fn test_lang_is_persisted() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().args(["lang", "hi"]));

    let saved = test.read_file(".cropsense/preferences.json")?;
    assert!(saved.contains(r#""preferredLanguage": "hi""#));

    // later runs start in the saved language
    let output = test.command().arg("lang").output()?;
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hi\n");

    let output = test.translate_command().arg("market.title").output()?;
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "market.title = मंडी चयन\n"
    );

    // --lang overrides for one run without changing the preference
    let output = test
        .translate_command()
        .args(["--lang", "en", "market.title"])
        .output()?;
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "market.title = Market selection\n"
    );
    let output = test.command().arg("lang").output()?;
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hi\n");

    Ok(())
}

#[test]
fn test_lang_accepts_unknown_code_with_warning() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().args(["lang", "xx"]));

    // everything resolves through English
    let output = test.translate_command().arg("market.title").output()?;
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "market.title = Market selection  (fallback)\n"
    );

    Ok(())
}

#[test]
fn test_lang_uses_configured_preferences_file() -> Result<()> {
    let test = CliTest::with_file(
        ".cropsenserc.json",
        r#"{"preferencesFile": "state/prefs.json"}"#,
    )?;

    test.command().args(["lang", "bn"]).output()?;
    assert!(test.read_file("state/prefs.json")?.contains("bn"));

    Ok(())
}
