use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_translate_default_language() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.translate_command().args(["market.title", "chat.send"]));

    Ok(())
}

#[test]
fn test_translate_hindi() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(
        test.translate_command()
            .args(["--lang", "hi", "market.state", "home.cta"])
    );

    Ok(())
}

#[test]
fn test_translate_unsupported_language_falls_back() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.translate_command().args(["--lang", "ta", "market.load"]));

    Ok(())
}

#[test]
fn test_translate_missing_key() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.translate_command().arg("not.a.real.path"));

    Ok(())
}

#[test]
fn test_translate_missing_key_placeholder() -> Result<()> {
    let test = CliTest::with_file(
        ".cropsenserc.json",
        r#"{"missingTranslation": "placeholder"}"#,
    )?;

    assert_cmd_snapshot!(test.translate_command().arg("market"));

    Ok(())
}

#[test]
fn test_translate_uses_project_messages() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("messages/en.json", r#"{"greeting": {"hello": "Hello"}}"#)?;
    test.write_file("messages/mr.json", r#"{"greeting": {"hello": "नमस्कार"}}"#)?;

    assert_cmd_snapshot!(
        test.translate_command()
            .args(["--lang", "mr", "greeting.hello"])
    );

    Ok(())
}

#[test]
fn test_locales_lists_coverage() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("messages/en.json", r#"{"a": "A", "b": "B"}"#)?;
    test.write_file("messages/hi.json", r#"{"a": "ए"}"#)?;

    assert_cmd_snapshot!(test.command().args(["locales", "--lang", "hi"]));

    Ok(())
}
