use anyhow::Result;
use awscred::app::{list_profiles, render};
use awscred::models::Profile;
use awscred::storage::{parse_profiles, remove_block, BlockLayout, StorePaths};
use tempfile::TempDir;

mod support;
use support::{credentials_block, read, write_store};

#[test]
fn parse_reads_blocks_in_file_order() -> Result<()> {
    let dir = TempDir::new()?;
    let content = format!(
        "{}\n{}",
        credentials_block("test-1", "123", "qwerty"),
        credentials_block("test-2", "321", "qwerty-two")
    );
    let store = write_store(&dir, &content, "")?;

    let profiles = parse_profiles(&store.credentials_file)?;

    assert_eq!(
        profiles,
        vec![
            Profile::new("test-1", "123", "qwerty"),
            Profile::new("test-2", "321", "qwerty-two"),
        ]
    );
    Ok(())
}

#[test]
fn list_renders_single_profile() -> Result<()> {
    let dir = TempDir::new()?;
    let store = write_store(&dir, &credentials_block("test-1", "123", "qwerty"), "")?;

    let profiles = list_profiles(&store)?;
    let text = render::profiles_text(&profiles);

    let expected = "Profile - test-1\nAccess Key ID - 123\nSecret Access Key - qwerty\n";
    assert_eq!(profiles[0].to_string(), expected);
    assert!(text.starts_with(expected));
    assert_eq!(text.lines().count(), 4);
    Ok(())
}

#[test]
fn deleting_absent_profile_keeps_every_block() -> Result<()> {
    let dir = TempDir::new()?;
    let content = format!(
        "{}{}",
        credentials_block("a", "1", "x"),
        credentials_block("b", "2", "y")
    );
    let store = write_store(&dir, &content, "")?;
    let before = parse_profiles(&store.credentials_file)?;

    let removed = remove_block(&store.credentials_file, "missing", &BlockLayout::credentials())?;

    assert_eq!(removed, 0);
    assert_eq!(parse_profiles(&store.credentials_file)?, before);
    assert_eq!(read(&store.credentials_file)?, content);
    Ok(())
}

#[test]
fn deleting_existing_profile_leaves_neighbours_intact() -> Result<()> {
    let dir = TempDir::new()?;
    let content = format!(
        "{}\n{}\n{}",
        credentials_block("a", "1", "x"),
        credentials_block("b", "2", "y"),
        credentials_block("c", "3", "z")
    );
    let store = write_store(&dir, &content, "")?;

    remove_block(&store.credentials_file, "b", &BlockLayout::credentials())?;

    assert_eq!(
        read(&store.credentials_file)?,
        format!(
            "{}\n\n{}",
            credentials_block("a", "1", "x"),
            credentials_block("c", "3", "z")
        )
    );
    assert_eq!(
        parse_profiles(&store.credentials_file)?,
        vec![Profile::new("a", "1", "x"), Profile::new("c", "3", "z")]
    );
    Ok(())
}

#[test]
fn operations_on_missing_files_fail_without_creating_them() -> Result<()> {
    let dir = TempDir::new()?;
    let store = StorePaths::new(dir.path().join("credentials"), dir.path().join("config"));

    assert!(parse_profiles(&store.credentials_file).is_err());
    assert!(remove_block(&store.config_file, "a", &BlockLayout::config()).is_err());
    assert!(list_profiles(&store).is_err());

    assert!(!store.credentials_file.exists());
    assert!(!store.config_file.exists());
    Ok(())
}
