use std::path::Path;

static EXPECTED_COMMANDS: &[&str] = &["flake-chart", "flake-chart-render", "flake-chart-config"];

#[test]
fn test_manpage_generation() {
    let man_dir = Path::new(env!("OUT_DIR")).join("man").join("man1");

    for command in EXPECTED_COMMANDS.iter() {
        let page = man_dir.join(format!("{}.1", command));
        assert!(page.exists(), "Missing manpage: {}", page.display());
    }
}

#[test]
fn test_markdown_generation() {
    let markdown_path = Path::new(env!("OUT_DIR")).join("docs").join("manpage.md");

    let content = std::fs::read_to_string(&markdown_path).unwrap_or_else(|_| {
        panic!(
            "Failed to read markdown documentation: {}",
            markdown_path.display()
        )
    });

    assert!(
        !content.trim().is_empty(),
        "Markdown documentation {} is empty",
        markdown_path.display()
    );

    for subcommand in ["render", "config"] {
        assert!(
            content.contains(subcommand),
            "Markdown documentation does not contain command: {}",
            subcommand
        );
    }
}
