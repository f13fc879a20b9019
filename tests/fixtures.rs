use camino::Utf8PathBuf;
use datatest_stable::Utf8Path;

/// Each `tests/fixtures/NAME.imagemap` is run and its report compared with
/// `NAME.expected`. Regenerate with `cargo xtask bless`.
fn test_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let expected_path: Utf8PathBuf = path.with_extension("expected");
    let expected = std::fs::read_to_string(&expected_path)
        .map_err(|e| format!("cannot read {}: {}", expected_path, e))?;

    let actual = match imagemap::run_named(path.as_str(), &source) {
        Ok(report) => report,
        Err(report) => panic!("{} failed to run:\n{:?}", path, report),
    };

    if actual != expected {
        panic!(
            "report mismatch for {}:\n{}",
            path,
            format_inline_diff(&expected, &actual)
        );
    }
    Ok(())
}

/// Format a colored inline diff using dissimilar
fn format_inline_diff(expected: &str, actual: &str) -> String {
    use dissimilar::Chunk;

    let mut output = String::new();
    output.push_str("\n=== Inline Diff (expected vs actual) ===\n");
    output.push_str("Legend: [-expected only-] [+actual only+] [unchanged]\n\n");

    for chunk in dissimilar::diff(expected, actual) {
        match chunk {
            Chunk::Equal(s) => output.push_str(s),
            Chunk::Delete(s) => {
                output.push_str("\x1b[31m[-");
                output.push_str(s);
                output.push_str("-]\x1b[0m");
            }
            Chunk::Insert(s) => {
                output.push_str("\x1b[32m[+");
                output.push_str(s);
                output.push_str("+]\x1b[0m");
            }
        }
    }
    output
}

datatest_stable::harness! {
    {
        test = test_fixture,
        root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"),
        pattern = r"\.imagemap$"
    },
}
