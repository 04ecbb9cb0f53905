//! End-to-end tests running the gotags binary against real files.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_gotags(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gotags"))
        .args(args)
        .output()
        .expect("failed to run gotags")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .expect("tag output should be valid UTF-8 for these fixtures")
        .lines()
        .map(str::to_string)
        .collect()
}

fn assert_headers(lines: &[String]) {
    assert_eq!(lines[0], "!_TAG_FILE_FORMAT\t2");
    assert_eq!(lines[1], "!_TAG_FILE_SORTED\t1");
    assert!(lines[2].starts_with("!_TAG_PROGRAM_AUTHOR\t"));
    assert!(lines[3].starts_with("!_TAG_PROGRAM_NAME\tgotags"));
    assert!(lines[4].starts_with("!_TAG_PROGRAM_URL\t"));
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_point_struct_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "point.go",
        "package geometry\n\ntype Point struct {\n\tX int\n\tY int\n}\n",
    );

    let output = run_gotags(&[&path]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_headers(&lines);
    let body = &lines[5..];
    assert_eq!(body.len(), 3);

    // Sorted: Point < X < Y.
    assert_eq!(body[0], format!("Point\t{path}\t/^type Point struct {{$/;\"\ts\t"));
    assert_eq!(body[1], format!("X\t{path}\t/^\tX int$/;\"\tm\tstruct:Point"));
    assert_eq!(body[2], format!("Y\t{path}\t/^\tY int$/;\"\tm\tstruct:Point"));
}

#[test]
fn test_pointer_receiver_method() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "point.go",
        concat!(
            "package geometry\n",
            "\n",
            "import \"fmt\"\n",
            "\n",
            "type Point struct {\n",
            "\tX int\n",
            "\tY int\n",
            "}\n",
            "\n",
            "func (p *Point) String() string {\n",
            "\treturn fmt.Sprintf(\"(%d, %d)\", p.X, p.Y)\n",
            "}\n",
        ),
    );

    let output = run_gotags(&[&path]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    let method = lines
        .iter()
        .find(|l| l.starts_with("String\t"))
        .expect("String tag should be present");
    // The pattern is the exact text of line 10.
    assert_eq!(
        *method,
        format!("String\t{path}\t/^func (p *Point) String() string {{$/;\"\tf\tclass:Point")
    );
}

#[test]
fn test_constant_tag() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "retry.go", "package retry\n\nconst MaxRetries = 5\n");

    let output = run_gotags(&[&path]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    let body = &lines[5..];
    assert_eq!(body.len(), 1);
    assert_eq!(body[0], format!("MaxRetries\t{path}\t/^const MaxRetries = 5$/;\"\td\t"));
}

#[test]
fn test_duplicate_names_across_files_are_kept() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "alpha.go", "package a\n\nfunc Setup() {}\n");
    let second = write_file(&dir, "beta.go", "package b\n\nfunc Setup() {}\n");

    let output = run_gotags(&[&first, &second]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    let setups: Vec<&String> = lines.iter().filter(|l| l.starts_with("Setup\t")).collect();
    assert_eq!(setups.len(), 2);
    assert!(setups.iter().any(|l| l.contains("alpha.go")));
    assert!(setups.iter().any(|l| l.contains("beta.go")));
}

#[test]
fn test_output_is_sorted_and_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "mixed.go",
        concat!(
            "package mixed\n",
            "\n",
            "var zulu int\n",
            "\n",
            "const alpha = 1\n",
            "\n",
            "type Mike struct {\n",
            "\tfield string\n",
            "}\n",
            "\n",
            "func bravo() {}\n",
        ),
    );

    let first = run_gotags(&[&path]);
    let second = run_gotags(&[&path]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let lines = stdout_lines(&first);
    let body = &lines[5..];
    assert_eq!(body.len(), 5);
    for pair in body.windows(2) {
        assert!(pair[0] <= pair[1], "{:?} should sort before {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_empty_input_emits_well_formed_header_only_file() {
    let output = run_gotags(&[]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    assert_headers(&lines);
}

#[test]
fn test_directory_needs_recurse_flag() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("pkg")).unwrap();
    fs::write(
        dir.path().join("pkg").join("util.go"),
        "package pkg\n\nfunc Util() {}\n",
    )
    .unwrap();
    let root = dir.path().to_string_lossy().into_owned();

    let flat = run_gotags(&[&root]);
    assert!(flat.status.success());
    assert_eq!(stdout_lines(&flat).len(), 5, "directory should be skipped without -r");

    let recursive = run_gotags(&["-r", &root]);
    assert!(recursive.status.success());
    let lines = stdout_lines(&recursive);
    assert!(lines.iter().any(|l| l.starts_with("Util\t")));
}

#[test]
fn test_output_flag_writes_tag_file() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "lib.go", "package lib\n\nfunc Exported() {}\n");
    let tag_file = dir.path().join("tags");

    let output = run_gotags(&["-f", &tag_file.to_string_lossy(), &source]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let content = fs::read_to_string(&tag_file).unwrap();
    assert!(content.starts_with("!_TAG_FILE_FORMAT\t2\n"));
    assert!(content.contains("\nExported\t"));
}

#[test]
fn test_parse_failure_is_nonfatal() {
    let dir = TempDir::new().unwrap();
    let broken = write_file(&dir, "broken.go", "package broken\n\nfunc {\n");
    let fine = write_file(&dir, "fine.go", "package fine\n\nfunc Fine() {}\n");

    let output = run_gotags(&[&broken, &fine]);
    assert!(output.status.success(), "parse failures must not abort the run");

    let lines = stdout_lines(&output);
    assert!(lines.iter().any(|l| l.starts_with("Fine\t")));
    assert!(!lines.iter().any(|l| l.contains("broken.go")));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("broken.go"), "first failure should be reported: {stderr}");
}

#[test]
fn test_interface_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "shape.go",
        "package shape\n\ntype Shape interface {\n\tArea() float64\n}\n",
    );

    let output = run_gotags(&[&path]);
    let lines = stdout_lines(&output);
    let body = &lines[5..];
    assert_eq!(body.len(), 2);
    assert_eq!(body[0], format!("Area\t{path}\t/^\tArea() float64$/;\"\tf\tclass:Shape"));
    assert_eq!(body[1], format!("Shape\t{path}\t/^type Shape interface {{$/;\"\tc\t"));
}

#[test]
fn test_missing_input_never_breaks_the_run() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("never-existed.go").to_string_lossy().into_owned();
    let output = run_gotags(&[&missing]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 5);
}
