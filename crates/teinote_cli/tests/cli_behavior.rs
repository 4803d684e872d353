//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the teinote binary: exit
//! codes, console report and written files.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const NOTED: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<TEI xmlns=\"http://www.tei-c.org/ns/1.0\"><text>\
<body><p>One<ref target=\"#n1\">1</ref> two<ref target=\"#n2\">2</ref>.</p></body>\
<back><div type=\"notes\"><note xml:id=\"n1\">First</note><note xml:id=\"n2\">Second</note></div></back>\
</text></TEI>\n";

const PLAIN: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<TEI xmlns=\"http://www.tei-c.org/ns/1.0\"><text><body><p>Nothing.</p></body></text></TEI>\n";

/// Helper to create a command for the teinote CLI
fn teinote_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_teinote"))
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        teinote_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        teinote_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod usage_errors {
    use super::*;

    #[test]
    fn fails_without_arguments() {
        teinote_cmd()
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("Usage:"));
    }

    #[test]
    fn fails_with_one_argument() {
        teinote_cmd().arg("input").assert().failure().code(2);
    }

    #[test]
    fn fails_with_three_arguments() {
        teinote_cmd()
            .args(["a", "b", "c"])
            .assert()
            .failure()
            .code(2);
    }

    #[test]
    fn fails_for_missing_input_folder() {
        let temp = assert_fs::TempDir::new().unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg(temp.child("missing").path())
            .arg(temp.child("out").path())
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("Input folder"));

        temp.child("out").assert(predicate::path::missing());
    }

    #[test]
    fn fails_for_file_as_input_folder() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.xml").write_str(PLAIN).unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg(temp.child("a.xml").path())
            .arg(temp.child("out").path())
            .assert()
            .failure()
            .code(2);
    }

    #[test]
    fn fails_when_no_xml_files_found() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/readme.txt").write_str("nothing").unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg(temp.child("in").path())
            .arg(temp.child("out").path())
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("No XML files found"));
    }

    #[test]
    fn fails_for_invalid_config() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/a.xml").write_str(PLAIN).unwrap();
        temp.child("bad.json").write_str("{ \"unknown\": 1 }").unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg("--config")
            .arg(temp.child("bad.json").path())
            .arg(temp.child("in").path())
            .arg(temp.child("out").path())
            .assert()
            .failure()
            .code(2);
    }
}

mod process_command {
    use super::*;

    #[test]
    fn inlines_notes_and_reports_per_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/noted.xml").write_str(NOTED).unwrap();
        temp.child("in/plain.xml").write_str(PLAIN).unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg(temp.child("in").path())
            .arg(temp.child("out").path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 2 XML files to process"))
            .stdout(predicate::str::contains("Processing noted.xml..."))
            .stdout(predicate::str::contains("Found 2 endnotes in noted.xml"))
            .stdout(predicate::str::contains("Inlined 2 references"))
            .stdout(predicate::str::contains("Successfully processed noted.xml"))
            .stdout(predicate::str::contains("No endnotes found in plain.xml"))
            .stdout(predicate::str::contains("Successfully processed: 2 files"))
            .stdout(predicate::str::contains("Errors: 0 files"))
            .stdout(predicate::str::contains("References inlined: 2"));

        temp.child("out/noted.xml").assert(
            "<?xml version='1.0' encoding='UTF-8'?>\n\
             <TEI xmlns=\"http://www.tei-c.org/ns/1.0\"><text>\
             <body><p>One<note place=\"inline\">First</note> two<note place=\"inline\">Second</note>.</p></body>\
             </text></TEI>\n",
        );
        temp.child("out/plain.xml")
            .assert(predicate::str::starts_with("<?xml version='1.0' encoding='UTF-8'?>\n<TEI"));
    }

    #[test]
    fn continues_after_failed_document() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/a_broken.xml").write_str("<TEI><text>").unwrap();
        temp.child("in/b_noted.xml").write_str(NOTED).unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg(temp.child("in").path())
            .arg(temp.child("out").path())
            .assert()
            .success()
            .stdout(predicate::str::contains("ERROR processing a_broken.xml:"))
            .stdout(predicate::str::contains("Successfully processed b_noted.xml"))
            .stdout(predicate::str::contains("Successfully processed: 1 files"))
            .stdout(predicate::str::contains("Errors: 1 files"));

        temp.child("out/a_broken.xml")
            .assert(predicate::path::missing());
        temp.child("out/b_noted.xml")
            .assert(predicate::path::exists());
    }

    #[test]
    fn strips_byte_order_mark() {
        let temp = assert_fs::TempDir::new().unwrap();
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice(NOTED.as_bytes());
        temp.child("in/bom.xml").write_binary(&bytes).unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg(temp.child("in").path())
            .arg(temp.child("out").path())
            .assert()
            .success();

        let written = std::fs::read(temp.child("out/bom.xml").path()).unwrap();
        assert!(written.starts_with(b"<?xml version='1.0' encoding='UTF-8'?>"));
    }

    #[test]
    fn creates_nested_output_folder() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/noted.xml").write_str(NOTED).unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg(temp.child("in").path())
            .arg(temp.child("deep/nested/out").path())
            .assert()
            .success();

        temp.child("deep/nested/out/noted.xml")
            .assert(predicate::path::exists());
    }

    #[test]
    fn recursive_flag_processes_sub_folders() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/top.xml").write_str(PLAIN).unwrap();
        temp.child("in/vol2/inner.xml").write_str(NOTED).unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg("--recursive")
            .arg(temp.child("in").path())
            .arg(temp.child("out").path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Successfully processed: 2 files"));

        temp.child("out/vol2/inner.xml")
            .assert(predicate::str::contains("<note place=\"inline\">First</note>"));
    }

    #[test]
    fn discovers_config_in_working_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/noted.xml").write_str(NOTED).unwrap();
        temp.child(".teinote.json")
            .write_str(r#"{ "inlinePlace": "foot" }"#)
            .unwrap();

        teinote_cmd()
            .current_dir(temp.path())
            .arg(temp.child("in").path())
            .arg(temp.child("out").path())
            .assert()
            .success();

        temp.child("out/noted.xml")
            .assert(predicate::str::contains("<note place=\"foot\">First</note>"));
    }

    #[test]
    fn json_format_reports_counts() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/noted.xml").write_str(NOTED).unwrap();

        let output = teinote_cmd()
            .current_dir(temp.path())
            .args(["--format", "json"])
            .arg(temp.child("in").path())
            .arg(temp.child("out").path())
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["successCount"], 1);
        assert_eq!(json["errorCount"], 0);
        assert_eq!(json["referencesInlined"], 2);
        assert_eq!(json["documents"][0]["notesFound"], 2);
        assert_eq!(json["documents"][0]["referencesInlined"], 2);
        assert_eq!(json["documents"][0]["encoding"], "UTF-8");
    }
}
