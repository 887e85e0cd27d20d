use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn bin() -> Command {
    let path = assert_cmd::cargo::cargo_bin!("faqbot");
    Command::new(path)
}

fn cases_path() -> String {
    format!("{}/data/eval_cases.json", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn ask_direct_match_prints_answer() {
    bin()
        .args(["ask", "--question", "What is FundedPro?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass=direct score=0 entry=0"))
        .stdout(predicate::str::contains(
            "reply=FundedPro is a leading proprietary trading firm",
        ));
}

#[test]
fn ask_unknown_question_prints_fallback() {
    bin()
        .args(["ask", "--question", "xyz123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass=no_match"))
        .stdout(predicate::str::contains("support@thefundedpro.com"));
}

#[test]
fn ask_json_output() {
    let assert = bin()
        .args([
            "ask",
            "--question",
            "how long is the challenge",
            "--format",
            "json",
        ])
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["pass"], "keyword");
    assert_eq!(json["entry_index"], 1);
    assert_eq!(json["score"], 11);
}

#[test]
fn ask_rejects_blank_question() {
    bin()
        .args(["ask", "--question", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("question must not be blank"));
}

#[test]
fn eval_bundled_cases_pass() {
    bin()
        .args(["eval", "--cases", &cases_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("failed=0"))
        .stdout(predicate::str::contains("meets_threshold=true"));
}

#[test]
fn eval_fails_below_required_rate() {
    let dir = tempfile::tempdir().unwrap();
    let cases = dir.path().join("cases.json");
    std::fs::write(
        &cases,
        r#"[{"case_id": "wrong", "question": "xyz123", "expected_entry": 0}]"#,
    )
    .unwrap();

    bin()
        .args(["eval", "--cases", cases.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("case=wrong passed=false"))
        .stderr(predicate::str::contains("below required"));
}

#[test]
fn exported_corpus_can_be_loaded_back() {
    let dir = tempfile::tempdir().unwrap();
    let entries = dir.path().join("faq.jsonl");
    let synonyms = dir.path().join("synonyms.json");

    bin()
        .args([
            "export-corpus",
            "--entries-out",
            entries.to_str().unwrap(),
            "--synonyms-out",
            synonyms.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("entries=13 synonyms=10"));

    bin()
        .args([
            "--corpus",
            entries.to_str().unwrap(),
            "--synonyms",
            synonyms.to_str().unwrap(),
            "ask",
            "--question",
            "tell me about drawdown rules",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("entry=7"));
}

#[test]
fn custom_corpus_replaces_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let entries = dir.path().join("faq.jsonl");
    let synonyms = dir.path().join("synonyms.json");
    std::fs::write(
        &entries,
        "{\"question\":\"Where is the office?\",\"answer\":\"In Lisbon.\"}\n",
    )
    .unwrap();
    std::fs::write(
        &synonyms,
        r#"[{"canonical": "office", "variants": ["headquarters", "hq"]}]"#,
    )
    .unwrap();

    bin()
        .args([
            "--corpus",
            entries.to_str().unwrap(),
            "--synonyms",
            synonyms.to_str().unwrap(),
            "ask",
            "--question",
            "where are your headquarters",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("reply=In Lisbon."));
}

#[test]
fn chat_answers_piped_questions() {
    bin()
        .args(["chat", "--reply-delay", "0s"])
        .write_stdin("What is FundedPro?\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello! I'm your FundedPro assistant."))
        .stdout(predicate::str::contains("You: What is FundedPro?"))
        .stdout(predicate::str::contains(
            "FundedPro Assistant: FundedPro is a leading proprietary trading firm",
        ));
}

#[test]
fn corpus_without_synonyms_is_rejected() {
    bin()
        .args(["--corpus", "faq.jsonl", "ask", "--question", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "--corpus and --synonyms must both be provided",
        ));
}
