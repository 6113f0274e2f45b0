//! Integration tests for the export → Markdown pipeline.

mod common;

use std::fs;

use chatmd::core::{MarkdownRenderer, convert_conversation, generate_filename};
use chatmd::prelude::*;
use chatmd::tagging::JiebaAnalyzer;
use common::{FakeAnalyzer, conversation_json, export_json};
use tempfile::tempdir;

const T0: f64 = 1_705_314_600.0; // 2024-01-15 10:30 UTC

fn sample_export() -> String {
    export_json(&[
        conversation_json(
            Some("Python errors"),
            T0,
            &[
                ("assistant", "Here is a fix:\n```python\nraise ValueError\n```", T0 + 120.0),
                ("user", "How do I raise an exception in Python?", T0 + 60.0),
                ("user", "Thanks! See [docs](https://docs.python.org)", T0 + 180.0),
            ],
        ),
        conversation_json(
            None,
            T0 + 86_400.0,
            &[("user", "## Weekend *plans* for hiking", T0 + 86_460.0)],
        ),
    ])
}

// =========================================================================
// Parsing
// =========================================================================

#[test]
fn test_parse_orders_messages_by_time() {
    let conversations = parse_export(&sample_export()).unwrap();
    assert_eq!(conversations.len(), 2);

    let first = &conversations[0];
    let roles: Vec<Role> = first.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    assert!(first.messages[0].text.starts_with("How do I raise"));
}

#[test]
fn test_title_fallback_to_first_prompt() {
    let conversations = parse_export(&sample_export()).unwrap();
    assert_eq!(conversations[1].display_title(), "Weekend plans for hiking");
}

#[test]
fn test_parse_export_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conversations.json");
    fs::write(&path, sample_export()).unwrap();

    let conversations = parse_export_file(&path).unwrap();
    assert_eq!(conversations.len(), 2);
}

// =========================================================================
// Conversion
// =========================================================================

#[test]
fn test_convert_produces_tags_and_sections() {
    let conversations = parse_export(&sample_export()).unwrap();
    let config = Config::default();
    let renderer = MarkdownRenderer::new(&config);

    let rendered = convert_conversation(&conversations[0], &renderer, &FakeAnalyzer::new());

    assert!(rendered.tags.contains("lang:python"));
    assert!(rendered.tags.contains("question"));
    assert!(rendered.tags.contains("solution"));
    assert!(rendered.tags.contains("error"));
    // boosted by the derived title "How do I raise an exception in Python?"
    assert!(rendered.tags.contains("Python"));
    assert!(rendered.tags.contains("exception"));

    let md = &rendered.markdown;
    assert!(md.starts_with("# Python errors\n\n### Tags\n\n"));
    assert!(md.contains("- Total Messages: 3\n"));
    assert!(md.contains("- Duration: 0.0 hours\n"));
    assert!(md.contains("### Code Blocks\n\n- python: 17 characters\n\n"));
    assert!(md.contains("### Links\n\n- [docs](https://docs.python.org)\n\n"));
    assert!(md.contains("## <a id='section-1'></a>Prompt:\n"));
    assert!(md.contains("## Response:\n"));
    assert!(md.contains("## <a id='section-3'></a>Prompt:\n"));
    assert!(!md.contains("## Table of Contents"));
}

#[test]
fn test_untitled_two_turn_conversation() {
    let export = export_json(&[conversation_json(
        None,
        T0,
        &[
            ("assistant", "A function is a named block of code you can call.", T0 + 30.0),
            ("user", "What is a function?", T0 + 10.0),
        ],
    )]);
    let conversations = parse_export(&export).unwrap();
    let config = Config::default().with_min_frequency(1);
    let renderer = MarkdownRenderer::new(&config);

    let rendered = convert_conversation(&conversations[0], &renderer, &FakeAnalyzer::new());
    let md = &rendered.markdown;

    assert!(md.starts_with("# What is a function?\n\n"));
    assert!(rendered.filename.starts_with("ChatGPT-Whatisafunction-"));
    assert!(rendered.tags.contains("function"));
    assert!(rendered.tags.contains("programming"));
    assert!(rendered.tags.contains("question"));

    let prompts = md.lines().filter(|l| l.starts_with("## <a id=")).count();
    let responses = md.lines().filter(|l| *l == "## Response:").count();
    assert_eq!((prompts, responses), (1, 1));

    let prompt_at = md.find("## <a id='section-1'></a>Prompt:\nWhat is a function?").unwrap();
    let response_at = md.find("## Response:\nA function is").unwrap();
    assert!(prompt_at < response_at);
}

#[test]
fn test_derived_title_is_stripped_and_truncated() {
    let prompt = "## **Explain** the _borrow checker_ in Rust with several detailed examples please";
    let export = export_json(&[conversation_json(
        None,
        T0,
        &[("user", prompt, T0 + 1.0), ("assistant", "Sure.", T0 + 2.0)],
    )]);
    let conversations = parse_export(&export).unwrap();
    let config = Config::default();
    let renderer = MarkdownRenderer::new(&config);

    let rendered = convert_conversation(&conversations[0], &renderer, &FakeAnalyzer::new());

    let head: String = prompt.chars().take(50).collect();
    let expected: String = head.chars().filter(|c| !matches!(c, '#' | '*' | '_')).collect();
    let expected = expected.trim();
    assert_eq!(expected, "Explain the borrow checker in Rust with s");
    assert!(rendered.markdown.starts_with(&format!("# {expected}\n\n")));
}

#[test]
fn test_tags_line_is_sorted() {
    let conversations = parse_export(&sample_export()).unwrap();
    let config = Config::default();
    let renderer = MarkdownRenderer::new(&config);
    let rendered = convert_conversation(&conversations[0], &renderer, &FakeAnalyzer::new());

    let tags_line = rendered
        .markdown
        .lines()
        .find(|line| line.starts_with('#') && !line.starts_with("# ") && !line.starts_with("##"))
        .unwrap();
    let tags: Vec<&str> = tags_line.split(' ').collect();
    let mut sorted = tags.clone();
    sorted.sort_unstable();
    assert_eq!(tags, sorted);
}

#[test]
fn test_filename_matches_title_and_time() {
    let conversations = parse_export(&sample_export()).unwrap();
    let config = Config::default();
    let renderer = MarkdownRenderer::new(&config);
    let rendered = convert_conversation(&conversations[0], &renderer, &FakeAnalyzer::new());
    assert_eq!(rendered.filename, generate_filename("Python errors", T0));
}

#[test]
fn test_failing_analyzer_still_renders() {
    let conversations = parse_export(&sample_export()).unwrap();
    let config = Config::default().with_min_frequency(1);
    let renderer = MarkdownRenderer::new(&config);

    let rendered = convert_conversation(&conversations[0], &renderer, &FakeAnalyzer::failing());

    // language and custom tags survive, keywords are dropped
    assert!(rendered.tags.contains("lang:python"));
    assert!(rendered.tags.contains("question"));
    assert!(!rendered.tags.contains("Python"));
}

#[test]
fn test_keywords_with_jieba() {
    let text = "机器学习的模型。机器学习的评估。机器学习的数据。";
    let conversation = Conversation::new(vec![
        Message::new(Role::User, "机器学习是什么").with_create_time(T0),
        Message::new(Role::Assistant, text).with_create_time(T0 + 1.0),
    ]);
    let tags = assemble_tags(&conversation.messages, &Config::default(), &JiebaAnalyzer::new());
    assert!(tags.iter().any(|t| t.contains("机器") || t.contains("学习")));
}

// =========================================================================
// Batch processing
// =========================================================================

#[test]
fn test_process_export_writes_one_file_per_conversation() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("conversations.json");
    fs::write(&input, sample_export()).unwrap();
    let output = dir.path().join("output");

    let stats = process_export(
        &input,
        &output,
        &Config::default(),
        &FakeAnalyzer::new(),
        &ConversationFilter::new(),
    )
    .unwrap();

    assert_eq!(stats.total, 2);
    assert_eq!(stats.converted(), 2);
    assert!(stats.is_success());
    for path in &stats.written {
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("ChatGPT-"));
        assert!(name.ends_with(".md"));
        assert!(fs::read_to_string(path).unwrap().starts_with("# "));
    }
}

#[test]
fn test_process_export_with_date_filter() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("conversations.json");
    fs::write(&input, sample_export()).unwrap();

    let filter = ConversationFilter::new().with_date_from("2024-01-16").unwrap();
    let stats = process_export(
        &input,
        &dir.path().join("out"),
        &Config::default(),
        &FakeAnalyzer::new(),
        &filter,
    )
    .unwrap();

    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.converted(), 1);
    let name = stats.written[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("ChatGPT-Weekendplansforhiking-"));
}

#[test]
fn test_process_export_rejects_non_array() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("conversations.json");
    fs::write(&input, r#"{"title": "not an array"}"#).unwrap();

    let err = process_export(
        &input,
        &dir.path().join("out"),
        &Config::default(),
        &FakeAnalyzer::new(),
        &ConversationFilter::new(),
    )
    .unwrap_err();
    assert!(err.is_invalid_format());
}

#[test]
fn test_config_file_drives_rendering() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{"user_name": "alice", "user_email": "alice@example.com",
            "features": {"show_statistics": false, "show_tags": false}}"#,
    )
    .unwrap();

    let config = Config::load(&config_path);
    let conversations = parse_export(&sample_export()).unwrap();
    let renderer = MarkdownRenderer::new(&config);
    let rendered = convert_conversation(&conversations[0], &renderer, &FakeAnalyzer::new());

    assert!(rendered.markdown.contains("**User:** alice (alice@example.com)  \n"));
    assert!(!rendered.markdown.contains("### Conversation Statistics"));
    assert!(!rendered.markdown.contains("### Tags"));
    // tags are still computed, only hidden
    assert!(!rendered.tags.is_empty());
}
