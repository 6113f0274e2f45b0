//! Example: Using chatmd as a library
//!
//! This example demonstrates the pieces of the pipeline on an in-memory export.
//!
//! Run with: cargo run --example library_usage

use std::collections::BTreeSet;

use chatmd::core::MarkdownRenderer;
use chatmd::prelude::*;

const EXPORT: &str = r#"[{
    "title": "Database indexes",
    "create_time": 1705314600,
    "update_time": 1705315200,
    "mapping": {
        "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["How do database indexes speed up queries? インデックスの仕組みは？"]}, "create_time": 1705314601}},
        "b": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["Indexes keep sorted keys. インデックスはB木です。インデックスを使うと速い。\n```sql\nCREATE INDEX idx ON t(col);\n```"]}, "create_time": 1705314700}}
    }
}]"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== chatmd Library Usage Examples ===\n");

    // Example 1: Parse an export
    println!("1. Parsing an export:");
    let conversations = parse_export(EXPORT)?;
    let conversation = &conversations[0];
    for msg in &conversation.messages {
        println!("   {}: {} characters", msg.role, msg.length);
    }

    // Example 2: Configure
    println!("\n2. Configuration with overrides:");
    let config = Config::from_json_str(r#"{"keyword_settings": {"min_frequency": 2}}"#)?
        .with_user_name("demo")
        .with_custom_tag("database", ["index", "query", "sql"]);
    println!("   min_frequency = {}", config.keyword_settings.min_frequency);
    println!("   custom tags   = {:?}", config.custom_tags.keys().collect::<Vec<_>>());

    // Example 3: Keywords for a single message
    println!("\n3. Keywords of the assistant reply:");
    let analyzer = JiebaAnalyzer::new();
    let extractor = KeywordExtractor::new(&analyzer, &config);
    let title = conversation.derived_title();
    let keywords = extractor.extract(&conversation.messages[1].text, title.as_deref());
    println!("   {:?}", keywords);

    // Example 4: Conversation tags
    println!("\n4. Conversation tags:");
    let tags: BTreeSet<String> = assemble_tags(&conversation.messages, &config, &analyzer);
    println!("   {}", tags.iter().map(|t| format!("#{t}")).collect::<Vec<_>>().join(" "));

    // Example 5: Render
    println!("\n5. Rendered Markdown:");
    let markdown = MarkdownRenderer::new(&config).render(conversation, &tags);
    for line in markdown.lines().take(12) {
        println!("   {}", line);
    }

    println!(
        "\n   -> {}",
        generate_filename(&conversation.display_title(), conversation.create_time)
    );

    println!("\n=== Done ===");
    Ok(())
}
