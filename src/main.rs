//! # chatmd CLI
//!
//! Command-line interface for the chatmd library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatmd::cli::Args;
use chatmd::core::{MarkdownRenderer, convert_conversation, write_conversations};
use chatmd::parser::ChatGptParser;
use chatmd::tagging::{Analyzer, select_analyzer};
use chatmd::{ChatmdError, Config};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.log_level());

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatmd={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatmdError> {
    let total_start = Instant::now();
    let config = Config::load(&args.config);

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let filter = args.filter()?;

    println!("📦 chatmd v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", args.output);
    println!("⚙️  Config:  {}", args.config);
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    if let Some(ref title) = args.title {
        println!("🔎 Title:   {}", title);
    }
    if args.dry_run {
        println!("🧪 Mode:    Dry run");
    }
    println!();

    let parser = ChatGptParser::new();
    println!("⏳ Parsing {}...", parser.name());
    let parse_start = Instant::now();
    let conversations = parser.parse(Path::new(&args.input))?;
    println!(
        "   Found {} conversations ({:.2}s)",
        conversations.len(),
        parse_start.elapsed().as_secs_f64()
    );

    println!("📚 Loading dictionary...");
    let analyzer = select_analyzer(args.dictionary.as_deref())?;
    println!("   Analyzer: {}", analyzer.name());
    let renderer = MarkdownRenderer::new(&config);

    if args.dry_run {
        let mut selected = 0;
        for conversation in conversations.iter().filter(|c| filter.matches(c)) {
            let rendered = convert_conversation(conversation, &renderer, analyzer.as_ref());
            let tags: Vec<String> = rendered.tags.iter().map(|t| format!("#{t}")).collect();
            println!("   {}  {}", rendered.filename, tags.join(" "));
            selected += 1;
        }
        println!();
        println!("✅ Dry run: {} of {} conversations would be written", selected, conversations.len());
        return Ok(());
    }

    let output_dir = Path::new(&args.output);

    println!("✍️  Converting...");
    let convert_start = Instant::now();
    let stats = write_conversations(&conversations, output_dir, &renderer, analyzer.as_ref(), &filter)?;
    for path in &stats.written {
        println!("Created: {}", path.display());
    }
    let convert_time = convert_start.elapsed();

    println!();
    println!("✅ Done! Output saved to {}", output_dir.display());

    println!();
    println!("📊 Summary:");
    println!("   Found:     {} conversations", stats.total);
    if filter.is_active() {
        println!("   Skipped:   {} (filtered out)", stats.skipped);
    }
    println!("   Written:   {} files", stats.converted());
    if !stats.is_success() {
        println!("   Failed:    {}", stats.failed.len());
        for (index, message) in &stats.failed {
            println!("     #{}: {}", index, message);
        }
    }

    println!();
    println!("⚡ Performance:");
    println!("   Convert time: {:.2}s", convert_time.as_secs_f64());
    println!("   Total time:   {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
