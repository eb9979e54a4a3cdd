use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use lekhak::draft::DraftStore;
use lekhak::export;
use lekhak::story;

#[derive(Parser, Debug)]
#[command(name = "lekhak")]
#[command(about = "Draft tools for the বাংলা লেখক AI writing studio", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the saved draft
    Show,
    /// Word and reading-time statistics for the saved draft
    Stats,
    /// Export the saved draft to a file
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Target file (defaults to a name derived from the title)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Delete the saved draft
    Clear,
    /// Print the path of the draft file
    Path,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum ExportFormat {
    /// Print-ready HTML page
    Print,
    /// Word-compatible document
    Word,
    /// Plain text
    Text,
}

fn cmd_show(store: &DraftStore) -> Result<(), String> {
    let draft = store.load();

    if draft.title.is_empty() && draft.content.is_empty() {
        println!("(empty)");
        return Ok(());
    }

    if !draft.title.is_empty() {
        println!("{}", draft.title);
        println!();
    }
    println!("{}", draft.content);
    Ok(())
}

fn cmd_stats(store: &DraftStore) -> Result<(), String> {
    let draft = store.load();
    let stats = story::text_stats(&draft.content);

    println!("words:        {}", stats.words);
    println!("characters:   {}", stats.graphemes);
    println!("reading time: {} min", stats.reading_minutes);
    if let Some(saved_at) = &draft.saved_at {
        println!("saved at:     {}", saved_at);
    }
    Ok(())
}

fn cmd_export(
    format: ExportFormat,
    out: Option<PathBuf>,
    store: &DraftStore,
) -> Result<(), String> {
    let draft = store.load();
    if draft.title.is_empty() && draft.content.is_empty() {
        return Err("Nothing to export, the draft is empty".to_string());
    }

    let extension = match format {
        ExportFormat::Print => "html",
        ExportFormat::Word => "doc",
        ExportFormat::Text => "txt",
    };
    let path =
        out.unwrap_or_else(|| PathBuf::from(export::export_file_name(&draft.title, extension)));

    let bytes = match format {
        ExportFormat::Print => export::print_html(&draft.title, &draft.content).into_bytes(),
        ExportFormat::Word => export::word_doc_bytes(&draft.title, &draft.content),
        ExportFormat::Text => export::plain_text(&draft.title, &draft.content).into_bytes(),
    };

    export::write_export(&path, &bytes)?;
    println!("Exported to {}", path.display());
    Ok(())
}

fn cmd_clear(store: &DraftStore) -> Result<(), String> {
    store.clear()?;
    println!("Draft deleted.");
    Ok(())
}

fn cmd_path(store: &DraftStore) -> Result<(), String> {
    println!("{}", store.path().display());
    Ok(())
}

fn main() {
    let args = Args::parse();

    let store = match DraftStore::open_default() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Some(Commands::Show) | None => cmd_show(&store),
        Some(Commands::Stats) => cmd_stats(&store),
        Some(Commands::Export { format, out }) => cmd_export(format, out, &store),
        Some(Commands::Clear) => cmd_clear(&store),
        Some(Commands::Path) => cmd_path(&store),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
