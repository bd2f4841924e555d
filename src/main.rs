//! bookprint - Split an HTML document into a linked multi-page book

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bookprint::{Book, ExportOptions, NumberingStyle, Options, ReferenceMode};

#[derive(Parser)]
#[command(name = "bookprint")]
#[command(version, about = "Split an HTML document into a linked multi-page book", long_about = None)]
#[command(after_help = "EXAMPLES:
    bookprint manual.html                  Write pages to ./out
    bookprint -o site -s assets doc.html   Write pages to ./site with assets copied in
    bookprint -t theme manual.html         Use page templates from ./theme
    pandoc doc.md -s | bookprint           Read from stdin
    bookprint -i manual.html               Show the numbered outline")]
struct Cli {
    /// Input HTML file; omit or use '-' to read stdin
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output directory (removed and recreated)
    #[arg(short, long, value_name = "DIR", default_value = "out")]
    output_dir: PathBuf,

    /// Directory whose contents are copied into the output
    #[arg(short, long, value_name = "DIR")]
    static_dir: Option<PathBuf>,

    /// Directory of page templates (index.html, map.html, page.html, layout.html)
    #[arg(short, long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Show metadata and outline without writing pages
    #[arg(short, long)]
    info: bool,

    /// Print the converted book as JSON without writing pages
    #[arg(long, conflicts_with = "info")]
    json: bool,

    /// Reset the level-3 counter on every h1
    #[arg(long)]
    strict_numbering: bool,

    /// Fail on cross-references that cannot be decoded
    #[arg(long)]
    strict_references: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), bookprint::Error> {
    let book = load(cli)?;

    if cli.info {
        show_info(&book);
        return Ok(());
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&book)
            .map_err(|e| bookprint::Error::Serialization(e.into()))?;
        println!("{json}");
        return Ok(());
    }

    let mut export = ExportOptions::new(&cli.output_dir);
    if let Some(dir) = &cli.static_dir {
        export = export.with_static_dir(dir);
    }
    if let Some(dir) = &cli.template_dir {
        export = export.with_template_dir(dir);
    }
    bookprint::write_book(&book, &export)?;

    if !cli.quiet {
        println!(
            "Created book in '{}' directory",
            cli.output_dir.display()
        );
    }
    Ok(())
}

fn load(cli: &Cli) -> Result<Book, bookprint::Error> {
    let mut options = Options::new();
    if cli.strict_numbering {
        options = options.with_numbering(NumberingStyle::Strict);
    }
    if cli.strict_references {
        options = options.with_references(ReferenceMode::Strict);
    }

    match cli.input.as_deref() {
        None | Some("-") => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            Book::from_bytes(&bytes, options)
        }
        Some(path) => Book::open(path, options),
    }
}

fn show_info(book: &Book) {
    let meta = &book.metadata;
    println!("Title: {}", meta.title);
    if !meta.author.is_empty() {
        println!("Author: {}", meta.author);
    }
    if !meta.date.is_empty() {
        println!("Date: {}", meta.date);
    }
    println!("Sections: {}", book.sections.len());

    for section in &book.sections {
        let indent = "  ".repeat(usize::from(section.level.saturating_sub(1)));
        if section.title.prefix.is_empty() {
            println!("{indent}{}  [{}]", section.title.text, section.path);
        } else {
            println!(
                "{indent}{} {}  [{}]",
                section.title.prefix, section.title.text, section.path
            );
        }
    }
}
