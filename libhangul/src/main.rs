use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use libhangul::{
    compose_text, decompose_text, process_text, HangulConfig, HanjaTable, InputContext, KeyEvent,
    MatchKind, OutputMode,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "libhangul", about = "Hangul input engine")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keyboard id (overrides the configured default)
    #[arg(long, short, global = true)]
    keyboard: Option<String>,

    /// Attach a typed consonant to the preceding syllable
    #[arg(long, global = true)]
    idiomatic: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Type key sequences line by line
    Repl {
        /// Print committed text and preedit after every key
        #[arg(long)]
        trace: bool,
    },
    /// Compose a key sequence and print the result
    Compose {
        keys: String,
        /// Emit conjoining jamo instead of syllables
        #[arg(long)]
        jamo: bool,
    },
    /// Print the jamo of every syllable in the text
    Decompose {
        text: String,
        /// Recompose the jamo and print that too
        #[arg(long)]
        roundtrip: bool,
    },
    /// Look up Hanja for a Hangul reading
    Hanja {
        query: String,
        /// Plain `key:value:comment` table
        #[arg(long)]
        table: Option<PathBuf>,
        #[arg(long, default_value = "data/hanja.fst")]
        fst: PathBuf,
        #[arg(long, default_value = "data/hanja.bincode")]
        bincode: PathBuf,
        #[arg(long, value_enum, default_value_t = Mode::Prefix)]
        mode: Mode,
        /// List keys starting with the query instead
        #[arg(long)]
        complete: bool,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List registered keyboards
    Keyboards,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Exact,
    Prefix,
    Suffix,
}

impl From<Mode> for MatchKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Exact => MatchKind::Exact,
            Mode::Prefix => MatchKind::Prefix,
            Mode::Suffix => MatchKind::Suffix,
        }
    }
}

fn load_config(cli: &Cli) -> Result<HangulConfig> {
    let mut config = match &cli.config {
        Some(path) => HangulConfig::load_toml(path)
            .map_err(|e| anyhow::anyhow!("loading {}: {}", path.display(), e))?,
        None => HangulConfig::default(),
    };
    if let Some(id) = &cli.keyboard {
        config.base.default_keyboard = id.clone();
    }
    if cli.idiomatic {
        config.base.idiomatic_input = true;
    }
    Ok(config)
}

fn build_context(config: &HangulConfig) -> Result<InputContext> {
    let registry = Arc::new(config.build_registry()?);
    Ok(InputContext::with_registry(registry, config.base.clone())?)
}

fn load_hanja(table: Option<&Path>, fst: &Path, bincode: &Path, cache_size: usize) -> Result<HanjaTable> {
    let table = match table {
        Some(path) => HanjaTable::load_text(path)?,
        None => HanjaTable::load(fst, bincode)
            .context("no Hanja table (pass --table or convert one with convert_hanja)")?,
    };
    Ok(table.with_cache_size(cache_size))
}

fn repl(mut ctx: InputContext, trace: bool) -> Result<()> {
    println!("keyboard {} ({})", ctx.keyboard_id(), if ctx.idiomatic_input() { "idiomatic" } else { "strict" });
    println!("Type keys and press Enter. `:kb <id>`, `:jamo`, `:syllable`, `:quit`.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            ":quit" | ":q" => break,
            ":jamo" => {
                ctx.set_output_mode(OutputMode::Jamo);
                continue;
            }
            ":syllable" => {
                ctx.set_output_mode(OutputMode::Syllable);
                continue;
            }
            cmd if cmd.starts_with(":kb ") => {
                match ctx.set_keyboard(cmd[4..].trim()) {
                    Ok(()) => println!("keyboard {}", ctx.keyboard_id()),
                    Err(e) => eprintln!("{}", e),
                }
                continue;
            }
            _ => {}
        }

        let mut committed = String::new();
        for c in line.chars() {
            let outcome = ctx.process_key(KeyEvent::Char(c));
            committed.push_str(&outcome.committed_text());
            if trace {
                println!(
                    "  {:?} → commit {:?} preedit {:?}",
                    c,
                    outcome.committed_text(),
                    outcome.preedit_text()
                );
            }
        }
        let outcome = ctx.process_key(KeyEvent::Enter);
        committed.push_str(&outcome.committed_text());
        writeln!(stdout, "{}", committed)?;
        stdout.flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Command::Repl { trace } => repl(build_context(&config)?, *trace)?,
        Command::Compose { keys, jamo } => {
            let mut ctx = build_context(&config)?;
            if *jamo {
                ctx.set_output_mode(OutputMode::Jamo);
            }
            println!("{}", process_text(&mut ctx, keys));
        }
        Command::Decompose { text, roundtrip } => {
            let jamo = decompose_text(text);
            let code_points: Vec<String> = jamo.chars().map(|c| format!("U+{:04X}", c as u32)).collect();
            println!("{}", code_points.join(" "));
            if *roundtrip {
                println!("{}", compose_text(&jamo));
            }
        }
        Command::Hanja {
            query,
            table,
            fst,
            bincode,
            mode,
            complete,
            limit,
        } => {
            let table = load_hanja(table.as_deref(), fst, bincode, config.hanja_cache_size)?;
            if *complete {
                for key in table.complete(query).into_iter().take(*limit) {
                    println!("{}", key);
                }
            } else {
                let list = table.lookup(query, (*mode).into());
                if list.is_empty() {
                    println!("(no Hanja for {})", query);
                }
                for (i, h) in list.iter().enumerate().take(*limit) {
                    if h.comment.is_empty() {
                        println!("{:>2}. {} [{}]", i + 1, h.value, h.key);
                    } else {
                        println!("{:>2}. {} [{}] {}", i + 1, h.value, h.key, h.comment);
                    }
                }
            }
        }
        Command::Keyboards => {
            let registry = config.build_registry()?;
            for id in registry.ids() {
                let keyboard = registry.get(&id)?;
                let marker = if id == config.base.default_keyboard { "*" } else { " " };
                println!("{} {:<4} {} ({} keys)", marker, id, keyboard.name(), keyboard.len());
            }
        }
    }
    Ok(())
}
