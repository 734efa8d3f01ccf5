//! Contactbook command-line entry point.
//!
//! # Responsibility
//! - Parse flags, then run add → filter → serialize → display in that order.
//! - Own all terminal I/O; the core only returns values.

use clap::{CommandFactory, Parser};
use contactbook_core::{default_log_level, init_logging, RecordStore};
use log::error;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const NO_MATCHES_MESSAGE: &str = "No matching data was found, please try again";

/// Personal Data Manager
#[derive(Debug, Parser)]
#[command(name = "contactbook", version, about = "Personal Data Manager", long_about = None)]
struct Cli {
    /// Add a new record (Name, Address, Phone)
    #[arg(long, help_heading = "Actions")]
    add: bool,

    /// Filter records with `field=glob[,field=glob...]`
    #[arg(long, value_name = "QUERY", help_heading = "Filters and Queries")]
    filter: Option<String>,

    /// Serialize records (json, yaml, csv)
    #[arg(long, value_name = "FORMAT", help_heading = "Output Options")]
    serialize: Option<String>,

    /// Display records (text, html)
    #[arg(long, value_name = "FORMAT", help_heading = "Output Options")]
    display: Option<String>,

    /// File to read and save records
    #[arg(long, default_value = "personal_data.json")]
    filename: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "CONTACTBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, env = "CONTACTBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    if std::env::args_os().len() == 1 {
        // Help output failing is not actionable.
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &absolute_dir(log_dir)?)?;
    }

    let mut store = RecordStore::load(cli.filename.clone())?;
    if store.started_empty() {
        write_missing_file_notice(&mut io::stdout(), store.location())?;
    }

    if cli.add {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        let name = prompt(&mut input, &mut output, "Name: ")?;
        let address = prompt(&mut input, &mut output, "Address: ")?;
        let phone_number = prompt(&mut input, &mut output, "Phone number: ")?;
        store.add_record(name, address, phone_number)?;
        println!("Records saved to '{}'.", store.location().display());
    }

    if let Some(query) = &cli.filter {
        let matched = store.filter(query)?;
        if matched.is_empty() {
            println!("{NO_MATCHES_MESSAGE}");
        } else {
            println!("Filtered Records:");
            for record in matched {
                println!("{}", serde_json::to_string(record)?);
            }
        }
    }

    if let Some(format) = &cli.serialize {
        println!("{}", store.serialize(format)?);
    }

    if let Some(format) = &cli.display {
        println!("{}", store.display(format));
    }

    Ok(())
}

/// Missing backing files are a notice on stdout, not an error.
fn write_missing_file_notice<W: Write>(output: &mut W, path: &Path) -> io::Result<()> {
    writeln!(
        output,
        "File '{}' not found. Starting with an empty dataset.",
        path.display()
    )
}

/// Writes `label` and reads one line, without the trailing newline.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    output.write_all(label.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("input closed before `{}` was entered", label.trim_end_matches([':', ' '])),
        ));
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(line)
}

fn absolute_dir(dir: &Path) -> io::Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(dir))
}

#[cfg(test)]
mod tests {
    use super::{absolute_dir, prompt, write_missing_file_notice, Cli};
    use clap::{CommandFactory, Parser};
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn filename_defaults_to_personal_data_json() {
        let cli = Cli::try_parse_from(["contactbook", "--display", "text"]).unwrap();
        assert_eq!(cli.filename, PathBuf::from("personal_data.json"));
        assert_eq!(cli.display.as_deref(), Some("text"));
        assert!(!cli.add);
    }

    #[test]
    fn prompt_writes_label_and_strips_line_ending() {
        let mut input = Cursor::new("Ada Lovelace\r\n12 Analytical Rd\n");
        let mut output = Vec::new();

        let name = prompt(&mut input, &mut output, "Name: ").unwrap();
        let address = prompt(&mut input, &mut output, "Address: ").unwrap();

        assert_eq!(name, "Ada Lovelace");
        assert_eq!(address, "12 Analytical Rd");
        assert_eq!(String::from_utf8(output).unwrap(), "Name: Address: ");
    }

    #[test]
    fn prompt_keeps_empty_answers() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        assert_eq!(prompt(&mut input, &mut output, "Phone number: ").unwrap(), "");
    }

    #[test]
    fn prompt_fails_on_closed_input() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let err = prompt(&mut input, &mut output, "Phone number: ").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
        assert!(err.to_string().contains("Phone number"));
    }

    #[test]
    fn missing_file_notice_names_the_path() {
        let mut output = Vec::new();
        write_missing_file_notice(&mut output, Path::new("contacts.json")).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "File 'contacts.json' not found. Starting with an empty dataset.\n"
        );
    }

    #[test]
    fn absolute_dir_keeps_absolute_paths() {
        let dir = std::env::temp_dir();
        assert_eq!(absolute_dir(&dir).unwrap(), dir);
        assert!(absolute_dir(Path::new("logs")).unwrap().is_absolute());
    }
}
