//! Subcommand handlers.
//!
//! Handlers write to any `io::Write` so the binary prints to stdout and tests
//! capture into a buffer.

use std::io::{self, Write};

use langfile::i18n::Translator;

use crate::args::Command;

/// What: Run a parsed subcommand against a translator.
///
/// Inputs:
/// - `command`: Subcommand to run
/// - `translator`: Translator built from the resolved settings
/// - `out`: Destination for the command's output
///
/// # Errors
/// - Returns the I/O error when writing to `out` fails
pub fn run(command: &Command, translator: &Translator, out: &mut impl Write) -> io::Result<()> {
    match command {
        Command::List => handle_list(translator, out),
        Command::Get { lang, keys } => handle_get(translator, lang, keys, out),
        Command::Show { lang } => handle_show(translator, lang, out),
    }
}

/// Print one `lang<TAB>name<TAB>version<TAB>key-count` line per dictionary.
fn handle_list(translator: &Translator, out: &mut impl Write) -> io::Result<()> {
    let files = translator.lang_files();
    tracing::debug!(count = files.len(), root = %translator.root_path().display(), "listing dictionaries");
    for file in &files {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            file.lang(),
            file.name(),
            file.version(),
            file.len()
        )?;
    }
    Ok(())
}

/// Print the translation of each key, one per line, in argument order.
fn handle_get(
    translator: &Translator,
    lang: &str,
    keys: &[String],
    out: &mut impl Write,
) -> io::Result<()> {
    let file = translator.get_lang_file(lang);
    for key in keys {
        writeln!(out, "{}", file.t(key))?;
    }
    Ok(())
}

/// Print the metadata of the resolved dictionary followed by its entries sorted by key.
fn handle_show(translator: &Translator, lang: &str, out: &mut impl Write) -> io::Result<()> {
    let file = translator.get_lang_file(lang);
    writeln!(out, "lang: {}", file.lang())?;
    writeln!(out, "name: {}", file.name())?;
    writeln!(out, "version: {}", file.version())?;
    writeln!(out, "entries: {}", file.len())?;

    let mut entries: Vec<(&String, &String)> = file.dict().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in entries {
        writeln!(out, "{key}\t{value}")?;
    }
    Ok(())
}
