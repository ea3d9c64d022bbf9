//! pdfwrap – command-line text/JSON → PDF writer.
//!
//! Usage:
//!   pdfwrap <input> [output.pdf] [--orientation P] [--unit mm] [--format A4]
//!           [--encoding UTF-8] [--conformance none] [--no-unicode]
//!           [--title T] [--author A] [--creator C] [--stdout]
//!
//! A `.json` input is read as page content; anything else is flowed as plain
//! text. If `output.pdf` is omitted the PDF is written next to the input file
//! with the same stem.

use std::io::{self, Write};
use std::{env, fs, path::PathBuf, process};

use pdfwrap::{flow_text, DocumentContent, DocumentEmitter, DocumentOptions, EmitterDefaults};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut options = DocumentOptions::default();
    let mut author: Option<String> = None;
    let mut creator: Option<String> = None;
    let mut title: Option<String> = None;
    let mut to_stdout = false;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        let mut value = || match iter.next() {
            Some(v) => v.clone(),
            None => {
                eprintln!("Missing value for {flag}");
                print_usage(&args[0]);
                process::exit(1);
            }
        };
        match flag {
            "--orientation" | "-o" => options.orientation = value(),
            "--unit" | "-u" => options.unit = value(),
            "--format" | "-f" => options.format = value(),
            "--encoding" => options.encoding = value(),
            "--conformance" => options.conformance = value(),
            "--no-unicode" => options.use_unicode = false,
            "--title" | "-t" => title = Some(value()),
            "--author" | "-a" => author = Some(value()),
            "--creator" => creator = Some(value()),
            "--stdout" => to_stdout = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no input file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let mut emitter: DocumentEmitter =
        match DocumentEmitter::from_options(&options, EmitterDefaults::default()) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        };

    let source = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let is_json = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let content = if is_json {
        match DocumentContent::from_json(&source) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error parsing '{}': {e}", input.display());
                process::exit(1);
            }
        }
    } else {
        flow_text(&source, emitter.config())
    };
    emitter.engine_mut().set_content(content);

    // Default title: stem of the input filename.
    let title = title.or_else(|| {
        input
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
    });
    emitter.set_document_information(author.as_deref(), creator.as_deref(), title.as_deref());

    if to_stdout {
        let bytes = match emitter.get_bytes() {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Error generating PDF: {e}");
                process::exit(1);
            }
        };
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(&bytes).and_then(|_| stdout.flush()) {
            eprintln!("Error writing to stdout: {e}");
            process::exit(1);
        }
        return;
    }

    // Default output: same directory + same stem as input, but with .pdf
    let output = output_path.unwrap_or_else(|| {
        let mut o = input.clone();
        o.set_extension("pdf");
        o
    });

    match emitter.save_to_disk(&output) {
        Ok(()) => {}
        Err(e) if !e.is_fatal() => eprintln!("Warning: {e}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    let pages = emitter.engine().content().pages.len().max(1);
    eprintln!(
        "Wrote '{}' ({} page{})",
        output.display(),
        pages,
        if pages == 1 { "" } else { "s" }
    );
}

fn print_usage(prog: &str) {
    eprintln!("pdfwrap – text/JSON to PDF writer");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <input> [output.pdf] [options]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <input>        Plain text file, or .json page content");
    eprintln!("  [output.pdf]   Output path  (default: same stem as input with .pdf)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --orientation, -o   portrait | landscape (P/L)       [portrait]");
    eprintln!("  --unit, -u          mm | cm | in | pt                 [mm]");
    eprintln!("  --format, -f        A4, LETTER, LEGAL, ...            [A4]");
    eprintln!("  --encoding          UTF-8 | ISO-8859-1 | WINDOWS-1252 [UTF-8]");
    eprintln!("  --conformance       none | 1 | 2 | 3 (PDF/A level)    [none]");
    eprintln!("  --no-unicode        Declare non-Unicode input (text is always written as WinAnsi)");
    eprintln!("  --title, -t         Document title (default: input filename stem)");
    eprintln!("  --author, -a        Document author");
    eprintln!("  --creator           Document creator");
    eprintln!("  --stdout            Write the PDF to stdout instead of a file");
    eprintln!("  --help              Print this message");
}
