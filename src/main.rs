//! Command-line front end: file plumbing around `compress`/`decompress`.

use std::env;
use std::fs;
use std::process;
use std::time::Duration;

use huff::{compress, CodeBook, Decoder, Progress, Reporter};

struct Args {
    mode: Mode,
    file_in: String,
    file_out: String,
    file_dict: String,
}

enum Mode {
    Encode,
    Decode,
}

fn usage() -> ! {
    eprintln!("usage: huff -m <e|d> -i <input> -o <output> -d <codebook>");
    eprintln!("  -m e   encode: write packed payload to -o and codebook to -d");
    eprintln!("  -m d   decode: read payload from -i and codebook from -d");
    process::exit(2);
}

fn parse_args() -> Args {
    let mut mode = None;
    let mut file_in = None;
    let mut file_out = None;
    let mut file_dict = None;

    let mut args = env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = || args.next().unwrap_or_else(|| usage());
        match flag.as_str() {
            "-m" | "--mode" => {
                mode = match value().as_str() {
                    "e" => Some(Mode::Encode),
                    "d" => Some(Mode::Decode),
                    _ => usage(),
                }
            }
            "-i" | "--file-in" => file_in = Some(value()),
            "-o" | "--file-out" => file_out = Some(value()),
            "-d" | "--dict" => file_dict = Some(value()),
            _ => usage(),
        }
    }

    match (mode, file_in, file_out, file_dict) {
        (Some(mode), Some(file_in), Some(file_out), Some(file_dict)) => Args {
            mode,
            file_in,
            file_out,
            file_dict,
        },
        _ => usage(),
    }
}

fn run(args: &Args) -> huff::error::Result<()> {
    match args.mode {
        Mode::Encode => {
            let input = fs::read(&args.file_in)?;
            let (payload, book) = compress(&input)?;
            eprintln!(
                "{} bytes in, {} bytes packed, {} codes",
                input.len(),
                payload.len(),
                book.len()
            );
            // Outputs are written only after the whole encode succeeded.
            fs::write(&args.file_out, &payload)?;
            fs::write(&args.file_dict, book.to_bytes())?;
        }
        Mode::Decode => {
            let payload = fs::read(&args.file_in)?;
            let book = CodeBook::from_bytes(&fs::read(&args.file_dict)?)?;

            let progress = Progress::new();
            let reporter = Reporter::spawn(
                progress.clone(),
                Duration::from_secs(1),
                |consumed, total| eprintln!("progress: {consumed} / {total} bits"),
            );
            let output = Decoder::new(&book).decode_with_progress(&payload, &progress);
            reporter.stop();

            let output = output?;
            eprintln!("{} bytes in, {} bytes out", payload.len(), output.len());
            fs::write(&args.file_out, &output)?;
        }
    }
    Ok(())
}

fn main() {
    let args = parse_args();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}
