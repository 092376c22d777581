use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process::exit;

use clap::error::ErrorKind;
use log::{debug, error, trace};

use bmpglyph::{DecodeRequest, Unstoppable};

use crate::cli::{CliError, CmdOptions, Metadata};

mod cli;

fn main() {
    let options = match cli::create_cmd_args().try_get_matches() {
        Ok(options) => options,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Wrong argument count or a malformed option: usage, status 1.
            let _ = e.print();
            exit(1);
        }
    };

    let logging = cli::setup_logger(&options).is_ok();
    let parsed_opts = cli::parse_options(&options);

    let result = if parsed_opts.probe {
        probe(&parsed_opts)
    } else {
        draw(&parsed_opts)
    };

    if let Err(e) = result {
        if logging {
            error!("{}: {}", parsed_opts.input.display(), e);
        } else {
            eprintln!("{}: {}", parsed_opts.input.display(), e);
        }
        exit(1);
    }

    if parsed_opts.pause {
        pause();
    }
}

fn probe(opts: &CmdOptions) -> Result<(), CliError> {
    let file = BufReader::new(File::open(&opts.input).map_err(bmpglyph::BitmapError::from)?);
    let info = bmpglyph::probe(file)?;
    let metadata = Metadata::new(&opts.input, &info);
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

fn draw(opts: &CmdOptions) -> Result<(), CliError> {
    let file = File::open(&opts.input).map_err(bmpglyph::BitmapError::from)?;
    let decoded = DecodeRequest::new(BufReader::new(file))
        .with_limits(&opts.limits)
        .decode(Unstoppable)?;

    debug!(
        "Decoded {}x{} {}-bit image, pixel data at offset {}",
        decoded.width,
        decoded.height,
        decoded.bits_per_pixel(),
        decoded.file_header.offset_data
    );
    trace!("Info header: {:?}", decoded.info_header);

    let grid = decoded.render(opts.glyphs, Unstoppable)?;
    debug!("Rendered {} rows of {} glyphs", grid.height(), grid.width());

    let stdout = io::stdout();
    match grid.write_to(BufWriter::new(stdout.lock())) {
        Ok(()) => Ok(()),
        // Downstream consumer closed the pipe (`bmpglyph x.bmp | head`).
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn pause() {
    print!("Press Enter to continue...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
