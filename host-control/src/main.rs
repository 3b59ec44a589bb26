mod error;
mod frame;
mod link;
mod recorder;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::{error, info};

use crate::error::Result;
use crate::link::Link;

/// Records accelerometer frames streamed by the board over serial
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// enable debug messages
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available serial ports
    Ports,

    /// Sample frames and save them as CSV
    Record {
        /// serial port to read from
        #[arg(short, long)]
        port: String,

        #[arg(short, long, default_value_t = 9600)]
        baud: u32,

        /// sampling time in seconds
        #[arg(short, long, default_value_t = 10)]
        duration: u64,

        /// CSV file to write, defaults to a timestamped name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a string to the device
    Send {
        /// serial port to write to
        #[arg(short, long)]
        port: String,

        #[arg(short, long, default_value_t = 9600)]
        baud: u32,

        text: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter(None, log::LevelFilter::Debug);
    } else {
        builder.filter(None, log::LevelFilter::Info);
    }
    builder.init();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Ports => {
            let ports = link::list_ports()?;
            if ports.is_empty() {
                info!("no serial ports found");
            }
            for port in ports {
                println!("{port}");
            }
        }
        Command::Record {
            port,
            baud,
            duration,
            output,
        } => {
            let mut link = Link::open(&port, baud)?;
            let frames = link.sample(Duration::from_secs(duration))?;

            let path = output.unwrap_or_else(recorder::default_path);
            let mut out = BufWriter::new(File::create(&path)?);
            recorder::write_csv(&mut out, &frames)?;
            info!("saved {} rows to {}", frames.len(), path.display());
        }
        Command::Send { port, baud, text } => {
            Link::open(&port, baud)?.send(&text)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let args = Args::parse_from(["host-control", "record", "--port", "/dev/rfcomm0"]);
        match args.command {
            Command::Record {
                port,
                baud,
                duration,
                output,
            } => {
                assert_eq!(port, "/dev/rfcomm0");
                assert_eq!(baud, 9600);
                assert_eq!(duration, 10);
                assert_eq!(output, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(!args.verbose);
    }

    #[test]
    fn test_send_with_verbose() {
        let args = Args::parse_from(["host-control", "-v", "send", "-p", "COM3", "-b", "115200", "r"]);
        assert!(args.verbose);
        match args.command {
            Command::Send { port, baud, text } => {
                assert_eq!(port, "COM3");
                assert_eq!(baud, 115200);
                assert_eq!(text, "r");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
