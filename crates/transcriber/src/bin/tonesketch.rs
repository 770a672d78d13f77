use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tonesketch_audio::is_supported_input;
use tonesketch_domain::{LimitMethod, TranscriptionConfig};
use tonesketch_transcriber::{
    CArrayExporter, ExportFormat, JsonExporter, MelodyExporter, TranscriptionPipeline,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Transcribe a recorded melody into tone-sketch arrays", long_about = None)]
struct Cli {
    /// Path to the recorded melody (mp3, wav, flac, ogg, m4a, aac)
    input: Option<PathBuf>,
    /// Tempo in beats per minute used for duration quantization
    #[arg(long, default_value_t = TranscriptionConfig::DEFAULT_TEMPO_BPM)]
    tempo: f64,
    /// Maximum number of output notes; unlimited when omitted
    #[arg(long)]
    max_size: Option<usize>,
    /// How to fit an over-long melody: truncate or downsample
    #[arg(long, default_value = "truncate")]
    method: String,
    /// Output format: c-array or json
    #[arg(long, default_value = "c-array")]
    format: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let Some(input) = cli.input else {
        Cli::command().print_help()?;
        return Ok(());
    };
    if !is_supported_input(&input) {
        eprintln!("{:?} is not a supported audio file, nothing to do", input);
        return Ok(());
    }

    let method: LimitMethod = cli.method.parse()?;
    let format: ExportFormat = cli.format.parse()?;
    let config = TranscriptionConfig::new(cli.tempo, cli.max_size, method)?;
    let pipeline = TranscriptionPipeline::new(config);

    match pipeline.transcribe_file(&input)? {
        Some(melody) => {
            let bytes = match format {
                ExportFormat::CArray => CArrayExporter.export(&melody, format)?,
                ExportFormat::Json => JsonExporter.export(&melody, format)?,
            };
            std::io::stdout().write_all(&bytes)?;
        }
        None => println!("no pitches detected in {:?}", input),
    }
    Ok(())
}
