//! jpegls16 CLI - lossless JPEG-LS compression of raw 16-bit sample planes.

use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, debug, info};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use jpegls16::codec::{Codec, codecs};
use jpegls16::{JpeglsCodec, read_frame_info};

/// Lossless JPEG-LS codec for raw 16-bit images and volumes
#[derive(Parser)]
#[command(name = "jpegls16")]
#[command(version)]
#[command(about = "Compress and decompress raw 16-bit samples with JPEG-LS", long_about = None)]
#[command(after_help = "EXAMPLES:
    jpegls16 encode -i slice.raw -o slice.2.jls -w 512 -H 512
    jpegls16 encode -i volume.raw -o volume.2.jls -w 256 -H 256 -d 64 --endian big
    jpegls16 decode -i volume.2.jls -o volume.raw -d 64
    jpegls16 info -i volume.2.jls")]
struct Cli {
    /// Log progress (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode raw 16-bit samples to JPEG-LS
    #[command(visible_alias = "e")]
    Encode {
        /// Raw sample file: depth planes of width x height samples
        #[arg(short, long)]
        input: PathBuf,

        /// Output JPEG-LS file
        #[arg(short, long)]
        output: PathBuf,

        /// Plane width in samples
        #[arg(short, long)]
        width: usize,

        /// Plane height in samples
        #[arg(short = 'H', long)]
        height: usize,

        /// Number of planes
        #[arg(short, long, default_value = "1")]
        depth: usize,

        /// Byte order of the raw samples
        #[arg(long, default_value = "little", value_enum)]
        endian: Endian,
    },

    /// Decode a JPEG-LS file to raw 16-bit samples
    #[command(visible_alias = "d")]
    Decode {
        /// Input JPEG-LS file
        #[arg(short, long)]
        input: PathBuf,

        /// Output raw sample file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of planes stacked in the frame
        #[arg(short, long, default_value = "1")]
        depth: usize,

        /// Byte order of the raw samples
        #[arg(long, default_value = "little", value_enum)]
        endian: Endian,
    },

    /// Display the frame header of a JPEG-LS file
    #[command(visible_alias = "i")]
    Info {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List the available codecs
    #[command(visible_alias = "l")]
    List,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Endian {
    Little,
    Big,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            width,
            height,
            depth,
            endian,
        } => encode_file(&input, &output, width, height, depth, endian),
        Commands::Decode {
            input,
            output,
            depth,
            endian,
        } => decode_file(&input, &output, depth, endian),
        Commands::Info { input } => show_info(&input),
        Commands::List => list_codecs(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

fn encode_file(
    input: &PathBuf,
    output: &PathBuf,
    width: usize,
    height: usize,
    depth: usize,
    endian: Endian,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let samples = bytes_to_samples(&bytes, endian)?;
    debug!("read {} samples from {:?}", samples.len(), input);

    let start = Instant::now();
    let encoded = JpeglsCodec.compress(&samples, width, height, depth)?;
    info!("compressed in {:?}", start.elapsed());

    fs::write(output, &encoded)?;
    println!(
        "✓ Encoded {}x{}x{} samples to {:?}: {} -> {} bytes ({:.2}:1)",
        width,
        height,
        depth,
        output,
        bytes.len(),
        encoded.len(),
        bytes.len() as f64 / encoded.len() as f64
    );
    Ok(())
}

fn decode_file(
    input: &PathBuf,
    output: &PathBuf,
    depth: usize,
    endian: Endian,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let frame_info = read_frame_info(&data)?;
    let width = frame_info.width as usize;
    let frame_height = frame_info.height as usize;
    if depth == 0 || frame_height % depth != 0 {
        return Err(format!(
            "frame height {} is not a multiple of depth {}",
            frame_height, depth
        )
        .into());
    }
    let height = frame_height / depth;

    let start = Instant::now();
    let mut image = vec![0u16; width * frame_height];
    JpeglsCodec.decompress(&data, &mut image, width, height, depth)?;
    info!("decompressed in {:?}", start.elapsed());

    fs::write(output, samples_to_bytes(&image, endian))?;
    println!(
        "✓ Decoded {}x{}x{} samples to {:?}",
        width, height, depth, output
    );
    Ok(())
}

fn show_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let frame_info = read_frame_info(&data)?;

    println!("File: {:?}", input);
    println!("Size: {} bytes", data.len());
    println!();
    println!("Format: JPEG-LS (lossless)");
    println!("  Dimensions: {}x{}", frame_info.width, frame_info.height);
    println!("  Bit depth:  {} bits", frame_info.bits_per_sample);
    println!("  Components: {}", frame_info.component_count);
    let raw_size = frame_info.width as usize * frame_info.height as usize * 2;
    println!(
        "  Ratio:      {:.2}:1",
        raw_size as f64 / data.len() as f64
    );
    Ok(())
}

fn list_codecs() -> Result<(), Box<dyn std::error::Error>> {
    println!("Supported Codecs:");
    println!();
    for codec in codecs() {
        println!("  {} ({})", codec.name(), codec.extension());
        println!("    Standard: ISO/IEC 14495-1 / ITU-T T.87");
        println!("    Samples:  16-bit, single component, lossless");
        println!("    Encode:   ✓  Decode: ✓");
        println!();
    }
    Ok(())
}

// Internal helpers

fn bytes_to_samples(bytes: &[u8], endian: Endian) -> Result<Vec<u16>, Box<dyn std::error::Error>> {
    if bytes.len() % 2 != 0 {
        return Err(format!("raw input has an odd length of {} bytes", bytes.len()).into());
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            match endian {
                Endian::Little => u16::from_le_bytes(pair),
                Endian::Big => u16::from_be_bytes(pair),
            }
        })
        .collect())
}

fn samples_to_bytes(samples: &[u16], endian: Endian) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&sample| match endian {
            Endian::Little => sample.to_le_bytes(),
            Endian::Big => sample.to_be_bytes(),
        })
        .collect()
}
