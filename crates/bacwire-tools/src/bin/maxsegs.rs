use bacwire_core::apdu::{decode_max_segs_max_apdu, encode_max_segs_max_apdu};
use bacwire_tools::ToolError;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bacnet-maxsegs")]
struct Args {
    #[arg(long, default_value_t = 0)]
    max_segments: u32,
    #[arg(long, default_value_t = 1476)]
    max_apdu: u32,
    /// Decode this octet instead of encoding one.
    #[arg(long, value_parser = parse_octet)]
    octet: Option<u8>,
}

fn parse_octet(text: &str) -> Result<u8, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    match args.octet {
        Some(octet) => {
            let (segments, apdu) = decode_max_segs_max_apdu(octet).map_err(ToolError::from)?;
            match segments.count() {
                Some(n) => println!("max segments: {n}, max apdu: {}", apdu.max_len()),
                None => println!("max segments: {segments:?}, max apdu: {}", apdu.max_len()),
            }
        }
        None => {
            let octet = encode_max_segs_max_apdu(args.max_segments, args.max_apdu);
            println!("0x{octet:02X}");
        }
    }
    Ok(())
}
