use bacwire_core::encoding::reader::Reader;
use bacwire_core::npdu::Npdu;
use bacwire_core::value_codec::ApplicationValues;
use bacwire_tools::{parse_hex, ToolError};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bacnet-decode")]
struct Args {
    /// Hex octets, separators allowed.
    hex: String,
    /// Decode an NPDU header before the values.
    #[arg(long)]
    npdu: bool,
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let bytes = parse_hex(&args.hex)?;
    let mut r = Reader::new(&bytes);

    let npdu = if args.npdu {
        Some(Npdu::decode(&mut r).map_err(ToolError::from)?)
    } else {
        None
    };

    let values = ApplicationValues::new(&mut r)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ToolError::from)?;

    if args.json {
        let out = serde_json::json!({ "npdu": npdu, "values": values });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        if let Some(npdu) = &npdu {
            println!("npdu: {npdu:?}");
        }
        for (i, v) in values.iter().enumerate() {
            println!("{i}: {v:?}");
        }
    }
    Ok(())
}
