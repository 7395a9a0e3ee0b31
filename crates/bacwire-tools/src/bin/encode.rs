use bacwire_core::npdu::NpduHeader;
use bacwire_tools::{destination, encode_frame, parse_value, to_hex, PriorityArg, ValueKindArg};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bacnet-encode")]
struct Args {
    #[arg(long, value_enum)]
    kind: ValueKindArg,
    #[arg(long, default_value = "")]
    value: String,
    /// Prefix the value with an NPDU header.
    #[arg(long)]
    npdu: bool,
    #[arg(long, default_value_t = 0)]
    dest_net: u16,
    /// Destination address on `dest_net`, as hex.
    #[arg(long)]
    dest_adr: Option<String>,
    #[arg(long, default_value_t = bacwire_core::npdu::HOP_COUNT_DEFAULT)]
    hop_count: u8,
    #[arg(long, value_enum, default_value_t = PriorityArg::Normal)]
    priority: PriorityArg,
    #[arg(long)]
    expecting_reply: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let value = parse_value(args.kind, &args.value)?;

    let frame = if args.npdu {
        let dest = destination(args.dest_net, args.dest_adr.as_deref())?;
        let mut header = NpduHeader::new(args.expecting_reply, args.priority.into_priority());
        header.hop_count = args.hop_count;
        encode_frame(&value, Some((&header, &dest)))?
    } else {
        encode_frame(&value, None)?
    };

    log::debug!("encoded {} octets", frame.len());
    println!("{}", to_hex(&frame));
    Ok(())
}
