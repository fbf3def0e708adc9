use octaglyph_cipher::{ROTATION_STEP, STREAM_TAG};
use octaglyph_frame::PACKET_BITS;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("octaglyph {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: octaglyph");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("protocol: {STREAM_TAG} ({PACKET_BITS}-bit packets, rotation step {ROTATION_STEP})");
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("features: cli={}", cfg!(feature = "cli"));

    Ok(SUCCESS)
}
