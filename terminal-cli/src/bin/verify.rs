//! Offline check of a disclosed commitment: recompute the HMAC from the
//! printed key and number and compare it to the printed HMAC.

use std::process::ExitCode;

use clap::Parser;
use fairdice_execution::verify_disclosure;

#[derive(Parser, Debug)]
#[command(name = "fairdice-verify", about = "Verify a fairdice HMAC disclosure")]
struct Args {
    /// HMAC printed before the selection (hex)
    #[arg(long)]
    hmac: String,

    /// KEY printed after the selection (hex)
    #[arg(long)]
    key: String,

    /// Number revealed together with the key
    #[arg(long)]
    number: u64,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match verify_disclosure(&args.hmac, &args.key, args.number) {
        Ok(()) => {
            println!("OK");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("FAILED: {err}");
            ExitCode::FAILURE
        }
    }
}
