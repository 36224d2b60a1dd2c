use clap::Parser; // trait import enables PulselinkCli::parse()

use pulselink::cli::{Command, PulselinkCli};
use pulselink::commands;

fn main() -> anyhow::Result<()> {
    let args = PulselinkCli::parse();

    match &args.cmd {
        Some(Command::Serve { port }) => {
            #[cfg(feature = "server")]
            {
                commands::serve::main_with_opts(*port)?;
            }
            #[cfg(not(feature = "server"))]
            {
                let _ = port;
                eprintln!("The 'serve' subcommand requires building with the `--features server` flag.");
                std::process::exit(2);
            }
        }
        None => commands::simulate::main_with_opts(&args)?,
    }

    Ok(())
}
