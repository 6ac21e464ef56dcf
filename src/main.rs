use clap::Parser;
use quest_tools::cli::{Args, Commands};
use quest_tools::commands::{self, count};
use quest_tools::config::Config;
use quest_tools::export::AppInfo;

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Commands::Count {
            queries,
            output,
            min_length,
            most_common,
            sample,
            reference,
            library,
            low_count,
            cpus,
            discard_qc_fail,
            loglevel,
            no_compression,
        } => {
            commands::init_logging(loglevel.into());
            let config = Config::load();

            let options = count::CountOptions {
                queries,
                output,
                min_length: min_length.map_or(config.min_length, |n| n as usize),
                most_common: most_common.map(|n| n as usize),
                sample,
                reference,
                library,
                low_count,
                cpus: count::resolve_cpus(cpus.unwrap_or(config.cpus)),
                discard_qc_fail: discard_qc_fail || config.discard_qc_fail,
                compress: config.compress && !no_compression,
                show_progress: true,
            };
            count::run(&options, &AppInfo::from_env()).map(|_| ())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
