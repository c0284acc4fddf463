use clap::Parser;
use log::LevelFilter;

fn main() {
    let cli = dzpanel::cli::Cli::parse();

    let mut clog = colog::default_builder();
    clog.filter_level(if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    clog.init();

    let exit_code = dzpanel::run(cli);
    std::process::exit(exit_code);
}
