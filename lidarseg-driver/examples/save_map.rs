use clap::{Arg, Command};
use lidarseg_driver::{connect_and_poll, load_map, print_segments, save_map, LidarConfig};

fn get_args() -> (Option<String>, String) {
    let matches = Command::new("LiDAR map saver.")
        .about("Polls the LiDAR once, saves the segment map and prints it back.")
        .disable_version_flag(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("output")
                .help("Path of the map file")
                .default_value("lidar_map.csv"),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").cloned();
    let output = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| "lidar_map.csv".to_string());
    (config_path, output)
}

fn run(config_path: Option<String>, output: &str) -> lidarseg_driver::Result<()> {
    let config = match config_path {
        Some(path) => LidarConfig::from_file(path)?,
        None => LidarConfig::default(),
    };

    let report = connect_and_poll(&config)?;
    save_map(&report.segments, output)?;

    let segments = load_map(output)?;
    print_segments("Loaded Map Data:", &segments);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config_path, output) = get_args();
    if let Err(e) = run(config_path, &output) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
