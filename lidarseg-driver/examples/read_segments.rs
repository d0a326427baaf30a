use clap::{Arg, ArgAction, ArgMatches, Command};
use lidarseg_driver::{
    build_full_turn_scan, connect_and_poll, format_laser_scan, open_serial_link, poll_once,
    print_segments, run_poller, run_serial_poller, LidarConfig, PollEvent, ScanReport, TcpLink,
};

fn get_matches() -> ArgMatches {
    Command::new("LiDAR segment reader.")
        .about("Reads data from LiDAR and averages it into angular segments.")
        .disable_version_flag(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file"),
        )
        .arg(Arg::new("host").long("host").help("Sensor address"))
        .arg(
            Arg::new("port")
                .long("port")
                .value_parser(clap::value_parser!(u16))
                .help("Sensor TCP port"),
        )
        .arg(
            Arg::new("segment-size")
                .long("segment-size")
                .value_parser(clap::value_parser!(u32))
                .help("Segment width in degrees"),
        )
        .arg(
            Arg::new("serial")
                .long("serial")
                .help("Serial port such as /dev/ttyUSB0, instead of TCP"),
        )
        .arg(
            Arg::new("loop")
                .long("loop")
                .action(ArgAction::SetTrue)
                .help("Poll continuously until interrupted"),
        )
        .arg(
            Arg::new("laser-scan")
                .long("laser-scan")
                .action(ArgAction::SetTrue)
                .help("Print every sample instead of the segment table"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print each report as JSON"),
        )
        .get_matches()
}

fn load_config(matches: &ArgMatches) -> lidarseg_driver::Result<LidarConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => LidarConfig::from_file(path)?,
        None => LidarConfig::default(),
    };
    if let Some(host) = matches.get_one::<String>("host") {
        config.host = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.port = *port;
    }
    if let Some(size) = matches.get_one::<u32>("segment-size") {
        config.segment_size_degrees = *size;
    }
    config.validate()?;
    Ok(config)
}

fn show(report: ScanReport, matches: &ArgMatches) {
    if matches.get_flag("json") {
        match serde_json::to_string(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{e}"),
        }
    } else if matches.get_flag("laser-scan") {
        print!("{}", format_laser_scan(&build_full_turn_scan(report.distances)));
    } else {
        print_segments("Processed LiDAR Data:", &report.segments);
    }
}

fn run(matches: &ArgMatches) -> lidarseg_driver::Result<()> {
    let config = load_config(matches)?;

    if !matches.get_flag("loop") {
        let report = match matches.get_one::<String>("serial") {
            Some(port_name) => {
                let mut link = open_serial_link(port_name, None, &config)?;
                poll_once(&mut link, &config)?
            }
            None => connect_and_poll(&config)?,
        };
        show(report, matches);
        return Ok(());
    }

    let (poller_thread, event_rx) = match matches.get_one::<String>("serial") {
        Some(port_name) => run_serial_poller(port_name, None, config)?,
        None => {
            let link = TcpLink::connect(&config)?;
            run_poller(link, config)?
        }
    };

    for event in event_rx {
        match event {
            PollEvent::Scan(report) => show(report, matches),
            PollEvent::TimedOut => eprintln!("LiDAR did not answer, polling again"),
            PollEvent::Failed(e) => {
                drop(poller_thread);
                return Err(e);
            }
        }
    }
    drop(poller_thread);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
