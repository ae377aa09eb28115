use clap::{crate_authors, crate_description, crate_version, Arg, ArgAction, Command};
use pretty_env_logger::env_logger::Builder;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::exit;

use crate::config::{Config, AUTH_EMAIL_VAR, AUTH_KEY_VAR};
use crate::service;

fn set_logger_level(b: &mut Builder) {
    let mut b = b;
    if env::var("RUST_LOG").is_err() {
        b = b.filter_level(log::LevelFilter::Info)
    }
    b.init();
}

fn setup_logger() {
    // Adapted from env_logger examples. <3 Systemd support
    match std::env::var("RUST_LOG_STYLE") {
        Ok(s) if s == "SYSTEMD" => {
            let builder = &mut pretty_env_logger::env_logger::builder();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    match record.level() {
                        log::Level::Error => 3,
                        log::Level::Warn => 4,
                        log::Level::Info => 6,
                        log::Level::Debug => 7,
                        log::Level::Trace => 7,
                    },
                    record.target(),
                    record.args()
                )
            });
            set_logger_level(builder);
        }
        _ => {
            let builder = &mut pretty_env_logger::formatted_builder();
            set_logger_level(builder);
        }
    };
}

pub async fn main() {
    let cli = Command::new("cloudflare-zone")
        .about(crate_description!())
        .arg(
            Arg::new("file")
                .long("file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to the local zone file"),
        )
        .arg(
            Arg::new("auth-email")
                .long("auth-email")
                .help(format!("Account email address, defaults to ${AUTH_EMAIL_VAR}")),
        )
        .arg(
            Arg::new("auth-key")
                .long("auth-key")
                .help(format!(
                    "Global API key, defaults to ${AUTH_KEY_VAR}. Prefix with @ to read from a file"
                )),
        )
        .arg(
            Arg::new("auto-create")
                .action(ArgAction::SetTrue)
                .long("auto-create")
                .help("Create the zone when it does not exist yet"),
        )
        .arg(
            Arg::new("dry-run")
                .action(ArgAction::SetTrue)
                .long("dry-run")
                .help("Show changes without applying them"),
        )
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    let config = match Config::new(
        args.get_one::<PathBuf>("file")
            .cloned()
            .expect("--file is required"),
        args.get_one::<String>("auth-email").cloned(),
        args.get_one::<String>("auth-key").cloned(),
        args.get_flag("auto-create"),
        args.get_flag("dry-run"),
    ) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            exit(1);
        }
    };

    match service::run(config).await {
        Ok(()) => exit(0),
        Err(err) => {
            tracing::error!("{err}");
            exit(1);
        }
    }
}
