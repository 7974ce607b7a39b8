use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand, value_parser};
use ozsh::{
    CommandContext,
    commands::{Command as CommandTrait, ListVolumeCommand, traits::ListVolumeArgs},
    i18n::setup_i18n,
};
use rust_i18n::t;
use std::path::PathBuf;
use std::process;

rust_i18n::i18n!("locales");

fn build_cli() -> ClapCommand {
    ClapCommand::new("ozsh")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("app_about"))
        .long_about(t!("app_long_about"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help(t!("config_help")),
        )
        .subcommand(
            ClapCommand::new("list-volume")
                .visible_alias("lv")
                .about(t!("list_volume_about"))
                .arg(Arg::new("uri").help(t!("list_volume_uri_help")).index(1))
                .arg(
                    Arg::new("length")
                        .short('l')
                        .long("length")
                        .allow_hyphen_values(true)
                        .help(t!("list_volume_length_help")),
                )
                .arg(
                    Arg::new("start")
                        .short('s')
                        .long("start")
                        .help(t!("list_volume_start_help")),
                )
                .arg(
                    Arg::new("prefix")
                        .short('p')
                        .long("prefix")
                        .help(t!("list_volume_prefix_help")),
                )
                .arg(
                    Arg::new("user")
                        .short('u')
                        .long("user")
                        .conflicts_with("all")
                        .help(t!("list_volume_user_help")),
                )
                .arg(
                    Arg::new("all")
                        .short('a')
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help(t!("list_volume_all_help")),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .action(ArgAction::SetTrue)
                        .help(t!("list_volume_verbose_help")),
                ),
        )
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_module("ozsh", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn list_volume_args(matches: &ArgMatches) -> ListVolumeArgs {
    ListVolumeArgs {
        uri: matches.get_one::<String>("uri").cloned(),
        length: matches.get_one::<String>("length").cloned(),
        start: matches.get_one::<String>("start").cloned(),
        prefix: matches.get_one::<String>("prefix").cloned(),
        user: matches.get_one::<String>("user").cloned(),
        all: matches.get_flag("all"),
        verbose: matches.get_flag("verbose"),
    }
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();
    let config_path = matches.get_one::<PathBuf>("config").cloned();

    match matches.subcommand() {
        Some(("list-volume", sub_matches)) => {
            let args = list_volume_args(sub_matches);
            // verbose 同时开启调试日志
            init_logging(args.verbose);

            let context = CommandContext::new(config_path.as_deref())?;
            let cmd = ListVolumeCommand::new(context);
            CommandTrait::validate_args(&cmd, &args)?;
            CommandTrait::execute(&cmd, args)?;
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn main() {
    setup_i18n(); // 初始化 i18n

    if let Err(error) = run() {
        eprintln!("{}: {error}", t!("error_prefix"));

        let mut source = error.source();
        let mut level = 1;
        while let Some(err) = source {
            eprintln!(
                "   {} {}: {}",
                "  ".repeat(level),
                t!("error_cause_prefix"),
                err
            );
            source = err.source();
            level += 1;
        }

        process::exit(1);
    }
}
