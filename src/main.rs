use clap::Parser;
use env_logger::Env;
use log::LevelFilter;

use xnk_steg::{
    cli::{Cli, Commands},
    config::load_config,
    handler::{handle_capacity, handle_hide, handle_recover},
};

/// 初始化日志：默认只输出警告，`-v` 逐级提高，`RUST_LOG` 优先。
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str())).init();
}

/// 程序的主入口点
///
/// 负责解析命令行参数、加载配置，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Hide(args) => handle_hide(args, &config),
        Commands::Recover(args) => handle_recover(args, &config),
        Commands::Capacity(args) => handle_capacity(args, &config),
    }
}
