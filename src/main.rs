use clap::{CommandFactory, Parser, Subcommand};

use panelkit::plugins::{is_cgi_environment, CgiRequest, LifecycleEvent, PluginHost};
use panelkit::utils::{init_logging, LogFormat, LoggingOptions};

#[derive(Parser)]
#[command(name = "panelkit")]
#[command(version, about = "Run a control panel plugin event", long_about = None)]
struct Cli {
    /// Plugin name, used in config and log file names
    #[arg(long, env = "PANELKIT_PLUGIN", default_value = "noname")]
    plugin: String,

    /// Log file line format (text or json)
    #[arg(long, env = "PANELKIT_LOG_FORMAT", default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Before the plugin files are installed
    Preinstall,
    /// After the plugin files are installed
    Postinstall,
    /// Before the plugin is updated
    Preupdate,
    /// After the plugin is updated
    Postupdate,
    /// Before the plugin is removed
    Predelete,
    /// Serve the current CGI request
    RunCgi,
    /// Print the effective plugin and connection config
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut host = PluginHost::from_env(&cli.plugin)?.with_web_runner(serve_status_page);
    host.set_log_format(LogFormat::parse(&cli.log_format));

    let code = match cli.command {
        Some(Commands::ShowConfig) => {
            show_config(&mut host)?;
            0
        }
        Some(Commands::Preinstall) => host.run_event(LifecycleEvent::PreInstall),
        Some(Commands::Postinstall) => host.run_event(LifecycleEvent::PostInstall),
        Some(Commands::Preupdate) => host.run_event(LifecycleEvent::PreUpdate),
        Some(Commands::Postupdate) => host.run_event(LifecycleEvent::PostUpdate),
        Some(Commands::Predelete) => host.run_event(LifecycleEvent::PreDelete),
        Some(Commands::RunCgi) => host.run_event(LifecycleEvent::RunCgi),
        None if is_cgi_environment() => host.run(&[]),
        None => {
            Cli::command().print_help()?;
            0
        }
    };

    std::process::exit(code);
}

/// Built-in web runner: a plain-text page describing the plugin.
fn serve_status_page(host: &mut PluginHost, request: &CgiRequest) -> anyhow::Result<i32> {
    let debug = host
        .runtime_config()?
        .map(|config| config.is_debug_mode())
        .unwrap_or(false);

    print!("Content-Type: text/plain; charset=utf-8\r\n\r\n");
    println!("plugin: {}", host.plugin_name());
    println!("method: {}", request.method.as_deref().unwrap_or("-"));
    println!("debug: {}", if debug { "on" } else { "off" });
    Ok(0)
}

fn show_config(host: &mut PluginHost) -> anyhow::Result<()> {
    init_logging(&LoggingOptions::default());

    println!("[{}]", host.paths().config_file.display());
    if let Some(config) = host.runtime_config()? {
        for (name, value) in config.params().params() {
            println!("{} = {}", name, value);
        }
    }

    println!();
    println!("[{}]", host.paths().manager_config_file.display());
    if let Some(connection) = host.connection_config()? {
        for (name, value) in connection.params().params() {
            if name.eq_ignore_ascii_case("Password") {
                println!("{} = ********", name);
            } else {
                println!("{} = {}", name, value);
            }
        }
        println!("dsn = {}", connection.descriptor().dsn());
    }
    Ok(())
}
