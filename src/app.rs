use std::io::Write;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::api::ApiClient;
use crate::catalog::{self, Catalog};
use crate::cli::args::{CliArgs, Command};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::model::{Paint, PaintInput};
use crate::output::{self, OutputFormat};
use crate::stats;
use crate::theme::{self, Preferences, Theme};

#[derive(Clone, Debug)]
struct RunConfig {
    endpoint: String,
    timeout: u64,
    output: Option<String>,
    output_format: Option<String>,
    csv_file: String,
    no_color: bool,
    quiet: bool,
    theme: Theme,
    command: Command,
}

fn build_run_config(
    args: CliArgs,
    cfg: ConfigFile,
    prefs: &Preferences,
) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let endpoint = args
        .endpoint
        .or(cfg.endpoint)
        .unwrap_or_else(|| config::DEFAULT_ENDPOINT.to_string());
    let timeout = args
        .timeout
        .or(cfg.timeout)
        .unwrap_or(config::DEFAULT_TIMEOUT_SECONDS);
    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let quiet = args.quiet || cfg.quiet.unwrap_or(false);
    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = args.output_format.or(cfg.output_format);
    let csv_file = cfg
        .csv_file
        .unwrap_or_else(|| config::DEFAULT_CSV_FILE.to_string());

    Ok(RunConfig {
        endpoint,
        timeout,
        output,
        output_format,
        csv_file,
        no_color,
        quiet,
        theme: prefs.theme,
        command: args.command,
    })
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn notice_ok(message: &str) {
    println!("{} {}", "OK".bold().green(), message);
}

/// Busy indicator shown while a request is in flight. Every call site clears
/// it on both the success and the failure path before inspecting the result.
fn busy_spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(message.to_string());
    pb
}

async fn refresh_catalog(
    client: &ApiClient,
    catalog: &mut Catalog,
    quiet: bool,
) -> Result<usize, String> {
    let pb = busy_spinner("fetching catalog", quiet);
    let result = catalog::refresh(client, catalog).await;
    pb.finish_and_clear();
    result.map_err(|e| format!("failed to fetch catalog: {e}"))
}

fn filtered_view(records: &[Paint], brand: Option<&str>) -> Vec<Paint> {
    match brand {
        Some(needle) => stats::filter_by_brand(records, needle)
            .into_iter()
            .cloned()
            .collect(),
        None => records.to_vec(),
    }
}

fn render_records(records: &[Paint], format: OutputFormat, theme: Theme) -> String {
    match format {
        OutputFormat::Table => output::render_table(records, theme),
        OutputFormat::Csv => output::render_csv(records),
        OutputFormat::Json => output::render_json(records),
    }
}

fn confirm_removal(id: u64) -> Result<bool, String> {
    print!("delete paint {id}? [y/N] ");
    std::io::stdout()
        .flush()
        .map_err(|e| format!("failed to flush stdout: {e}"))?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| format!("failed to read confirmation: {e}"))?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

async fn render_list_view(run: &RunConfig, client: &ApiClient, catalog: &Catalog, shown: &[Paint]) -> Result<(), String> {
    if !run.quiet {
        format_kv_line("Endpoint", client.endpoint());
        format_kv_line(
            "Catalog",
            &format!("{} paints ({} shown)", catalog.len(), shown.len()),
        );
    }
    let format = run
        .output_format
        .as_deref()
        .and_then(OutputFormat::parse)
        .or_else(|| {
            run.output
                .as_deref()
                .and_then(output::infer_format_from_path)
        })
        .unwrap_or(OutputFormat::Table);
    let rendered = render_records(shown, format, run.theme);
    match run.output.as_deref() {
        Some(path) => {
            tokio::fs::write(path, rendered.as_bytes())
                .await
                .map_err(|e| format!("failed to write output file '{path}': {e}"))?;
            notice_ok(&format!("listing written to {path}"));
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    let client = ApiClient::new(&run.endpoint, run.timeout).map_err(|e| e.to_string())?;
    let mut catalog = Catalog::new();

    match run.command.clone() {
        Command::List { brand } => {
            refresh_catalog(&client, &mut catalog, run.quiet).await?;
            let view = filtered_view(catalog.snapshot(), brand.as_deref());
            render_list_view(&run, &client, &catalog, &view).await
        }

        Command::Add {
            brand,
            price,
            color,
            quantity,
        } => {
            let input = PaintInput {
                brand,
                price,
                color,
                quantity,
            };
            let pb = busy_spinner("creating paint", run.quiet);
            let result = client.create(&input).await;
            pb.finish_and_clear();
            let created = result.map_err(|e| format!("failed to create paint: {e}"))?;
            notice_ok(&format!("paint created with id {}", created.id));

            refresh_catalog(&client, &mut catalog, run.quiet).await?;
            let view = catalog.snapshot().to_vec();
            render_list_view(&run, &client, &catalog, &view).await
        }

        Command::Update {
            id,
            brand,
            price,
            color,
            quantity,
        } => {
            let input = PaintInput {
                brand,
                price,
                color,
                quantity,
            };
            let pb = busy_spinner("updating paint", run.quiet);
            let result = client.update(id, &input).await;
            pb.finish_and_clear();
            result.map_err(|e| format!("failed to update paint {id}: {e}"))?;
            notice_ok(&format!("paint {id} updated"));

            refresh_catalog(&client, &mut catalog, run.quiet).await?;
            let view = catalog.snapshot().to_vec();
            render_list_view(&run, &client, &catalog, &view).await
        }

        Command::Remove { id, yes } => {
            if !yes && !confirm_removal(id)? {
                println!("removal of paint {id} cancelled");
                return Ok(());
            }
            let pb = busy_spinner("deleting paint", run.quiet);
            let result = client.delete(id).await;
            pb.finish_and_clear();
            result.map_err(|e| format!("failed to delete paint {id}: {e}"))?;
            notice_ok(&format!("paint {id} deleted"));

            refresh_catalog(&client, &mut catalog, run.quiet).await?;
            let view = catalog.snapshot().to_vec();
            render_list_view(&run, &client, &catalog, &view).await
        }

        Command::Average { brand } => {
            refresh_catalog(&client, &mut catalog, run.quiet).await?;
            let view = filtered_view(catalog.snapshot(), brand.as_deref());
            match stats::average(&view) {
                Some(avg) => format_kv_line("Average", &format!("${avg:.2}")),
                None => println!("no data to compute"),
            }
            Ok(())
        }

        Command::Stats => {
            refresh_catalog(&client, &mut catalog, run.quiet).await?;
            match stats::summarize(catalog.snapshot()) {
                Some(summary) => print!("{}", output::render_summary(&summary, run.theme)),
                None => println!("no data to show statistics for"),
            }
            Ok(())
        }

        Command::Export { file } => {
            refresh_catalog(&client, &mut catalog, run.quiet).await?;
            if catalog.is_empty() {
                return Err("no data to export".to_string());
            }
            let path = file.unwrap_or_else(|| run.csv_file.clone());
            let rendered = output::render_csv(catalog.snapshot());
            tokio::fs::write(&path, rendered.as_bytes())
                .await
                .map_err(|e| format!("failed to write csv file '{path}': {e}"))?;
            notice_ok(&format!("{} paints exported to {path}", catalog.len()));
            Ok(())
        }

        // Settled before the runtime starts.
        Command::Theme { .. } | Command::Init => Ok(()),
    }
}

fn run_theme(value: Option<&str>, prefs: Preferences) -> Result<(), String> {
    let path = theme::preferences_path()
        .ok_or_else(|| "could not resolve home directory".to_string())?;
    let next = match value {
        None => {
            format_kv_line("Theme", prefs.theme.as_str());
            return Ok(());
        }
        Some("toggle") => prefs.theme.toggled(),
        Some(v) => Theme::parse(v).ok_or_else(|| format!("invalid theme '{v}'"))?,
    };
    theme::save_preferences(&path, &Preferences { theme: next })?;
    format_kv_line("Theme", next.as_str());
    Ok(())
}

fn run_init() -> Result<(), String> {
    let path = config::default_config_path()
        .ok_or_else(|| "could not resolve home directory".to_string())?;
    config::ensure_default_config_file(&path)?;
    format_kv_line("Config", &path.display().to_string());
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    env_logger::init();

    let args = CliArgs::parse();

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let prefs = theme::preferences_path()
        .map(|p| theme::load_preferences(&p))
        .unwrap_or_default();

    let run = build_run_config(args, cfg, &prefs)?;

    if run.no_color {
        colored::control::set_override(false);
    }

    // Theme and init settle locally, without a runtime or the network.
    match &run.command {
        Command::Theme { value } => return run_theme(value.as_deref(), prefs),
        Command::Init => return run_init(),
        _ => {}
    }

    // One cooperative flow: each action awaits its request before the next
    // one can start, so a single request is in flight at a time.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
