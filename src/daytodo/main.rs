use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use daytodo::api::{CmdMessage, ConfigAction, DisplayTask, MessageLevel, TodoApi};
use daytodo::calendar::{GridCell, MonthGrid};
use daytodo::config::{TodoConfig, CONFIG_KEYS};
use daytodo::date::{DateKey, YearMonth};
use daytodo::error::{Result, TodoError};
use daytodo::logging::{init_logging, resolve_level, LOG_ENV_VAR};
use daytodo::store::fs::FileStore;
use directories::ProjectDirs;
use pollster::FutureExt as _;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

/// Overrides the platform data directory.
const HOME_ENV_VAR: &str = "DAYTODO_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: TodoApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&mut ctx),
        Some(Commands::Add { text }) => handle_add(&mut ctx, text),
        Some(Commands::Edit { index, text }) => handle_edit(&mut ctx, index, text),
        Some(Commands::Toggle { indexes }) => handle_toggle(&mut ctx, indexes),
        Some(Commands::Delete { indexes }) => handle_delete(&mut ctx, indexes),
        Some(Commands::Inherit) => handle_inherit(&mut ctx),
        Some(Commands::Calendar { month, next, prev }) => {
            handle_calendar(&mut ctx, month, next, prev)
        }
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

fn init_cli_logging(verbose: bool) {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let level = match resolve_level(verbose, env_level.as_deref()) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Warning: {}", e);
            "warn"
        }
    };
    if let Err(e) = init_logging(level) {
        eprintln!("Warning: Failed to start logging: {}", e);
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "daytodo", "daytodo")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TodoError::Store("Could not determine data directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = data_dir()?;
    let today = DateKey::today();

    let store = FileStore::new(data_dir.clone());
    let mut api = TodoApi::new(store, data_dir, today)?;

    match api.check_rollover(today).block_on() {
        Ok(rollover) => print_messages(&rollover.messages),
        Err(e) => eprintln!("Warning: Day change check failed: {}", e),
    }

    if let Some(raw) = &cli.date {
        api.select(raw.parse()?);
    }

    Ok(AppContext { api })
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list().block_on()?;
    let date = result.date.unwrap_or_else(|| ctx.api.selected_date());
    print_day_header(&date);
    print_tasks(&result.listed_tasks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, text: Vec<String>) -> Result<()> {
    let content = join_text(text);
    let result = ctx.api.add(content).block_on()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, index: String, text: Vec<String>) -> Result<()> {
    let text = join_text(text).unwrap_or_default();
    let result = ctx.api.edit(&index, &text).block_on()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_toggle(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.toggle(indexes.as_slice()).block_on()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete(indexes.as_slice()).block_on()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_inherit(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.inherit().block_on()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_calendar(
    ctx: &mut AppContext,
    month: Option<String>,
    next: bool,
    prev: bool,
) -> Result<()> {
    let month = match month {
        Some(raw) => raw.parse::<YearMonth>()?,
        None => ctx.api.selected_date().year_month(),
    };
    let delta = match (next, prev) {
        (true, _) => 1,
        (_, true) => -1,
        _ => 0,
    };

    let result = ctx.api.calendar(Some(month), delta)?;
    if let Some(grid) = &result.grid {
        print_grid(grid);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn join_text(parts: Vec<String>) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_config(config: &TodoConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn print_day_header(date: &DateKey) {
    let label = format!("{} ({})", date, date.naive().format("%A"));
    println!("{}", label.bold());
}

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;
const DONE_MARKER: &str = "[x]";
const OPEN_MARKER: &str = "[ ]";

fn print_tasks(tasks: &[DisplayTask]) {
    if tasks.is_empty() {
        println!("No tasks for this day.");
        return;
    }

    for dt in tasks {
        let idx_str = format!("{:>3}. ", dt.index);
        let marker = if dt.task.completed {
            DONE_MARKER
        } else {
            OPEN_MARKER
        };
        let origin = match dt.task.inherited_from {
            Some(from) => format!(" (from {})", from),
            None => String::new(),
        };

        let fixed_width = idx_str.width() + marker.width() + 1 + origin.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let content = truncate_to_width(&dt.task.content, available);
        let padding = available.saturating_sub(content.width());

        let content_colored = if dt.task.completed {
            content.dimmed().strikethrough()
        } else {
            content.normal()
        };
        let marker_colored = if dt.task.completed {
            marker.green()
        } else {
            marker.normal()
        };

        println!(
            "{}{} {}{}{}{}",
            idx_str.yellow(),
            marker_colored,
            content_colored,
            origin.cyan(),
            " ".repeat(padding),
            format_time_ago(dt.task.created_at).dimmed()
        );
    }
}

fn print_grid(grid: &MonthGrid) {
    let title = format!("{:^27}", grid.month.to_string());
    println!("{}", title.bold());
    let header: Vec<String> = grid.header().iter().map(|h| format!("{:>3}", h)).collect();
    println!("{}", header.join(" ").dimmed());

    for week in grid.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                GridCell::Blank => "   ".to_string(),
                GridCell::Day(day) => {
                    let label = format!("{:>3}", day.date.day());
                    if day.is_selected {
                        label.reversed().to_string()
                    } else if day.is_today {
                        label.bold().underline().to_string()
                    } else {
                        label
                    }
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c = if c == '\n' { ' ' } else { c };
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(created_at_ms: i64) -> String {
    let Some(created) = DateTime::<Utc>::from_timestamp_millis(created_at_ms) else {
        return " ".repeat(TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(created);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
