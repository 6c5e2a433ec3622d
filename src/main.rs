use steward::audit::AuditTrail;
use steward::cli::{Cli, Commands, ConfigAction};
use steward::config::Config;
use steward::decision::{DecisionStatus, Priority};
use steward::desk::ReviewDesk;
use steward::error::{Result, StewardError};
use steward::orgtree::{flatten, seed_tree, ExpandedNodes};
use steward::source::{DecisionFeed, FileFeed, MockFeed};
use steward::view::{SortDirection, SortKey};
use std::path::PathBuf;
use std::str::FromStr;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Status => {
            cmd_status(cli.config)?;
        }
        Commands::List {
            status,
            priority,
            search,
            sort,
            direction,
            page,
            page_size,
            json,
        } => {
            cmd_list(
                cli.config, status, priority, search, sort, direction, page, page_size, json,
            )?;
        }
        Commands::Show { id } => {
            cmd_show(cli.config, &id)?;
        }
        Commands::Approve { id } => {
            cmd_action(cli.config, &id, true)?;
        }
        Commands::Reject { id } => {
            cmd_action(cli.config, &id, false)?;
        }
        Commands::Tree { expand_all, expand } => {
            cmd_tree(expand_all, &expand)?;
        }
        Commands::Audit { limit, json } => {
            cmd_audit(cli.config, limit, json)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "steward=debug" } else { "steward=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn cmd_status(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut desk = make_desk(&config)?;

    if let Err(e) = desk.refresh() {
        println!("✗ Could not reach the decision feed: {}", e);
        println!("  Run the command again to retry.");
    }

    println!("Steward Status");
    println!("==============");
    println!("\nFeed: {}", desk.feed_description());
    if let Some(error) = desk.last_error() {
        println!("Last error: {}", error);
    }
    if let Some(at) = desk.snapshot().fetched_at {
        println!("Last sync: {}", at.format("%Y-%m-%d %H:%M:%S"));
    }

    println!("\nMetrics:");
    for card in desk.metrics() {
        let change = card
            .change
            .as_deref()
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        println!(
            "  [{}] {:<18} {}{}",
            card.trend.marker(),
            card.title,
            card.value,
            change
        );
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_list(
    config_path: Option<PathBuf>,
    status: Option<String>,
    priority: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    direction: Option<String>,
    page: usize,
    page_size: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let mut desk = make_desk(&config)?;

    if let Err(e) = desk.refresh() {
        println!("✗ Could not reach the decision feed: {}", e);
        println!("  Showing the last-known snapshot; run the command again to retry.");
    }

    let mut state = config.default_view_state();
    state.status = parse_optional(status, DecisionStatus::from_str)?;
    state.priority = parse_optional(priority, Priority::from_str)?;
    state.search = search.unwrap_or_default();
    if let Some(sort) = sort {
        state.sort_key = SortKey::from_str(&sort).map_err(StewardError::InvalidViewState)?;
    }
    if let Some(direction) = direction {
        state.sort_direction =
            SortDirection::from_str(&direction).map_err(StewardError::InvalidViewState)?;
    }
    state.page = page;
    if let Some(page_size) = page_size {
        state.page_size = page_size;
    }

    let view = desk.page(&state)?;

    if json {
        let out = serde_json::to_string_pretty(&view).map_err(|e| StewardError::Json {
            source: e,
            context: "Failed to serialize decision page".to_string(),
        })?;
        println!("{}", out);
        return Ok(());
    }

    if view.is_empty() {
        println!("No decisions found");
        println!("  Try widening the filters or clearing the search term.");
    } else {
        println!(
            "{:<10} {:<42} {:<10} {:<10} {:<17}",
            "ID", "TITLE", "STATUS", "PRIORITY", "CREATED"
        );
        for row in &view.rows {
            let priority = row
                .priority
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            let created = row
                .created_at
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:<10} {:<42} {:<10} {:<10} {:<17}",
                row.id,
                truncate(&row.title, 42),
                row.status,
                priority,
                created
            );
        }
    }

    println!(
        "\nPage {} of {} ({} matched)",
        state.page, view.total_pages, view.total_matched
    );
    if desk.snapshot().excluded > 0 {
        println!(
            "⚠ {} malformed record(s) excluded from the feed",
            desk.snapshot().excluded
        );
    }

    Ok(())
}

fn cmd_show(config_path: Option<PathBuf>, id: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let mut desk = make_desk(&config)?;
    desk.refresh()?;

    let record = desk
        .snapshot()
        .records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| StewardError::DecisionNotFound { id: id.to_string() })?;

    println!("{} ({})", record.title, record.id);
    println!("  Status:   {} [{}]", record.status, record.status.badge());
    if let Some(description) = &record.description {
        println!("  About:    {}", description);
    }
    if let Some(kind) = record.kind {
        println!("  Kind:     {}", kind.label());
    }
    if let Some(priority) = record.priority {
        println!("  Priority: {}", priority);
    }
    if let Some(created) = record.created_at {
        println!("  Created:  {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(confidence) = record.confidence {
        println!("  Confidence: {:.0}%", confidence * 100.0);
    }
    if let (Some(required), Some(received)) =
        (record.required_approvals, record.received_approvals)
    {
        println!("  Approvals:  {}/{}", received, required);
    }

    Ok(())
}

fn cmd_action(config_path: Option<PathBuf>, id: &str, approve: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let mut desk = make_desk(&config)?;
    desk.refresh()?;

    let outcome = if approve {
        desk.approve(id)
    } else {
        desk.reject(id)
    };

    match outcome {
        Ok(()) => {
            let verb = if approve { "Approved" } else { "Rejected" };
            println!("✓ {} {}", verb, id);
        }
        // precondition failures are feedback, not crashes
        Err(e @ StewardError::InvalidTransition { .. })
        | Err(e @ StewardError::DecisionNotFound { .. }) => {
            println!("✗ {}", e);
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    let trail_path = expand_path(&config.audit.trail_file)?;
    desk.trail().save(&trail_path)?;

    Ok(())
}

fn cmd_tree(expand_all: bool, expand: &[String]) -> Result<()> {
    let tree = seed_tree();
    let mut expanded = ExpandedNodes::with_root(&tree);
    if expand_all {
        expanded.expand_all(&tree);
    }
    for id in expand {
        expanded.expand(id);
    }

    println!("Organization Tree");
    println!("=================");
    for row in flatten(&tree, &expanded) {
        let indent = "  ".repeat(row.depth);
        let toggle = if !row.has_children {
            " "
        } else if row.expanded {
            "▼"
        } else {
            "▶"
        };

        let mut counts = Vec::new();
        if let Some(accounts) = row.node.account_count {
            if accounts > 0 {
                counts.push(format!("{} accounts", accounts));
            }
        }
        if let Some(policies) = row.node.policy_count {
            if policies > 0 {
                counts.push(format!("{} policies", policies));
            }
        }
        let counts = if counts.is_empty() {
            String::new()
        } else {
            format!("  ({})", counts.join(", "))
        };

        println!(
            "{}{} {} {} [{}]{}",
            indent,
            toggle,
            row.node.kind.marker(),
            row.node.name,
            row.node.id,
            counts
        );
    }

    Ok(())
}

fn cmd_audit(config_path: Option<PathBuf>, limit: usize, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let trail_path = expand_path(&config.audit.trail_file)?;
    let trail = AuditTrail::load(&trail_path, config.audit.max_events)?;
    let stats = trail.stats();

    if json {
        let out = serde_json::json!({
            "stats": stats,
            "events": trail.recent(limit),
        });
        println!("{}", serde_json::to_string_pretty(&out).map_err(|e| {
            StewardError::Json {
                source: e,
                context: "Failed to serialize audit trail".to_string(),
            }
        })?);
        return Ok(());
    }

    println!("Audit Trail");
    println!("===========");
    println!("\nTotal events: {}", stats.total_events);
    println!(
        "Reviews: {} approved, {} rejected ({:.1}% approval rate)",
        stats.approvals,
        stats.rejections,
        stats.approval_rate * 100.0
    );
    println!("Last 24h: {} events", stats.last_24h);

    if trail.is_empty() {
        println!("\nNo events recorded yet");
        return Ok(());
    }

    println!("\nRecent events:");
    for event in trail.recent(limit) {
        println!(
            "  {}  {:<20} {}",
            event.at.format("%Y-%m-%d %H:%M"),
            event.action.label(),
            event.detail
        );
    }

    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let json = serde_json::to_string_pretty(&config).map_err(|e| StewardError::Json {
                source: e,
                context: "Failed to serialize config".to_string(),
            })?;
            println!("{}", json);
        }
        ConfigAction::Validate { file } => {
            let path = match file {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = Config::default_path()?;

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| StewardError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            let config = Config::default();
            config.save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        tracing::warn!(
            "Config file not found, using defaults. Run 'steward config init' to create one."
        );
        let mut config = Config::default();
        config.apply_env_overrides();
        return Ok(config);
    }

    Config::load(&path)
}

fn make_desk(config: &Config) -> Result<ReviewDesk> {
    let feed: Box<dyn DecisionFeed> = match config.feed.source.as_str() {
        "file" => Box::new(FileFeed::new(expand_path(&config.feed.snapshot_file)?)),
        _ => Box::new(MockFeed::seeded()),
    };

    let trail_path = expand_path(&config.audit.trail_file)?;
    let trail = AuditTrail::load(&trail_path, config.audit.max_events)?;

    Ok(ReviewDesk::new(feed, trail))
}

fn parse_optional<T>(
    value: Option<String>,
    parse: impl Fn(&str) -> std::result::Result<T, String>,
) -> Result<Option<T>> {
    match value.as_deref() {
        None => Ok(None),
        Some("all") => Ok(None),
        Some(s) => parse(s).map(Some).map_err(StewardError::InvalidViewState),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn expand_path(path: &std::path::Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| StewardError::Config("Invalid path encoding".to_string()))?;

    if let Some(stripped) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| StewardError::Config("Cannot determine home directory".to_string()))?;
        Ok(home.join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}
