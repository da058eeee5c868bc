//! lfui - replay input events against an enhanced page and print the result

use clap::Parser;
use lfui::model::{AppError, Document, HostRequest};
use lfui::page::Page;
use std::path::PathBuf;
use tracing::info;

/// Attach the lost-and-found page behaviors to a page fixture, replay an
/// event script and print the resulting tree
#[derive(Parser, Debug)]
#[command(name = "lfui")]
#[command(version)]
#[command(about = "Replay UI events against a lost-and-found page fixture")]
pub struct Args {
    /// Path to the page fixture (JSON)
    pub page: PathBuf,

    /// Event script to replay (JSON array of steps)
    #[arg(short, long)]
    pub events: Option<PathBuf>,

    /// Selector of the container to attach scoped behaviors to
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults -> Config File -> Env Vars -> CLI Args
    let config = {
        let config_file = lfui::config::load_config_with_precedence(args.config.clone())?;
        let merged = lfui::config::merge_config(config_file);
        let with_env = lfui::config::apply_env_overrides(merged);
        lfui::config::apply_cli_overrides(with_env, args.scope.clone(), args.log_file.clone())
    };

    lfui::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let behavior = config.behavior()?;
    let fixture = lfui::source::load_page(&args.page)?;
    let mut page = Page::attach(Document::from_page(&fixture), &behavior);

    if let Some(path) = &args.events {
        let steps = lfui::source::load_script(path)?;
        info!(steps = steps.len(), script = %path.display(), "replaying script");
        lfui::source::apply_script(&mut page, &steps)?;
    }
    page.settle();

    print!("{}", report(&mut page));
    Ok(())
}

/// The tree dump followed by one line per pending host request.
fn report(page: &mut Page) -> String {
    let mut out = page.document().dump();
    for request in page.take_requests() {
        let line = match request {
            HostRequest::Alert(message) => format!("alert: {message}\n"),
            HostRequest::OpenFilePicker(input) => format!("open-file-picker: node {input}\n"),
        };
        out.push_str(&line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["lfui", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["lfui", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_page_is_required() {
        let result = Args::try_parse_from(["lfui"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_page_only_defaults() {
        let args = Args::parse_from(["lfui", "home.json"]);
        assert_eq!(args.page, PathBuf::from("home.json"));
        assert_eq!(args.events, None);
        assert_eq!(args.scope, None);
        assert_eq!(args.config, None);
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn test_events_short_and_long() {
        let short = Args::parse_from(["lfui", "home.json", "-e", "clicks.json"]);
        let long = Args::parse_from(["lfui", "home.json", "--events", "clicks.json"]);
        assert_eq!(short.events, Some(PathBuf::from("clicks.json")));
        assert_eq!(long.events, short.events);
    }

    #[test]
    fn test_scope_flag() {
        let args = Args::parse_from(["lfui", "home.json", "--scope", ".site-header"]);
        assert_eq!(args.scope, Some(".site-header".to_string()));
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["lfui", "home.json", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_scope_flows_through_config_precedence_chain() {
        use lfui::config::{apply_cli_overrides, apply_env_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            scope: Some("main".to_string()),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.scope.as_deref(), Some("main"));

        // LFUI_SCOPE is not set here, so the file value survives.
        let with_env = apply_env_overrides(merged);
        assert_eq!(with_env.scope.as_deref(), Some("main"));

        let with_cli = apply_cli_overrides(with_env, Some("nav".to_string()), None);
        assert_eq!(with_cli.scope.as_deref(), Some("nav"));
    }

    #[test]
    fn test_report_lists_host_requests_after_tree() {
        use lfui::model::{Markup, Size};

        let body = Markup::new("body").child(
            Markup::new("form").id("reportForm").child(
                Markup::new("div")
                    .id("uploadBox")
                    .child(Markup::new("input").id("photoInput")),
            ),
        );
        let mut page = Page::attach(
            Document::from_markup(Size::new(800.0, 600.0), &body),
            &lfui::config::BehaviorConfig::default(),
        );
        let upload_box = page
            .document()
            .query(page.document().body(), &lfui::model::Selector::id("uploadBox"))
            .expect("fixture has upload box");
        page.dispatch(lfui::model::UiEvent::click(upload_box));

        let out = report(&mut page);
        let last = out.lines().last().expect("non-empty report");
        assert!(last.starts_with("open-file-picker: node #"));
    }
}
