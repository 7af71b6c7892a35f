//! Folio: interactive reading-site engine.
//!
//! Entry point: opens the desktop preview window hosting the demo post.
//! When built without the `gui` feature, runs a scripted console demo.

use clap::Parser;
use tracing::warn;

use folio::app::Site;
use folio::logging;
use folio::services::preference_store::open_configured_store;
use folio::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use folio::types::settings::SiteSettings;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Folio reading-site engine preview")]
struct Args {
    /// Settings file (defaults to the platform config directory).
    #[arg(long, env = "FOLIO_CONFIG")]
    config: Option<String>,

    /// SQLite preference database path, or `memory`.
    #[arg(long, env = "FOLIO_STORE")]
    store: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_site(args: &Args) -> Site {
    let mut engine = SettingsEngine::new(args.config.clone());
    let settings = engine.load().unwrap_or_else(|e| {
        warn!(path = engine.get_config_path(), error = %e, "using default settings");
        SiteSettings::default()
    });
    Site::new(settings, open_configured_store(args.store.as_deref()))
}

#[cfg(feature = "gui")]
fn main() {
    let args = Args::parse();
    logging::init_logging(args.verbose);
    let site = build_site(&args);
    if let Err(e) = folio::ui::webview_app::run(site) {
        eprintln!("folio: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Folio v{} — Demo Mode                    ║", env!("CARGO_PKG_VERSION"));
    println!("║       Theme, header, progress and menu controllers         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut site = build_site(&args);
    demo::mount(&mut site);
    demo::scrolling(&mut site);
    demo::menu(&mut site);
    demo::theme(&mut site);

    site.unmount();
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Demo finished");
    println!("═══════════════════════════════════════════════════════════════");
}

#[cfg(not(feature = "gui"))]
mod demo {
    use folio::app::{MountOptions, Site};
    use folio::types::dom::{DomPatch, ElementId, ElementSnapshot};
    use folio::types::menu::KeyEvent;
    use folio::types::theme::ThemePreference;

    fn section(name: &str) {
        println!("───────────────────────────────────────────────────────────────");
        println!("  📦 {}", name);
        println!("───────────────────────────────────────────────────────────────");
    }

    fn print_patches(site: &mut Site) {
        for patch in site.drain_patches() {
            let line = match patch {
                DomPatch::AddClass { id, class } => format!("#{} +.{}", id, class),
                DomPatch::RemoveClass { id, class } => format!("#{} -.{}", id, class),
                DomPatch::SetAttribute { id, name, value } => format!("#{} [{}={}]", id, name, value),
                DomPatch::SetStyle { id, property, value } => format!("#{} {{{}: {}}}", id, property, value),
                DomPatch::SetText { id, text } => format!("#{} \"{}\"", id, text),
                DomPatch::Focus { id } => format!("focus #{}", id),
            };
            println!("    {}", line);
        }
    }

    fn page() -> Vec<ElementSnapshot> {
        vec![
            ElementSnapshot::new("body", "body"),
            ElementSnapshot::new("site-header", "header").child_of("body"),
            ElementSnapshot::new("menu-toggle", "button").child_of("site-header").focusable(),
            ElementSnapshot::new("side-menu", "nav").child_of("body"),
            ElementSnapshot::new("menu-close", "button").child_of("side-menu").focusable(),
            ElementSnapshot::new("menu-home", "a").child_of("side-menu").focusable(),
            ElementSnapshot::new("menu-about", "a").child_of("side-menu").focusable(),
            ElementSnapshot::new("reading-progress", "div").child_of("body"),
            ElementSnapshot::new("reading-progress-bar", "div").child_of("reading-progress"),
            ElementSnapshot::new("post-content", "article")
                .child_of("body")
                .with_scroll_height(4000.0),
            ElementSnapshot::new("code-1", "div").child_of("post-content").with_class("highlight"),
            ElementSnapshot::new("code-1-inner", "code")
                .child_of("code-1")
                .with_attribute("data-lang", "rust"),
        ]
    }

    pub fn mount(site: &mut Site) {
        section("Mount");
        let report = site.mount(page(), MountOptions::new(0.0, 1000.0, true, 0));
        println!("  Applied mode: {} (system prefers dark)", report.applied_mode);
        println!(
            "  Header: {}  Progress: {}  Menu: {}  Code labels: {}",
            report.header, report.progress, report.menu, report.labelled_blocks
        );
        print_patches(site);
        println!();
    }

    pub fn scrolling(site: &mut Site) {
        section("Scrolling");
        for (i, y) in [100.0, 400.0, 900.0].into_iter().enumerate() {
            site.scroll(y, 1000.0, 100 + i as u64 * 10);
        }
        println!("  Scrolled down to 900px");
        print_patches(site);
        if let Some(deadline) = site.next_deadline() {
            println!("  Quiet until {} ms", deadline);
            site.tick(deadline);
            print_patches(site);
        }
        let later = site.next_deadline().unwrap_or(0);
        site.tick(later);
        print_patches(site);
        println!();
    }

    pub fn menu(site: &mut Site) {
        section("Off-canvas menu");
        site.click(&ElementId::new("menu-toggle"));
        println!("  Opened via toggle");
        print_patches(site);
        let outcome = site.key(&KeyEvent::shift_tab(Some(ElementId::new("menu-close"))));
        println!("  Shift+Tab on first item, prevent_default = {}", outcome.prevent_default);
        print_patches(site);
        site.key(&KeyEvent::escape());
        println!("  Closed with Escape");
        print_patches(site);
        println!();
    }

    pub fn theme(site: &mut Site) {
        section("Theme preference");
        let mode = site.toggle_theme();
        println!("  Toggled to {} (preference {})", mode, site.theme_preference());
        print_patches(site);
        let mode = site.set_theme_preference(ThemePreference::Auto);
        println!("  Back to auto: {}", mode);
        print_patches(site);
        println!();
    }
}
