//! Emunah CLI
//!
//! Usage:
//!   emunah                                  # Interactive console on the sample page
//!   emunah --width 480                      # Console at a phone-sized viewport
//!   emunah --serve                          # Contact mail endpoint
//!   emunah --serve --relay-user web@emunah.es   # Password from EMUNAH_RELAY_PASSWORD
//!   emunah --serve --dry-run                # Log mails instead of sending
//!   emunah --config site.json               # Override timings, messages, relay

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::{ColoredString, Colorize};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use emunah::config::SiteConfig;
use emunah::core::demo::{self, sample_page};
use emunah::core::{
    run_server, Clock, HttpEndpoint, Interface, LogRelay, MailRelay, MemoryHost, Mode,
    SmtpRelay, SystemClock, TracingAnalytics,
};
use emunah::types::{DispatchOutput, ElementId, Key, MediaView, UiEvent, ViewHost};
use emunah::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "emunah",
    version = VERSION,
    about = "Emunah site engine - interface console and contact mail endpoint",
    long_about = "Drives the Emunah page controllers headlessly, or serves the\n\
                  contact mail endpoint the page submits to.\n\n\
                  Modes:\n  \
                  (default)  Interactive console over the sample page\n  \
                  --serve    HTTP mail endpoint (POST /enviar-mail, GET /health)"
)]
struct Args {
    /// Run the contact mail endpoint
    #[arg(short, long)]
    serve: bool,

    /// Log contact mails instead of relaying them
    #[arg(long)]
    dry_run: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// JSON site config
    #[arg(short, long)]
    config: Option<String>,

    /// Relay account (overrides config)
    #[arg(long)]
    relay_user: Option<String>,

    /// Relay password (overrides config)
    #[arg(long, env = "EMUNAH_RELAY_PASSWORD", hide_env_values = true)]
    relay_password: Option<String>,

    /// Console viewport width in px
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Endpoint the console submits to (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Print dispatch output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = match &args.config {
        Some(path) => match SiteConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "cannot load config");
                std::process::exit(1);
            }
        },
        None => SiteConfig::default(),
    };
    if let Some(user) = &args.relay_user {
        config.relay.username = user.clone();
    }
    if let Some(password) = &args.relay_password {
        config.relay.password = password.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.submission.endpoint = endpoint.clone();
    }

    if args.serve {
        let relay: Arc<dyn MailRelay> = if args.dry_run {
            Arc::new(LogRelay::new(&config.relay))
        } else {
            match SmtpRelay::new(&config.relay) {
                Ok(relay) => Arc::new(relay),
                Err(e) => {
                    error!(error = %e, "cannot set up mail relay (use --dry-run to skip)");
                    std::process::exit(1);
                }
            }
        };
        if let Err(e) = run_server(&args.addr, relay).await {
            error!(error = %e, "server stopped");
            std::process::exit(1);
        }
    } else {
        run_console(&args, &config).await;
    }
}

/// Interactive console over the sample page
async fn run_console(args: &Args, config: &SiteConfig) {
    let mut host = MemoryHost::new(args.width);
    let markup = sample_page(&mut host);
    let mut rng = StdRng::from_entropy();
    let mut ui = Interface::mount(&markup, config, host, &mut rng)
        .with_analytics(Box::new(TracingAnalytics));
    let clock = SystemClock::new();

    let endpoint = match HttpEndpoint::new(
        config.submission.endpoint.clone(),
        Duration::from_millis(config.submission.timeout_ms),
    ) {
        Ok(endpoint) => Some(endpoint),
        Err(e) => {
            warn!(error = %e, "submission endpoint unavailable");
            None
        }
    };

    print_header();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print_output(&ui.tick(clock.now()), args, true);
        print!("{} ", format!("[{}]", mode_label(ui.mode())).dimmed());
        print!("{}", "> ".bold());
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        let mut words = line.splitn(3, ' ');
        let command = words.next().unwrap_or_default();
        let first = words.next();
        let rest = words.next();
        let now = clock.now();

        let event = match (command, first) {
            ("next", _) => UiEvent::Activate { target: demo::NEXT },
            ("prev", _) => UiEvent::Activate { target: demo::PREV },
            ("left", _) => key(Key::ArrowLeft, false),
            ("right", _) => key(Key::ArrowRight, false),
            ("esc", _) => key(Key::Escape, false),
            ("tab", _) => key(Key::Tab, false),
            ("backtab", _) => key(Key::Tab, true),
            ("menu", _) => UiEvent::Activate { target: demo::MENU_TOGGLE },
            ("link", Some("2")) => UiEvent::Activate { target: demo::NAV_LINKS[1] },
            ("link", _) => UiEvent::Activate { target: demo::NAV_LINKS[0] },
            ("cta", _) => UiEvent::Activate { target: demo::CTA },
            ("close", _) => UiEvent::Activate { target: demo::DISMISS },
            ("backdrop", _) => UiEvent::Activate { target: demo::OVERLAY },
            ("end", _) => UiEvent::TransitionEnd,
            ("open", Some(n)) => match gallery_item(n) {
                Some(target) => UiEvent::Activate { target },
                None => {
                    println!("open 1..{}", demo::GALLERY_ITEMS.len());
                    continue;
                }
            },
            ("see", Some(n)) => match gallery_item(n) {
                Some(target) => UiEvent::Proximity { target, distance: 0 },
                None => continue,
            },
            ("resize", Some(w)) => match w.parse::<u32>() {
                Ok(width) => {
                    ui.host_mut().set_width(width);
                    UiEvent::Resize
                }
                Err(_) => {
                    println!("resize <width>");
                    continue;
                }
            },
            ("type", Some(field)) => UiEvent::ValueChange {
                field: field.to_string(),
                value: rest.unwrap_or_default().to_string(),
            },
            ("blur", Some(field)) => UiEvent::Blur {
                field: field.to_string(),
            },
            ("loaded", _) | ("failed", _) => {
                let Some(MediaView::Loading { requested }) =
                    ui.lightbox().and_then(|l| l.media()).cloned()
                else {
                    println!("no media loading");
                    continue;
                };
                if command == "loaded" {
                    UiEvent::MediaLoaded { media: requested }
                } else {
                    UiEvent::MediaFailed { media: requested }
                }
            }
            ("submit", _) => {
                match &endpoint {
                    Some(endpoint) => print_output(&ui.submit(endpoint, &clock).await, args, false),
                    None => println!("{}", "no endpoint configured".red()),
                }
                continue;
            }
            ("state", _) => {
                print_state(&ui);
                continue;
            }
            _ => {
                print_help();
                continue;
            }
        };

        print_output(&ui.handle(event, now), args, false);
        for media in ui.take_media_requests() {
            println!("  {} {}", "load".cyan(), media);
        }
    }
    println!("\nSession ended.");
}

fn key(key: Key, shift: bool) -> UiEvent {
    UiEvent::Key { key, shift }
}

fn gallery_item(n: &str) -> Option<ElementId> {
    let index = n.parse::<usize>().ok()?.checked_sub(1)?;
    demo::GALLERY_ITEMS.get(index).copied()
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Full => "full",
        Mode::NavigationOnly => "nav-only",
    }
}

fn print_header() {
    println!("{}", format!("Emunah v{} - interface console", VERSION).bold());
    println!("Type 'help' for commands, 'quit' to exit.");
    println!();
}

fn print_help() {
    println!("  next | prev | left | right | end         carousel");
    println!("  open <n> | close | backdrop | esc | tab | backtab | loaded | failed");
    println!("  see <n>                                  gallery tile scrolled into view");
    println!("  type <field> <value> | blur <field> | submit");
    println!("  menu | link [2] | cta | resize <width> | state");
}

fn print_output(output: &DispatchOutput, args: &Args, quiet_when_empty: bool) {
    if quiet_when_empty && output.reasons.is_empty() {
        return;
    }
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!(error = %e, "cannot serialise output"),
        }
        return;
    }
    if args.no_color {
        println!("{}", output.to_parseable_string());
        return;
    }
    for reason in &output.reasons {
        let code = match reason.code().chars().next() {
            Some('I') => reason.code().dimmed(),
            Some('F') | Some('N') => reason.code().yellow(),
            Some('L') => reason.code().magenta(),
            _ => reason.code().green(),
        };
        println!("  {} {}", code, reason.description().dimmed());
    }
}

fn print_state<H: ViewHost>(ui: &Interface<H>) {
    if let Some(carousel) = ui.carousel() {
        let state = carousel.state();
        println!(
            "  {} visible={:?} index={} v={} animating={} {}",
            "carousel".bold(),
            carousel.visible_slides(),
            state.logical_index,
            state.visible_count,
            state.animating,
            carousel.track_style().to_css()
        );
    }
    if let Some(lightbox) = ui.lightbox() {
        let title = lightbox.payload().map(|p| p.title.as_str()).unwrap_or("-");
        println!(
            "  {} {} title={} media={}",
            "lightbox".bold(),
            lightbox.state(),
            title,
            lightbox.displayed_media().unwrap_or("-")
        );
    }
    if let Some(form) = ui.form() {
        println!("  {} {:?}", "form".bold(), form.control());
        for field in form.fields() {
            let mark = match (&field.error_message, field.valid) {
                (Some(msg), _) => msg.red().to_string(),
                (None, true) => "ok".green().to_string(),
                (None, false) => "-".dimmed().to_string(),
            };
            println!("    {:<10} {:<24} {}", field.name, field.raw_value, mark);
        }
    }
    if let Some(notification) = ui.notifications().visible() {
        println!(
            "  {} {} [{}] {}",
            "notification".bold(),
            swatch(notification.kind.background()),
            notification.kind.class(),
            notification.message
        );
    }
    if let Some(nav) = ui.navigation() {
        println!("  {} open={}", "menu".bold(), nav.is_open());
    }
}

/// Two-cell colour sample for a `#rrggbb` value
fn swatch(hex: &str) -> ColoredString {
    let rgb = u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0);
    "  ".on_truecolor((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}
