use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use blogdash::app::{self, App, Services};
use blogdash::config::Config;
use blogdash::fetch::HttpTransport;
use blogdash::logging::init_tracing;
use blogdash::session::{ContextProvider, LogThemeSink, Theme};
use blogdash::signup::{FieldInput, SignupField, SignupForm};
use blogdash::storage::FileStore;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "blogdash", version, about = "Browse the quest board of the realm")]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open a route and print the resulting view
    Open {
        /// Route path, e.g. /dashboard or /dashboard/post/3
        path: String,

        /// Log in under this hero name before navigating
        #[arg(long)]
        login: Option<String>,

        /// Start with this theme instead of the configured one
        #[arg(long)]
        theme: Option<Theme>,

        /// Flip the theme before rendering
        #[arg(long)]
        toggle_theme: bool,
    },
    /// Validate a hero registration
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long = "class", default_value = "warrior")]
        hero_class: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    match cli.command {
        Command::Open {
            path,
            login,
            theme,
            toggle_theme,
        } => {
            let theme = theme.unwrap_or(config.ui.theme);
            open(config, &path, login.as_deref(), theme, toggle_theme).await
        }
        Command::Signup {
            email,
            password,
            hero_class,
        } => signup(email, password, hero_class),
    }
}

async fn open(
    config: Config,
    path: &str,
    login: Option<&str>,
    theme: Theme,
    toggle_theme: bool,
) -> anyhow::Result<()> {
    let store = FileStore::open(config.storage_path());
    let transport = HttpTransport::new().context("Failed to build HTTP client")?;
    let services = Services {
        api: config.api.clone(),
        transport: Arc::new(transport),
        store: Arc::new(store),
    };
    let context = ContextProvider::new(theme, Arc::new(LogThemeSink));
    let mut app = App::new(services, context);

    if toggle_theme {
        app.toggle_theme();
    }
    if let Some(name) = login {
        app.login(name);
    }
    app.open(path)?;
    app.settle().await;

    println!("{}", app::render(&app));
    Ok(())
}

fn signup(email: String, password: String, hero_class: String) -> anyhow::Result<()> {
    let mut form = SignupForm::new();
    form.update(FieldInput::new(SignupField::Email.as_str(), email))?;
    form.update(FieldInput::new(SignupField::Password.as_str(), password))?;
    form.update(FieldInput::new(SignupField::HeroClass.as_str(), hero_class))?;

    let registration = form.submit()?;
    println!(
        "Welcome, {} of {}! Your chronicle awaits.",
        registration.hero_class.label(),
        registration.email
    );
    Ok(())
}
