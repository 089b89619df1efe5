//! Command-line argument definition and processing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use super::Context;
use crate::sources::ApiError;

/// Upwall - browse, share and download wallpapers from the command line
#[derive(Parser, Debug)]
#[command(name = "upwall")]
#[command(version)]
#[command(about = "Browse, share and download wallpapers from the command line", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration directory (default: ~/.config/upwall)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Backend base URL, overriding settings.conf and UPWALL_BACKEND_URL
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Sign in with this e-mail; the password is prompted without echo
    #[arg(long, value_name = "EMAIL", conflicts_with = "register")]
    pub login: Option<String>,

    /// Create an account with this e-mail (requires --user-name and --photo)
    #[arg(long, value_name = "EMAIL", requires_all = ["user_name", "photo"])]
    pub register: Option<String>,

    /// Display name for --register
    #[arg(long, value_name = "NAME")]
    pub user_name: Option<String>,

    /// Profile photo (JPEG) for --register
    #[arg(long, value_name = "PATH")]
    pub photo: Option<PathBuf>,

    /// Sign out and forget the stored session
    #[arg(long)]
    pub logout: bool,

    /// Show the signed-in user
    #[arg(long)]
    pub whoami: bool,

    /// List public wallpapers
    #[arg(short = 'l', long)]
    pub list: bool,

    /// List your own uploads
    #[arg(long)]
    pub mine: bool,

    /// Show details of one or more wallpapers
    #[arg(long, value_name = "ID", num_args = 1..)]
    pub show: Vec<String>,

    /// Delete one of your wallpapers
    #[arg(long, value_name = "ID")]
    pub delete: Option<String>,

    /// Download a wallpaper image into the download directory
    #[arg(short = 'd', long, value_name = "ID")]
    pub download: Option<String>,

    /// Upload an image file as a new wallpaper (requires --title)
    #[arg(long, value_name = "PATH", requires = "title")]
    pub upload: Option<PathBuf>,

    /// Title for --upload
    #[arg(long)]
    pub title: Option<String>,

    /// Description for --upload
    #[arg(long, default_value = "")]
    pub description: String,

    /// With --upload: category of the new wallpaper. Otherwise: list wallpapers in this category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Comma-separated tags for --upload
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Target device for --upload (mobile, desktop)
    #[arg(long, default_value = "mobile")]
    pub device: String,

    /// Show trending wallpapers (all, popular, recent, top_rated)
    #[arg(long, value_name = "MODE", num_args = 0..=1, default_missing_value = "all")]
    pub trending: Option<String>,

    /// Show the public listing in random order
    #[arg(long)]
    pub feed: bool,

    /// List categories, optionally filtered by a search query
    #[arg(long, value_name = "QUERY", num_args = 0..=1, default_missing_value = "")]
    pub categories: Option<String>,

    /// Show the top creators
    #[arg(long)]
    pub leaderboard: bool,

    /// Check whether a newer app version is published
    #[arg(long)]
    pub check_update: bool,
}

impl Args {
    /// Whether any command flag was given.
    #[must_use]
    pub fn has_command(&self) -> bool {
        self.login.is_some()
            || self.register.is_some()
            || self.logout
            || self.whoami
            || self.list
            || self.mine
            || !self.show.is_empty()
            || self.delete.is_some()
            || self.download.is_some()
            || self.upload.is_some()
            || self.trending.is_some()
            || self.feed
            || self.categories.is_some()
            || self.category.is_some()
            || self.leaderboard
            || self.check_update
    }
}

/// What: Run every command flag given on the command line, in a fixed order.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `ctx`: Stores and settings built at startup.
///
/// Output:
/// - `ExitCode::SUCCESS` when every command succeeded; otherwise the first error is printed
///   to stderr and `ExitCode::FAILURE` is returned.
///
/// Details:
/// - Session commands run first (logout, login/register), so `--login x --mine` works in one call.
/// - Without any command flag, the help text is printed.
pub async fn process_args(args: &Args, ctx: &Context) -> ExitCode {
    if !args.has_command() {
        use clap::CommandFactory;
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    }
    match run_commands(args, ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "[Cli] command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run_commands(args: &Args, ctx: &Context) -> Result<(), ApiError> {
    use super::{account, browse, manage};

    if args.logout {
        account::handle_logout(ctx)?;
    }
    if let Some(email) = &args.login {
        account::handle_login(ctx, email).await?;
    }
    if let Some(email) = &args.register {
        account::handle_register(
            ctx,
            email,
            args.user_name.as_deref().unwrap_or_default(),
            args.photo.clone().unwrap_or_default(),
        )
        .await?;
    }
    if args.needs_session() {
        ctx.auth.initialize().await;
    }
    if args.whoami {
        account::handle_whoami(ctx);
    }
    if args.list {
        browse::handle_list(ctx).await;
    }
    if args.mine {
        browse::handle_mine(ctx).await?;
    }
    if !args.show.is_empty() {
        browse::handle_show(ctx, &args.show).await?;
    }
    if let Some(mode) = &args.trending {
        browse::handle_trending(ctx, mode).await?;
    }
    if args.feed {
        browse::handle_feed(ctx).await;
    }
    if let Some(query) = &args.categories {
        browse::handle_categories(ctx, query).await;
    }
    if args.upload.is_none()
        && let Some(name) = &args.category
    {
        browse::handle_category(ctx, name).await;
    }
    if args.leaderboard {
        browse::handle_leaderboard(ctx).await?;
    }
    if let Some(path) = &args.upload {
        manage::handle_upload(ctx, args, path).await?;
    }
    if let Some(id) = &args.download {
        manage::handle_download(ctx, id).await?;
    }
    if let Some(id) = &args.delete {
        manage::handle_delete(ctx, id).await?;
    }
    if args.check_update {
        super::update::handle_check_update(ctx).await;
    }
    Ok(())
}

impl Args {
    /// Commands that read the stored session, unless a login/register in this call already opened one.
    fn needs_session(&self) -> bool {
        let opened_now = self.login.is_some() || self.register.is_some();
        !opened_now && (self.whoami || self.mine || self.upload.is_some() || self.delete.is_some())
    }
}
