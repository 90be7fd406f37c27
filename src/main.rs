//! Snooze CLI - view/controller layer for the story service.
//!
//! Each subcommand maps one user action onto the application state; no
//! business logic lives here.
//!
//! Usage:
//!   snooze stories                     # browse the current story list
//!   snooze login -u ann -p secret      # open a session
//!   snooze submit -t "Title" -a "Ann" --url https://example.com
//!   snooze favorite <story-id>

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snooze::config::Config;
use snooze::error::ApiError;
use snooze::models::{Story, StoryDraft};
use snooze::state::AppState;
use snooze::user::User;

#[derive(Parser)]
#[command(name = "snooze")]
#[command(about = "CLI for a Hack-or-Snooze style story service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the service base URL
    #[arg(long)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account and open a session
    Signup {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        name: String,
    },
    /// Open a session with an existing account
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// End the session and forget the stored credential
    Logout,
    /// Show the current story list
    Stories,
    /// Submit a new story
    Submit {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        author: String,
        #[arg(long)]
        url: String,
    },
    /// Delete one of your own stories by id
    Delete { story_id: String },
    /// Mark a story as a favorite
    Favorite { story_id: String },
    /// Remove a story from your favorites
    Unfavorite { story_id: String },
    /// Show your favorite stories
    Favorites,
    /// Show the stories you submitted
    Mine,
    /// Show the signed-in user's profile
    Whoami,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load();
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    let mut state = AppState::new(&config);

    match cli.command {
        Commands::Signup {
            username,
            password,
            name,
        } => {
            let user = state.signup(&username, &password, &name).await?;
            println!("Welcome, {}! Session saved.", user.name);
        }
        Commands::Login { username, password } => {
            let user = state.login(&username, &password).await?;
            println!("Logged in as {}. Session saved.", user.username);
        }
        Commands::Logout => {
            state.logout()?;
            println!("Logged out (stored session removed).");
        }
        Commands::Stories => {
            state.startup().await?;
            if state.stories.is_empty() {
                println!("No stories yet.");
            }
            for story in &state.stories.stories {
                println!("{}", format_story(story, state.user.as_ref()));
            }
        }
        Commands::Submit { title, author, url } => {
            state.startup().await?;
            let draft = StoryDraft { title, author, url };
            let story = state.submit(&draft).await?;
            println!("Submitted: {}", format_story(&story, state.user.as_ref()));
        }
        Commands::Delete { story_id } => {
            state.startup().await?;
            state.delete(&story_id).await?;
            println!("Deleted story {story_id}.");
        }
        Commands::Favorite { story_id } => {
            state.startup().await?;
            let story = state.favorite(&story_id).await?;
            println!("Favorited: {}", format_story(&story, state.user.as_ref()));
        }
        Commands::Unfavorite { story_id } => {
            state.startup().await?;
            let story = state.unfavorite(&story_id).await?;
            println!("Unfavorited: {}", format_story(&story, state.user.as_ref()));
        }
        Commands::Favorites => {
            state.startup().await?;
            let user = require_session(&state)?;
            if user.favorites.is_empty() {
                println!("No favorites yet.");
            }
            for story in &user.favorites {
                println!("{}", format_story(story, Some(user)));
            }
        }
        Commands::Mine => {
            state.startup().await?;
            let user = require_session(&state)?;
            if user.own_stories.is_empty() {
                println!("You have not submitted any stories.");
            }
            for story in &user.own_stories {
                println!("{}", format_story(story, Some(user)));
            }
        }
        Commands::Whoami => {
            state.startup().await?;
            let user = require_session(&state)?;
            println!("Name: {}", user.name);
            println!("Username: {}", user.username);
            println!("Account created: {}", user.created_at.format("%Y-%m-%d"));
        }
    }

    Ok(())
}

fn require_session(state: &AppState) -> Result<&User, ApiError> {
    state
        .user
        .as_ref()
        .ok_or_else(|| ApiError::Authorization("no active session; login first".to_string()))
}

/// One story per line: favorite star, title, best-effort hostname, author,
/// submitter, id. A malformed URL renders as "?" rather than failing.
fn format_story(story: &Story, user: Option<&User>) -> String {
    let star = match user {
        Some(u) if u.is_favorite(story) => "*",
        _ => " ",
    };
    let host = story.host_name().unwrap_or_else(|_| "?".to_string());
    format!(
        "[{star}] {} ({host}) by {} | posted by {} [{}]",
        story.title, story.author, story.username, story.story_id
    )
}
