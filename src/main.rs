// SPDX-License-Identifier: MPL-2.0
use event_lens::app::paths;
use event_lens::application::account;
use event_lens::application::gallery::{GalleryLoader, GalleryView};
use event_lens::application::page::{GalleryPage, PageSettings};
use event_lens::application::port::keys;
use event_lens::config::{self, Config};
use event_lens::domain::gallery::{advance_window, DisplayWindow, GalleryItem, GalleryKind, Identifier};
use event_lens::domain::session::InteractionKind;
use event_lens::error::Result;
use event_lens::infrastructure::{ApiClient, FileSessionStore};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
event_lens - browse event photo galleries

USAGE:
  event_lens <COMMAND> [OPTIONS]

COMMANDS:
  gallery <slug> [--videos] [--pages N] [--follow] [--save]
  login <slug> --email EMAIL --password PASSWORD
  search <slug> <selfie-path>
  result <slug> [--pages N]
  archive <slug> --password PASSWORD
  comment <slug> <text>
  logout

OPTIONS:
  --config-dir DIR   Directory holding settings.toml
  --data-dir DIR     Directory holding the session store
  --api-url URL      Base URL of the event API
  -h, --help         Print this help
";

#[derive(Debug)]
enum Command {
    Help,
    Gallery {
        slug: String,
        videos: bool,
        pages: u32,
        follow: bool,
        save: bool,
    },
    Login {
        slug: String,
        email: String,
        password: String,
    },
    Search {
        slug: String,
        selfie: PathBuf,
    },
    Result {
        slug: String,
        pages: u32,
    },
    Archive {
        slug: String,
        password: String,
    },
    Comment {
        slug: String,
        text: String,
    },
    Logout,
}

#[derive(Debug)]
struct Cli {
    command: Command,
    config_dir: Option<String>,
    data_dir: Option<String>,
    api_url: Option<String>,
}

fn parse_args() -> std::result::Result<Cli, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    // Subcommand first: pico-args only looks at the leading argument.
    let subcommand = args.subcommand()?;
    if args.contains(["-h", "--help"]) {
        return Ok(Cli {
            command: Command::Help,
            config_dir: None,
            data_dir: None,
            api_url: None,
        });
    }

    let config_dir = args.opt_value_from_str("--config-dir")?;
    let data_dir = args.opt_value_from_str("--data-dir")?;
    let api_url = args.opt_value_from_str("--api-url")?;

    let command = match subcommand.as_deref() {
        Some("gallery") => Command::Gallery {
            videos: args.contains("--videos"),
            follow: args.contains("--follow"),
            save: args.contains("--save"),
            pages: args.opt_value_from_str("--pages")?.unwrap_or(1),
            slug: args.free_from_str()?,
        },
        Some("login") => Command::Login {
            email: args.value_from_str("--email")?,
            password: args.value_from_str("--password")?,
            slug: args.free_from_str()?,
        },
        Some("search") => Command::Search {
            slug: args.free_from_str()?,
            selfie: args.free_from_str()?,
        },
        Some("result") => Command::Result {
            pages: args.opt_value_from_str("--pages")?.unwrap_or(1),
            slug: args.free_from_str()?,
        },
        Some("archive") => Command::Archive {
            password: args.value_from_str("--password")?,
            slug: args.free_from_str()?,
        },
        Some("comment") => Command::Comment {
            slug: args.free_from_str()?,
            text: args.free_from_str()?,
        },
        Some("logout") => Command::Logout,
        Some(other) => {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unknown command '{other}'"),
            })
        }
        None => Command::Help,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("Ignoring unused arguments: {rest:?}");
    }

    Ok(Cli {
        command,
        config_dir,
        data_dir,
        api_url,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_default_env().init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(auth) = err.as_auth() {
                eprintln!("{err}. Log in again at {}", event_lens::app::Route::for_auth_error(auth));
            } else {
                eprintln!("{err}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if matches!(cli.command, Command::Help) {
        print!("{HELP}");
        return Ok(());
    }

    paths::init_cli_overrides(cli.data_dir, cli.config_dir);
    let (mut config, warning) = config::load();
    if let Some(warning) = warning {
        eprintln!("{warning}");
    }
    config = config.with_env_overrides();
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let api = ApiClient::new(&config.api)?;
    let store = FileSessionStore::open(None)?;
    log::debug!("API {} / session {}", api.base_url(), store.path().display());

    match cli.command {
        Command::Help => Ok(()),
        Command::Gallery {
            slug,
            videos,
            pages,
            follow,
            save,
        } => {
            let kind = if videos {
                GalleryKind::Videos
            } else {
                GalleryKind::General
            };
            browse(&api, &store, &config, &slug, kind, pages, follow, save).await
        }
        Command::Login {
            slug,
            email,
            password,
        } => {
            let identifier = Identifier::parse(&slug)?;
            let next = api.login(&store, &identifier, &email, &password).await?;
            println!("Logged in. Next: {next}");
            Ok(())
        }
        Command::Search { slug, selfie } => {
            let identifier = Identifier::parse(&slug)?;
            let next = api.search_selfie(&store, &identifier, &selfie).await?;
            let snapshot = account::restore_search_result(&store);
            println!("{} matching items. Next: {next}", snapshot.total_count());
            Ok(())
        }
        Command::Result { slug, pages } => {
            let identifier = Identifier::parse(&slug)?;
            let snapshot = account::restore_search_result(&store);
            if snapshot.is_empty() {
                println!("No results for {identifier}");
                return Ok(());
            }
            let page_size = config.gallery.page_size(GalleryKind::General);
            let mut window = DisplayWindow::empty();
            for _ in 0..pages.max(1) {
                window = advance_window(window, &snapshot, page_size);
            }
            print_items(window.items(&snapshot), 0);
            println!("{} of {} items", window.len(), snapshot.total_count());
            if let Some(age) = store.age(keys::SEARCH_RESULT, chrono::Utc::now()) {
                println!("Search made {} min ago", age.num_minutes());
            }
            Ok(())
        }
        Command::Archive { slug, password } => {
            let identifier = Identifier::parse(&slug)?;
            let url = api.validate_download(&identifier, &password).await?;
            println!("{url}");
            Ok(())
        }
        Command::Comment { slug, text } => {
            let identifier = Identifier::parse(&slug)?;
            api.post_comment(&store, &identifier, &text).await?;
            println!("Comment sent");
            Ok(())
        }
        Command::Logout => {
            account::logout(&store)?;
            println!("Logged out");
            Ok(())
        }
    }
}

/// Saves gallery items into the download directory, recording the intent
/// first.
struct Saver<'a> {
    api: &'a ApiClient,
    store: &'a FileSessionStore,
    identifier: Identifier,
    kind: GalleryKind,
    dir: PathBuf,
}

impl Saver<'_> {
    async fn save(&self, item: &GalleryItem) -> Result<()> {
        let file_name = item.file_name(self.kind);
        self.api
            .track_download_intent(self.store, &self.identifier, &file_name)
            .await;
        let (path, _) = self.api.download_item(item, self.kind, &self.dir).await?;
        println!("Saved {}", path.display());
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
async fn browse(
    api: &ApiClient,
    store: &FileSessionStore,
    config: &Config,
    slug: &str,
    kind: GalleryKind,
    pages: u32,
    follow: bool,
    save: bool,
) -> Result<()> {
    let settings = PageSettings {
        page_size: config.gallery.page_size(kind),
        inactivity_timeout: config.session.inactivity_timeout(),
        lookahead: config.gallery.lookahead(),
        long_press: config.session.long_press(),
    };
    let mut page = GalleryPage::new(GalleryLoader::new(api.clone(), kind), settings);

    match page.mount(slug).await? {
        GalleryView::Failed(err) => return Err(err.into()),
        GalleryView::Empty => {
            println!("No items yet");
            return Ok(());
        }
        _ => {}
    }

    for _ in 1..pages.max(1) {
        if !page.show_more() {
            break;
        }
    }
    print_items(&page.visible_items(), 0);
    print_view(&page.view());

    let saver = Saver {
        api,
        store,
        identifier: Identifier::parse(slug)?,
        kind,
        dir: paths::get_download_dir_with_override(None),
    };

    if follow {
        follow_page(&page, &saver, settings.long_press.as_duration()).await?;
    }

    if save {
        for item in page.visible_items() {
            saver.save(&item).await?;
        }
    }

    page.unmount();
    Ok(())
}

/// Drives the page from stdin until it closes or the session expires.
///
/// An empty line reveals one more page; `hold N` holds item `N` down long
/// enough to save it.
async fn follow_page(
    page: &GalleryPage<ApiClient>,
    saver: &Saver<'_>,
    hold: Duration,
) -> Result<()> {
    println!("Press Enter for more, or type 'hold N' to save item N");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut navigation = page.navigation();
    let mut hints = page.download_hints();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                page.events().interact(InteractionKind::KeyDown);
                if let Some(position) = line.trim().strip_prefix("hold ") {
                    match position.trim().parse::<usize>() {
                        Ok(n) if n > 0 => {
                            page.events().pressed(n - 1);
                            tokio::time::sleep(hold + Duration::from_millis(10)).await;
                            page.events().released();
                        }
                        _ => println!("Usage: hold N (N counts from 1)"),
                    }
                    continue;
                }
                let shown = page.visible_items().len();
                if page.show_more() {
                    print_items(&page.visible_items()[shown..], shown);
                    print_view(&page.view());
                } else {
                    println!("End of gallery");
                }
            }
            changed = hints.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let item = hints.borrow_and_update().clone();
                if let Some(item) = item {
                    saver.save(&item).await?;
                }
            }
            changed = navigation.changed() => {
                if changed.is_ok() {
                    if let Some(route) = navigation.borrow().clone() {
                        println!("Session expired. Continue at {route}");
                    }
                }
                return Ok(());
            }
        }
    }
}

fn print_items(items: &[GalleryItem], offset: usize) {
    for (index, item) in items.iter().enumerate() {
        println!("{:>4}  {}  {}", offset + index + 1, item.key(), item.url());
    }
}

fn print_view(view: &GalleryView) {
    match view {
        GalleryView::Populated {
            total_count,
            window_len,
            has_more,
        } => {
            let more = if *has_more { ", more available" } else { "" };
            println!("{window_len} of {total_count} items{more}");
        }
        GalleryView::Empty => println!("No items yet"),
        GalleryView::Loading => println!("Loading"),
        GalleryView::InvalidIdentifier => println!("Invalid event identifier"),
        GalleryView::Failed(err) => println!("{err}"),
    }
}

