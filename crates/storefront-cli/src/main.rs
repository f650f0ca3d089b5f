use std::env;
use std::fs;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use storefront_core::actions::StoreAction;
use storefront_core::actions::UserAction;
use storefront_core::cache::QueryCache;
use storefront_core::cache::QueryKey;
use storefront_core::config::Config;
use storefront_core::models::Address;
use storefront_core::models::AddressId;
use storefront_core::models::ArticleId;
use storefront_core::models::DraftPatch;
use storefront_core::models::ReviewId;
use storefront_core::reducer::reduce;
use storefront_core::reducer::Effect;
use storefront_core::state::ModalStep;
use storefront_core::state::NoticeLevel;
use storefront_core::state::Remote;
use storefront_core::state::StoreState;
use storefront_core::validation::format_phone_number;
use storefront_core::validation::validate_email;
use storefront_core::validation::validate_password;
use storefront_core::validation::validate_username;
use storefront_gateway::assistant::AssistantEvent;
use storefront_gateway::assistant::AssistantService;
use storefront_gateway::assistant::ScriptedAssistant;
use storefront_gateway::client::HttpStoreClient;
use storefront_gateway::client::MemoryStoreClient;
use storefront_gateway::client::StoreClient;
use storefront_gateway::contracts::Credentials;
use storefront_gateway::contracts::MailConfirm;
use storefront_gateway::contracts::NewListing;
use storefront_gateway::contracts::NewProduct;
use storefront_gateway::contracts::PasswordChange;
use storefront_gateway::contracts::SignupRequest;
use storefront_gateway::dispatch::Dispatcher;
use storefront_gateway::dispatch::GatewayEvent;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("storefront {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "address-book" => {
            let options = parse_options(args.collect())?;
            address_book(make_client(&options)?)
        }
        "reviews" => {
            let mut rest: Vec<String> = args.collect();
            if rest.is_empty() {
                return Err("reviews requires an article id".into());
            }
            let article = rest.remove(0);
            let options = parse_options(rest)?;
            reviews(make_client(&options)?, ArticleId::new(article))
        }
        "catalog" => {
            let options = parse_options(args.collect())?;
            catalog(make_client(&options)?, options.page)
        }
        "login" => {
            let options = parse_options(args.collect())?;
            login(make_client(&options)?)
        }
        "signup" => {
            let options = parse_options(args.collect())?;
            signup(make_client(&options)?)
        }
        "account" => {
            let mut rest: Vec<String> = args.collect();
            if rest.is_empty() {
                return Err("account requires an action: change-password | delete | logout".into());
            }
            let action = rest.remove(0);
            let options = parse_options(rest)?;
            account(make_client(&options)?, &action)
        }
        "new-item" => {
            let options = parse_options(args.collect())?;
            new_item(make_client(&options)?)
        }
        "post-register" => {
            let options = parse_options(args.collect())?;
            post_register(make_client(&options)?)
        }
        "categories" => {
            let mut rest: Vec<String> = args.collect();
            let added = if rest.first().map(String::as_str) == Some("add") {
                rest.remove(0);
                if rest.is_empty() {
                    return Err("categories add requires a name".into());
                }
                Some(rest.remove(0))
            } else {
                None
            };
            let options = parse_options(rest)?;
            categories(make_client(&options)?, added)
        }
        "chat" => chat(),
        _ => {
            print_help();
            Err(format!("unknown command: {command}").into())
        }
    }
}

#[derive(Debug, Default)]
struct Options {
    simulated: bool,
    base_url: Option<String>,
    page: u32,
}

fn parse_options(args: Vec<String>) -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = Options {
        page: 1,
        ..Options::default()
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--simulated" => {
                options.simulated = true;
                i += 1;
            }
            "--base-url" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--base-url requires a URL".into());
                };
                options.base_url = Some(value.clone());
                i += 2;
            }
            "--page" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--page requires a number".into());
                };
                options.page = value.parse()?;
                i += 2;
            }
            other => {
                return Err(format!("unsupported argument: {other}").into());
            }
        }
    }
    Ok(options)
}

fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let Some(dir) = dirs::config_dir() else {
        return Ok(Config::default());
    };
    let path = dir.join("storefront").join("config.toml");
    match fs::read_to_string(&path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(_) => Ok(Config::default()),
    }
}

fn make_client(options: &Options) -> Result<Arc<dyn StoreClient>, Box<dyn std::error::Error>> {
    if options.simulated {
        return Ok(Arc::new(MemoryStoreClient::seeded()));
    }
    let mut config = load_config()?;
    if let Some(base_url) = &options.base_url {
        config.api.base_url = base_url.clone();
    }
    Ok(Arc::new(HttpStoreClient::new(&config.api)?))
}

/// Owns the reduce/effect/completion cycle for the interactive
/// sessions. Worker completions only touch state through the reducer,
/// after the cache has accepted them.
struct Shell {
    state: StoreState,
    cache: QueryCache,
    dispatcher: Dispatcher,
    rx: Receiver<GatewayEvent>,
    outstanding: usize,
    selected: Option<Address>,
}

impl Shell {
    fn new(client: Arc<dyn StoreClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: StoreState::new(),
            cache: QueryCache::new(),
            dispatcher: Dispatcher::new(client, tx),
            rx,
            outstanding: 0,
            selected: None,
        }
    }

    fn apply(&mut self, action: StoreAction) {
        let effects = reduce(&mut self.state, action);
        self.perform(effects);
    }

    fn perform(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestFrame => {}
                Effect::Fetch(key) => {
                    self.cache.mount(key.clone());
                    self.start_fetch(key);
                }
                Effect::Release(key) => self.cache.release(&key),
                Effect::Invalidate(tag) => {
                    for key in self.cache.invalidate(&tag) {
                        self.start_fetch(key);
                    }
                }
                Effect::Run(request) => {
                    self.dispatcher.run(request);
                    self.outstanding += 1;
                }
                Effect::EmitSelectedAddress(address) => {
                    self.selected = Some(address);
                }
                Effect::EmitEditTarget(id) => {
                    tracing::debug!(id = id.as_str(), "edit target");
                }
            }
        }
    }

    fn start_fetch(&mut self, key: QueryKey) {
        if let Some(generation) = self.cache.begin_fetch(&key) {
            self.dispatcher.fetch(key, generation);
            self.outstanding += 1;
        }
    }

    /// Drain completions until every dispatched request has settled or
    /// the wait budget runs out (a slow network must not wedge the
    /// prompt).
    fn pump(&mut self) {
        let mut budget = 50;
        while self.outstanding > 0 && budget > 0 {
            match self.rx.recv_timeout(Duration::from_millis(200)) {
                Ok(event) => self.settle(event),
                Err(RecvTimeoutError::Timeout) => budget -= 1,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        // Completions that raced in after the loop still count.
        while let Ok(event) = self.rx.try_recv() {
            self.settle(event);
        }
    }

    fn settle(&mut self, event: GatewayEvent) {
        self.outstanding = self.outstanding.saturating_sub(1);
        match event {
            GatewayEvent::Fetch {
                key,
                generation,
                ok,
                action,
            } => {
                if self.cache.settle(&key, generation, ok) {
                    self.apply(StoreAction::Runtime(action));
                }
            }
            GatewayEvent::Mutation(action) => self.apply(StoreAction::Runtime(action)),
        }
    }

    fn drain_notices(&mut self) {
        loop {
            let Some(notice) = self.state.notices.iter().next().cloned() else {
                break;
            };
            let marker = match notice.level {
                NoticeLevel::Error => "!!",
                NoticeLevel::Success => "ok",
                NoticeLevel::Info => "--",
            };
            match &notice.body {
                Some(body) => println!("[{marker}] {}: {body}", notice.title),
                None => println!("[{marker}] {}", notice.title),
            }
            self.apply(StoreAction::User(UserAction::DismissNotice));
        }
    }
}

fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn address_book(client: Arc<dyn StoreClient>) -> Result<(), Box<dyn std::error::Error>> {
    let mut shell = Shell::new(client);
    shell.cache.mount(QueryKey::AuthCheck);
    shell.start_fetch(QueryKey::AuthCheck);
    shell.apply(StoreAction::User(UserAction::OpenAddressBook));

    loop {
        shell.pump();
        shell.drain_notices();

        match shell.state.modal.step() {
            ModalStep::Closed | ModalStep::Review => break,
            ModalStep::List => {
                let rows = render_list(&shell.state);
                let Some(line) = prompt("address-book> ")? else {
                    break;
                };
                let mut parts = line.split_whitespace();
                let verb = parts.next().unwrap_or_default();
                let arg = parts.next();
                match verb {
                    "" => {}
                    "add" => shell.apply(StoreAction::User(UserAction::RequestNewAddress)),
                    "edit" => match row_id(&rows, arg) {
                        Some(id) => {
                            shell.apply(StoreAction::User(UserAction::RequestEditAddress(id)))
                        }
                        None => println!("usage: edit <row>"),
                    },
                    "select" => match row_id(&rows, arg) {
                        Some(id) => shell.apply(StoreAction::User(UserAction::SelectAddress(id))),
                        None => println!("usage: select <row>"),
                    },
                    "delete" => match row_id(&rows, arg) {
                        Some(id) => shell.apply(StoreAction::User(UserAction::DeleteAddress(id))),
                        None => println!("usage: delete <row>"),
                    },
                    "close" | "quit" | "q" => {
                        shell.apply(StoreAction::User(UserAction::CloseAddressBook))
                    }
                    other => println!("unknown command: {other}"),
                }
            }
            ModalStep::Add | ModalStep::Edit => {
                render_form(&shell.state);
                let Some(line) = prompt("form> ")? else {
                    break;
                };
                let (verb, rest) = match line.split_once(char::is_whitespace) {
                    Some((verb, rest)) => (verb, rest.trim()),
                    None => (line.as_str(), ""),
                };
                match verb {
                    "" => {}
                    "set" => match parse_set(rest) {
                        Some(patch) => shell.apply(StoreAction::User(UserAction::PatchDraft(patch))),
                        None => println!(
                            "usage: set <name|phone|address|detail|zip|memo|default> <value>"
                        ),
                    },
                    "submit" => shell.apply(StoreAction::User(UserAction::SubmitAddressForm)),
                    "cancel" => shell.apply(StoreAction::User(UserAction::CancelAddressForm)),
                    other => println!("unknown command: {other}"),
                }
            }
        }
    }

    shell.pump();
    shell.drain_notices();
    // The caller-facing selection output: one JSON object, the same
    // shape a checkout flow would receive.
    if let Some(address) = &shell.selected {
        println!("selected: {}", serde_json::to_string_pretty(address)?);
    }
    Ok(())
}

fn render_list(state: &StoreState) -> Vec<AddressId> {
    println!();
    println!("Shipping addresses");
    match &state.addresses {
        Remote::Loading | Remote::Idle => {
            println!("  (loading...)");
            Vec::new()
        }
        Remote::Failed(reason) => {
            println!("  could not load addresses: {reason}");
            Vec::new()
        }
        Remote::Ready(list) if list.is_empty() => {
            println!("  no saved addresses yet; use `add` to register one");
            Vec::new()
        }
        Remote::Ready(list) => {
            for (index, address) in list.iter().enumerate() {
                let badge = if address.is_default { " [default]" } else { "" };
                println!(
                    "  {}. {}{badge} | {} {} | {} | {}",
                    index + 1,
                    address.receiver_name,
                    address.main_address,
                    address.detail_address,
                    address.zip_code,
                    format_phone_number(&address.receiver_phone),
                );
                if let Some(memo) = &address.shipping_memo {
                    println!("     memo: {memo}");
                }
            }
            println!("  commands: add | edit <row> | select <row> | delete <row> | close");
            list.iter().map(|address| address.id.clone()).collect()
        }
    }
}

fn render_form(state: &StoreState) {
    let draft = state.modal.draft();
    let title = if state.modal.edit_mode() {
        "Edit address"
    } else {
        "New address"
    };
    println!();
    println!("{title}");
    println!("  name:    {}", draft.receiver_name);
    println!("  phone:   {}", draft.receiver_phone);
    println!("  address: {}", draft.main_address);
    println!("  detail:  {}", draft.detail_address);
    println!("  zip:     {}", draft.zip_code);
    println!("  default: {}", draft.is_default);
    println!("  memo:    {}", draft.shipping_memo);
    println!("  commands: set <field> <value> | submit | cancel");
}

fn row_id(rows: &[AddressId], arg: Option<&str>) -> Option<AddressId> {
    let index: usize = arg?.parse().ok()?;
    rows.get(index.checked_sub(1)?).cloned()
}

fn parse_set(rest: &str) -> Option<DraftPatch> {
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim().to_string()),
        None => (rest, String::new()),
    };
    let mut patch = DraftPatch::default();
    match field {
        "name" => patch.receiver_name = Some(value),
        "phone" => patch.receiver_phone = Some(value),
        "address" => patch.main_address = Some(value),
        "detail" => patch.detail_address = Some(value),
        "zip" => patch.zip_code = Some(value),
        "memo" => patch.shipping_memo = Some(value),
        "default" => patch.is_default = Some(matches!(value.as_str(), "on" | "true" | "yes")),
        _ => return None,
    }
    Some(patch)
}

fn reviews(
    client: Arc<dyn StoreClient>,
    article: ArticleId,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut shell = Shell::new(client);
    shell.cache.mount(QueryKey::AuthCheck);
    shell.start_fetch(QueryKey::AuthCheck);
    shell.apply(StoreAction::User(UserAction::OpenReviews(article)));

    let mut rows: Vec<ReviewId> = Vec::new();
    loop {
        shell.pump();
        shell.drain_notices();
        rows.clear();

        println!();
        println!("Reviews");
        match shell.state.reviews.as_ref().map(|panel| &panel.list) {
            None | Some(Remote::Idle) | Some(Remote::Loading) => println!("  (loading...)"),
            Some(Remote::Failed(reason)) => println!("  could not load reviews: {reason}"),
            Some(Remote::Ready(list)) if list.is_empty() => println!("  no reviews yet"),
            Some(Remote::Ready(list)) => {
                let me = shell.state.logged_in_user().map(|user| user.user_id.clone());
                for (index, review) in list.iter().enumerate() {
                    let liked = me
                        .as_deref()
                        .map(|user_id| review.liked_by_user(user_id))
                        .unwrap_or(false);
                    println!(
                        "  {}. {}/5 {} ({} likes{})",
                        index + 1,
                        review.rate,
                        review.content,
                        review.liked_by.len(),
                        if liked { ", liked by you" } else { "" },
                    );
                    rows.push(review.id.clone());
                }
            }
        }
        println!("  commands: like <row> | remove <row> | quit");

        let Some(line) = prompt("reviews> ")? else {
            break;
        };
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default();
        let arg = parts.next();
        let picked = |rows: &[ReviewId]| -> Option<ReviewId> {
            let index: usize = arg?.parse().ok()?;
            rows.get(index.checked_sub(1)?).cloned()
        };
        match verb {
            "" => {}
            "like" => match picked(&rows) {
                Some(id) => shell.apply(StoreAction::User(UserAction::ToggleReviewLike(id))),
                None => println!("usage: like <row>"),
            },
            "remove" => match picked(&rows) {
                Some(id) => shell.apply(StoreAction::User(UserAction::RemoveReview(id))),
                None => println!("usage: remove <row>"),
            },
            "quit" | "q" => {
                shell.apply(StoreAction::User(UserAction::CloseReviews));
                break;
            }
            other => println!("unknown command: {other}"),
        }
    }

    shell.pump();
    shell.drain_notices();
    Ok(())
}

fn catalog(client: Arc<dyn StoreClient>, page: u32) -> Result<(), Box<dyn std::error::Error>> {
    let listings = client.list_listings(page)?;
    if listings.is_empty() {
        println!("no listings on page {page}");
        return Ok(());
    }
    println!("Listings (page {page})");
    for listing in &listings {
        println!(
            "  {} [{}] | {} won | {} in stock | {}",
            listing.title,
            listing.id.as_str(),
            listing.product.price,
            listing.product.stock_quantity,
            listing.created_at.format("%Y-%m-%d"),
        );
    }
    Ok(())
}

fn login(client: Arc<dyn StoreClient>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(email) = prompt("email: ")? else {
        return Ok(());
    };
    validate_email(&email)?;
    let Some(password) = prompt("password: ")? else {
        return Ok(());
    };
    validate_password(&password)?;

    let user = client.login(&Credentials { email, password })?;
    println!("signed in as {} ({})", user.username, user.email);
    Ok(())
}

/// The signup round trip of the web client: verify the mail address,
/// check the username, then register.
fn signup(client: Arc<dyn StoreClient>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(email) = prompt("email: ")? else {
        return Ok(());
    };
    validate_email(&email)?;
    client.send_mail_code(&email)?;
    println!("a verification code was sent to {email}");

    let Some(code) = prompt("verification code: ")? else {
        return Ok(());
    };
    client.confirm_mail_code(&MailConfirm {
        email: email.clone(),
        email_code: code,
    })?;

    let Some(username) = prompt("username: ")? else {
        return Ok(());
    };
    validate_username(&username)?;
    client.check_username(&username)?;

    let Some(password) = prompt("password: ")? else {
        return Ok(());
    };
    validate_password(&password)?;

    client.signup(&SignupRequest {
        email,
        password,
        username: username.clone(),
    })?;
    println!("welcome, {username}; you can sign in now");
    Ok(())
}

fn account(
    client: Arc<dyn StoreClient>,
    action: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        "change-password" => {
            let Some(old_password) = prompt("current password: ")? else {
                return Ok(());
            };
            let Some(new_password) = prompt("new password: ")? else {
                return Ok(());
            };
            validate_password(&new_password)?;
            let Some(confirm) = prompt("new password again: ")? else {
                return Ok(());
            };
            if new_password != confirm {
                return Err("the new passwords do not match".into());
            }
            client.change_password(&PasswordChange {
                old_password,
                new_password,
            })?;
            println!("password changed");
            Ok(())
        }
        "delete" => {
            let Some(email) = prompt("email: ")? else {
                return Ok(());
            };
            let Some(password) = prompt("password: ")? else {
                return Ok(());
            };
            client.delete_account(&Credentials { email, password })?;
            println!("account deleted");
            Ok(())
        }
        "logout" => {
            client.logout()?;
            println!("signed out");
            Ok(())
        }
        other => Err(format!("unknown account action: {other}").into()),
    }
}

/// Product registration: text fields plus image files, sent as one
/// multipart form.
fn new_item(client: Arc<dyn StoreClient>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(product_name) = prompt("product name: ")? else {
        return Ok(());
    };
    let Some(price) = prompt("price: ")? else {
        return Ok(());
    };
    let Some(stock_quantity) = prompt("stock quantity: ")? else {
        return Ok(());
    };
    let Some(images) = prompt("image files (space separated): ")? else {
        return Ok(());
    };
    let images: Vec<PathBuf> = images.split_whitespace().map(PathBuf::from).collect();

    client.create_product(&NewProduct {
        product_name,
        price: price.parse()?,
        stock_quantity: stock_quantity.parse()?,
        images,
    })?;
    println!("product registered");
    Ok(())
}

/// Listing registration: pick a category (creating it on the fly like
/// the admin page allows), then publish.
fn post_register(client: Arc<dyn StoreClient>) -> Result<(), Box<dyn std::error::Error>> {
    let existing = client.list_categories()?;
    if existing.is_empty() {
        println!("no categories yet; the one you enter will be created");
    } else {
        let names: Vec<&str> = existing
            .iter()
            .map(|category| category.category.as_str())
            .collect();
        println!("categories: {}", names.join(", "));
    }

    let Some(title) = prompt("title: ")? else {
        return Ok(());
    };
    let Some(product) = prompt("product id: ")? else {
        return Ok(());
    };
    let Some(category) = prompt("category: ")? else {
        return Ok(());
    };
    if !existing.iter().any(|known| known.category == category) {
        client.create_category(&category)?;
    }
    let Some(images) = prompt("detail image files (space separated): ")? else {
        return Ok(());
    };
    let detail_images: Vec<PathBuf> = images.split_whitespace().map(PathBuf::from).collect();

    client.create_listing(&NewListing {
        title,
        product,
        category,
        detail_images,
    })?;
    println!("listing published");
    Ok(())
}

fn categories(
    client: Arc<dyn StoreClient>,
    added: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(name) = added {
        client.create_category(&name)?;
        println!("created category {name}");
    }
    let list = client.list_categories()?;
    if list.is_empty() {
        println!("no categories");
        return Ok(());
    }
    for category in &list {
        println!("  {}", category.category);
    }
    Ok(())
}

fn chat() -> Result<(), Box<dyn std::error::Error>> {
    let assistant = ScriptedAssistant;
    println!("chat with the shop assistant; `quit` to leave");
    loop {
        let Some(line) = prompt("you> ")? else {
            break;
        };
        if matches!(line.as_str(), "quit" | "q") {
            break;
        }
        assistant.submit_message(&line, &|event| match event {
            AssistantEvent::Token(token) => {
                print!("{token}");
                let _ = io::stdout().flush();
            }
            AssistantEvent::Meta(meta) => eprintln!("[assistant] {meta}"),
            AssistantEvent::Done => println!(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn options_accept_simulated_and_page() {
        let options = parse_options(vec![
            "--simulated".to_string(),
            "--page".to_string(),
            "3".to_string(),
        ])
        .expect("valid arguments");
        assert!(options.simulated);
        assert_eq!(options.page, 3);
        assert_eq!(options.base_url, None);
    }

    #[test]
    fn options_reject_dangling_flags_and_strays() {
        assert!(parse_options(vec!["--base-url".to_string()]).is_err());
        assert!(parse_options(vec!["bogus".to_string()]).is_err());
    }

    #[test]
    fn set_commands_patch_single_fields() {
        let patch = parse_set("name Dana").expect("known field");
        assert_eq!(patch.receiver_name, Some("Dana".to_string()));
        assert_eq!(patch.zip_code, None);

        let patch = parse_set("default on").expect("known field");
        assert_eq!(patch.is_default, Some(true));

        assert!(parse_set("color red").is_none());
    }

    #[test]
    fn row_numbers_are_one_based_and_bounded() {
        let rows = vec![AddressId::new("a"), AddressId::new("b")];
        assert_eq!(row_id(&rows, Some("1")), Some(AddressId::new("a")));
        assert_eq!(row_id(&rows, Some("2")), Some(AddressId::new("b")));
        assert_eq!(row_id(&rows, Some("0")), None);
        assert_eq!(row_id(&rows, Some("3")), None);
        assert_eq!(row_id(&rows, Some("x")), None);
        assert_eq!(row_id(&rows, None), None);
    }
}

fn print_help() {
    println!("storefront {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  storefront address-book [--simulated | --base-url URL]");
    println!("  storefront reviews ARTICLE [--simulated | --base-url URL]");
    println!("  storefront catalog [--page N] [--simulated | --base-url URL]");
    println!("  storefront login | signup [--base-url URL]");
    println!("  storefront account <change-password | delete | logout> [--base-url URL]");
    println!("  storefront new-item | post-register [--simulated | --base-url URL]");
    println!("  storefront categories [add NAME] [--simulated | --base-url URL]");
    println!("  storefront chat");
    println!("  storefront --help");
    println!("  storefront --version");
}
