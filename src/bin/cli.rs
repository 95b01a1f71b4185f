use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use ijg_admin::auth::{Navigation, LOGIN_ROUTE};
use ijg_admin::calendar::CalendarStore;
use ijg_admin::config::{AdminConfig, API_URL_ENV, CALENDAR_FILE_ENV, SESSION_FILE_ENV};
use ijg_admin::dashboard::DashboardSummary;
use ijg_admin::models::{
    parse_timestamp, Attachment, CategoryForm, DocumentForm, EventForm, EventKind, NewsForm,
    UserForm,
};
use ijg_admin::pages::{CategoriesPage, Deletion, DocumentsPage, NewsPage, UsersPage};
use ijg_admin::{ApiClient, ApiError, AuthGuard, SessionStore};
use prettytable::{Cell, Row, Table};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ijg-admin")]
#[command(about = "Admin console for IJG Research documents, news, users and events", long_about = None)]
struct Cli {
    #[arg(long, global = true, env = API_URL_ENV, help = "Base URL of the content API")]
    api_url: Option<String>,

    #[arg(long, global = true, env = SESSION_FILE_ENV, help = "Where the login session is kept")]
    session_file: Option<PathBuf>,

    #[arg(long, global = true, env = CALENDAR_FILE_ENV, help = "Where calendar events are kept")]
    calendar_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Log in with your email and password")]
    Login {
        #[arg(short, long, help = "Email address")]
        email: String,

        #[arg(short, long, help = "Password")]
        password: String,
    },

    #[command(about = "Log out")]
    Logout,

    #[command(about = "Show current user")]
    Whoami,

    #[command(about = "Overview of documents, categories, news and users")]
    Dashboard,

    #[command(subcommand, about = "Manage document categories")]
    Categories(CategoryCommand),

    #[command(subcommand, about = "Manage documents")]
    Documents(DocumentCommand),

    #[command(subcommand, about = "Manage news articles")]
    News(NewsCommand),

    #[command(subcommand, about = "Manage users")]
    Users(UserCommand),

    #[command(subcommand, about = "Manage calendar events")]
    Calendar(CalendarCommand),
}

#[derive(Args)]
struct Confirm {
    #[arg(short, long, help = "Delete without asking for confirmation")]
    yes: bool,
}

#[derive(Subcommand)]
enum CategoryCommand {
    #[command(about = "List categories")]
    List,
    #[command(about = "Create a category")]
    Create {
        #[arg(short, long, help = "Category name")]
        name: String,
    },
    #[command(about = "Rename a category")]
    Update {
        #[arg(long, help = "Category ID")]
        id: String,
        #[arg(short, long, help = "New name")]
        name: String,
    },
    #[command(about = "Delete a category")]
    Delete {
        #[arg(long, help = "Category ID")]
        id: String,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
enum DocumentCommand {
    #[command(about = "List documents")]
    List {
        #[arg(short, long, help = "Only documents in this category ID")]
        category: Option<String>,
    },
    #[command(about = "Upload a document")]
    Upload {
        #[arg(short, long, help = "Document title")]
        title: String,
        #[arg(short, long, help = "Document description")]
        description: String,
        #[arg(short, long, help = "Category ID")]
        category: String,
        #[arg(short, long, help = "Path to the file to upload")]
        file: PathBuf,
    },
    #[command(about = "Update a document")]
    Update {
        #[arg(long, help = "Document ID")]
        id: i64,
        #[arg(short, long, help = "New title")]
        title: Option<String>,
        #[arg(short, long, help = "New description")]
        description: Option<String>,
        #[arg(short, long, help = "New category ID")]
        category: Option<String>,
        #[arg(short, long, help = "Replacement file")]
        file: Option<PathBuf>,
    },
    #[command(about = "Delete a document")]
    Delete {
        #[arg(long, help = "Document ID")]
        id: i64,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
enum NewsCommand {
    #[command(about = "List news articles")]
    List,
    #[command(about = "Publish a news article")]
    Create {
        #[arg(short, long, help = "Headline")]
        title: String,
        #[arg(short, long, help = "Article text")]
        description: String,
    },
    #[command(about = "Edit a news article")]
    Update {
        #[arg(long, help = "News ID")]
        id: i64,
        #[arg(short, long, help = "New headline")]
        title: Option<String>,
        #[arg(short, long, help = "New article text")]
        description: Option<String>,
    },
    #[command(about = "Delete a news article")]
    Delete {
        #[arg(long, help = "News ID")]
        id: i64,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    #[command(about = "List users")]
    List,
    #[command(about = "Create a user")]
    Create {
        #[arg(short, long, help = "Full name")]
        name: String,
        #[arg(short, long, help = "Email address")]
        email: String,
        #[arg(short, long, help = "Password")]
        password: String,
        #[arg(short, long, help = "Role ID (1 = Admin, 2 = Editor, 3 = Viewer)")]
        role: String,
    },
    #[command(about = "Update a user")]
    Update {
        #[arg(long, help = "User ID")]
        id: i64,
        #[arg(short, long, help = "New name")]
        name: Option<String>,
        #[arg(short, long, help = "New email")]
        email: Option<String>,
        #[arg(short, long, help = "New password (unchanged when omitted)")]
        password: Option<String>,
        #[arg(short, long, help = "New role ID")]
        role: Option<String>,
    },
    #[command(about = "Delete a user")]
    Delete {
        #[arg(long, help = "User ID")]
        id: i64,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
enum CalendarCommand {
    #[command(about = "List events")]
    List {
        #[arg(short, long, help = "Only events on this date (YYYY-MM-DD)")]
        date: Option<NaiveDate>,
    },
    #[command(about = "Add an event")]
    Add {
        #[arg(short = 'n', long, help = "Event title")]
        title: String,
        #[arg(short, long, default_value = "", help = "Description")]
        description: String,
        #[arg(long, help = "Date (YYYY-MM-DD), defaults to today")]
        date: Option<NaiveDate>,
        #[arg(short, long, help = "Time, e.g. '10:00 AM'")]
        time: String,
        #[arg(short, long, help = "Location")]
        location: Option<String>,
        #[arg(short = 'k', long, default_value = "meeting", help = "meeting, deadline or event")]
        kind: EventKind,
    },
    #[command(about = "Remove an event")]
    Remove {
        #[arg(long, help = "Event ID")]
        id: i64,
    },
}

impl Commands {
    fn route(&self) -> &'static str {
        match self {
            Commands::Login { .. } => LOGIN_ROUTE,
            Commands::Logout | Commands::Whoami | Commands::Dashboard => "/",
            Commands::Categories(_) => "/categories",
            Commands::Documents(_) => "/documents",
            Commands::News(_) => "/news",
            Commands::Users(_) => "/users",
            Commands::Calendar(_) => "/calendar",
        }
    }

    fn is_public(&self) -> bool {
        matches!(self, Commands::Login { .. } | Commands::Logout | Commands::Whoami)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "ijg_admin=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> AdminConfig {
    let mut config = AdminConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(path) = &cli.session_file {
        config.session_file = path.clone();
    }
    if let Some(path) = &cli.calendar_file {
        config.calendar_file = path.clone();
    }
    config
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli);
    let session = SessionStore::new(&config.session_file);
    let api = ApiClient::new(&config, session.clone());
    let mut guard = AuthGuard::new();

    let navigation = guard.init(&session, cli.command.route());
    if navigation == Navigation::Redirect(LOGIN_ROUTE) && !cli.command.is_public() {
        bail!("You must be logged in. Use: ijg-admin login -e <email> -p <password>");
    }

    match cli.command {
        Commands::Login { email, password } => {
            let user = guard.login(&api, &email, &password).await?;
            println!("✅ Login successful!");
            println!("👤 Welcome back, {} ({})", user.name, user.role.name);
        }
        Commands::Logout => {
            guard.logout(&api);
            println!("✅ Logged out successfully!");
        }
        Commands::Whoami => whoami(&guard),
        Commands::Dashboard => show_dashboard(&api).await,
        Commands::Categories(command) => categories(&api, command).await?,
        Commands::Documents(command) => documents(&api, command).await?,
        Commands::News(command) => news(&api, command).await?,
        Commands::Users(command) => users(&api, command).await?,
        Commands::Calendar(command) => calendar(&config.calendar_file, command).await?,
    }

    Ok(())
}

fn whoami(guard: &AuthGuard) {
    if let Some(user) = guard.current_user() {
        println!("👤 Logged in as: {} <{}>", user.name, user.email);
        println!("🔑 Role: {}", user.role.name);
        println!("🆔 User ID: {}", user.id);
    } else {
        println!("❌ Not logged in");
        println!("💡 Use 'ijg-admin login -e <email> -p <password>' to log in");
    }
}

/// Prompts on stdin unless `--yes` was given.
fn confirmer(confirm: &Confirm) -> impl FnOnce(&str) -> bool {
    let skip = confirm.yes;
    move |prompt: &str| {
        if skip {
            return true;
        }
        print!("❓ {} (yes/no): ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        matches!(input.trim().to_lowercase().as_str(), "yes" | "y")
    }
}

/// Validation problems are shown as-is; request failures get `failure` as a
/// headline.
fn report(result: Result<&'static str, ApiError>, failure: &str) -> Result<()> {
    match result {
        Ok(message) => {
            println!("✅ {}", message);
            Ok(())
        }
        Err(e) if e.is_validation() => Err(anyhow!(e)),
        Err(e) => Err(anyhow!("{}: {}", failure, e)),
    }
}

fn report_deletion(result: Result<Deletion, ApiError>, what: &str) -> Result<bool> {
    match result {
        Ok(Deletion::Deleted) => {
            println!("✅ {} deleted successfully", what);
            Ok(true)
        }
        Ok(Deletion::Cancelled) => {
            println!("❌ Delete cancelled");
            Ok(false)
        }
        Err(e) => Err(anyhow!("Failed to delete {}: {}", what.to_lowercase(), e)),
    }
}

fn format_posted(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

async fn show_dashboard(api: &ApiClient) {
    let summary = DashboardSummary::load(api).await;

    println!("\n📊 IJG Research Admin\n");
    let mut stats = Table::new();
    stats.add_row(Row::new(vec![
        Cell::new("Total Documents"),
        Cell::new("Categories"),
        Cell::new("News Articles"),
        Cell::new("Users"),
    ]));
    stats.add_row(Row::new(vec![
        Cell::new(&summary.stats.documents.to_string()),
        Cell::new(&summary.stats.categories.to_string()),
        Cell::new(&summary.stats.news.to_string()),
        Cell::new(&summary.stats.users.to_string()),
    ]));
    stats.printstd();

    println!("\n📄 Recent Documents\n");
    if summary.recent_documents.is_empty() {
        println!("📭 No documents found.");
    } else {
        print_documents(summary.recent_documents.iter());
    }

    println!("\n📰 Recent News\n");
    if summary.recent_news.is_empty() {
        println!("📭 No news found.");
    } else {
        print_news(summary.recent_news.iter());
    }
    println!();
}

fn print_categories(page: &CategoriesPage) {
    if page.categories.is_empty() {
        println!("📭 No categories found.");
        return;
    }
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("ID"), Cell::new("Name")]));
    for category in &page.categories {
        table.add_row(Row::new(vec![
            Cell::new(&category.id),
            Cell::new(&category.name),
        ]));
    }
    table.printstd();
}

async fn categories(api: &ApiClient, command: CategoryCommand) -> Result<()> {
    let mut page = CategoriesPage::load(api).await;

    match command {
        CategoryCommand::List => {}
        CategoryCommand::Create { name } => {
            let result = page.submit(api, None, &CategoryForm { name }).await;
            report(result, "Failed to save category")?;
        }
        CategoryCommand::Update { id, name } => {
            let category = page
                .find(&id)
                .cloned()
                .ok_or_else(|| anyhow!("Category not found with ID: {}", id))?;
            let result = page.submit(api, Some(&category), &CategoryForm { name }).await;
            report(result, "Failed to save category")?;
        }
        CategoryCommand::Delete { id, confirm } => {
            let category = page
                .find(&id)
                .cloned()
                .ok_or_else(|| anyhow!("Category not found with ID: {}", id))?;
            let result = page.delete(api, &category, confirmer(&confirm)).await;
            report_deletion(result, "Category")?;
        }
    }

    println!("\n📂 Categories ({})\n", page.categories.len());
    print_categories(&page);
    Ok(())
}

fn print_documents<'a>(documents: impl Iterator<Item = &'a ijg_admin::models::Document>) {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("ID"),
        Cell::new("Title"),
        Cell::new("Category"),
        Cell::new("Type"),
        Cell::new("Posted"),
    ]));
    for doc in documents {
        table.add_row(Row::new(vec![
            Cell::new(&doc.id.to_string()),
            Cell::new(&truncate(&doc.title, 40)),
            Cell::new(&doc.category.name),
            Cell::new(&truncate(&doc.file_type, 24)),
            Cell::new(&format_posted(&doc.date_posted)),
        ]));
    }
    table.printstd();
}

fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let mime_type = match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    };
    Ok(Attachment {
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    })
}

async fn documents(api: &ApiClient, command: DocumentCommand) -> Result<()> {
    let mut page = DocumentsPage::load(api).await;
    let mut filter = None;

    match command {
        DocumentCommand::List { category } => filter = category,
        DocumentCommand::Upload {
            title,
            description,
            category,
            file,
        } => {
            let form = DocumentForm {
                title,
                description,
                category_id: category,
                file: Some(read_attachment(&file)?),
            };
            report(page.submit(api, None, &form).await, "Failed to save document")?;
        }
        DocumentCommand::Update {
            id,
            title,
            description,
            category,
            file,
        } => {
            let existing = page
                .find(id)
                .ok_or_else(|| anyhow!("Document not found with ID: {}", id))?;
            let mut form = DocumentsPage::edit_form(existing);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(category) = category {
                form.category_id = category;
            }
            if let Some(path) = file {
                form.file = Some(read_attachment(&path)?);
            }
            report(page.submit(api, Some(id), &form).await, "Failed to save document")?;
        }
        DocumentCommand::Delete { id, confirm } => {
            report_deletion(page.delete(api, id, confirmer(&confirm)).await, "Document")?;
        }
    }

    let shown: Vec<_> = match &filter {
        Some(category_id) => page.in_category(category_id),
        None => page.documents.iter().collect(),
    };
    println!("\n📄 Documents ({})\n", shown.len());
    if shown.is_empty() {
        println!("📭 No documents found.");
    } else {
        print_documents(shown.into_iter());
    }
    Ok(())
}

fn print_news<'a>(news: impl Iterator<Item = &'a ijg_admin::models::News>) {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("ID"),
        Cell::new("Title"),
        Cell::new("Description"),
        Cell::new("Posted"),
    ]));
    for item in news {
        table.add_row(Row::new(vec![
            Cell::new(&item.id.to_string()),
            Cell::new(&truncate(&item.title, 40)),
            Cell::new(&truncate(&item.description, 60)),
            Cell::new(&format_posted(&item.date_posted)),
        ]));
    }
    table.printstd();
}

async fn news(api: &ApiClient, command: NewsCommand) -> Result<()> {
    let mut page = NewsPage::load(api).await;

    match command {
        NewsCommand::List => {}
        NewsCommand::Create { title, description } => {
            let form = NewsForm { title, description };
            report(page.submit(api, None, &form).await, "Failed to save news")?;
        }
        NewsCommand::Update {
            id,
            title,
            description,
        } => {
            let existing = page
                .find(id)
                .ok_or_else(|| anyhow!("News not found with ID: {}", id))?;
            let form = NewsForm {
                title: title.unwrap_or_else(|| existing.title.clone()),
                description: description.unwrap_or_else(|| existing.description.clone()),
            };
            report(page.submit(api, Some(id), &form).await, "Failed to save news")?;
        }
        NewsCommand::Delete { id, confirm } => {
            report_deletion(page.delete(api, id, confirmer(&confirm)).await, "News")?;
        }
    }

    println!("\n📰 News ({})\n", page.news.len());
    if page.news.is_empty() {
        println!("📭 No news found.");
    } else {
        print_news(page.news.iter());
    }
    Ok(())
}

async fn users(api: &ApiClient, command: UserCommand) -> Result<()> {
    let mut page = UsersPage::load(api).await;

    match command {
        UserCommand::List => {}
        UserCommand::Create {
            name,
            email,
            password,
            role,
        } => {
            let form = UserForm {
                name,
                email,
                password,
                role_id: role,
            };
            report(page.submit(api, None, &form).await, "Failed to save user")?;
        }
        UserCommand::Update {
            id,
            name,
            email,
            password,
            role,
        } => {
            let existing = page
                .find(id)
                .ok_or_else(|| anyhow!("User not found with ID: {}", id))?;
            let mut form = UsersPage::edit_form(existing);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(email) = email {
                form.email = email;
            }
            if let Some(password) = password {
                form.password = password;
            }
            if let Some(role) = role {
                form.role_id = role;
            }
            report(page.submit(api, Some(id), &form).await, "Failed to save user")?;
        }
        UserCommand::Delete { id, confirm } => {
            report_deletion(page.delete(api, id, confirmer(&confirm)).await, "User")?;
        }
    }

    println!("\n👥 Users ({})\n", page.users.len());
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("ID"),
        Cell::new("Name"),
        Cell::new("Email"),
        Cell::new("Role"),
    ]));
    for user in &page.users {
        table.add_row(Row::new(vec![
            Cell::new(&user.id.to_string()),
            Cell::new(&user.name),
            Cell::new(&user.email),
            Cell::new(&user.role.name),
        ]));
    }
    table.printstd();
    Ok(())
}

async fn calendar(path: &Path, command: CalendarCommand) -> Result<()> {
    let store = CalendarStore::open(path)?;

    let events = match command {
        CalendarCommand::List { date: Some(date) } => store.events_on(date).await,
        CalendarCommand::List { date: None } => store.list().await,
        CalendarCommand::Add {
            title,
            description,
            date,
            time,
            location,
            kind,
        } => {
            let form = EventForm {
                title,
                description,
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                time,
                location,
                kind,
            };
            let event = store.add(form).await?;
            println!("✅ Event '{}' added on {}", event.title, event.date);
            println!("🆔 Event ID: {}", event.id);
            store.list().await
        }
        CalendarCommand::Remove { id } => {
            store.remove(id).await?;
            println!("✅ Event {} removed", id);
            store.list().await
        }
    };

    if events.is_empty() {
        println!("📭 No events scheduled.");
        return Ok(());
    }

    println!("\n📅 Events ({})\n", events.len());
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("ID"),
        Cell::new("Date"),
        Cell::new("Time"),
        Cell::new("Type"),
        Cell::new("Title"),
        Cell::new("Location"),
    ]));
    for event in &events {
        table.add_row(Row::new(vec![
            Cell::new(&event.id.to_string()),
            Cell::new(&event.date.to_string()),
            Cell::new(&event.time),
            Cell::new(event.kind.label()),
            Cell::new(&event.title),
            Cell::new(event.location.as_deref().unwrap_or("-")),
        ]));
    }
    table.printstd();
    println!();
    Ok(())
}
