/**
 * recipebox - Command-Line Front-End
 *
 * Drives the screen controllers from the terminal. Each subcommand maps to one
 * screen: it fills the controller's form from the arguments, submits, and
 * prints the resulting state.
 *
 * ```bash
 * recipebox login --email cook@example.com --password 'Secret1!'
 * recipebox list --category dessert --search cake
 * recipebox show 65f0c2
 * recipebox add --name Pancakes --category breakfast --ingredients "flour, milk" \
 *     --servings 4 --prep-time 00:10 --cooking-time 00:20 --instructions "Whisk. Fry."
 * recipebox logout
 * ```
 */
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use recipebox::client::{
    logout, AddRecipeController, ApiClient, Config, LoginController, RecipeDetailController,
    RecipeForm, RecipeListController, RegisterController, Session,
};
use recipebox::shared::config::FileConfig;
use recipebox::shared::{AppConfig, Category, ClientError, ConfigError, Recipe, Result};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "recipebox",
    about = "Recipe book client",
    long_about = "Log in, browse, add, update and delete recipes stored on the recipe API."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API origin override
    #[arg(long, global = true, env = "RECIPEBOX_API_URL")]
    server: Option<String>,

    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RECIPEBOX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RECIPEBOX_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// List recipes
    List {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        search: Option<String>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Recipes per page, overrides the configured page size
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one recipe
    Show { id: String },
    /// Add a recipe
    Add(RecipeArgs),
    /// Update a recipe; omitted fields keep their current value
    Update {
        id: String,
        #[command(flatten)]
        fields: RecipeArgs,
    },
    /// Delete a recipe
    Delete { id: String },
}

#[derive(Args)]
struct RecipeArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<Category>,
    /// Comma separated
    #[arg(long)]
    ingredients: Option<String>,
    #[arg(long)]
    servings: Option<String>,
    /// HH:MM
    #[arg(long)]
    prep_time: Option<String>,
    /// HH:MM
    #[arg(long)]
    cooking_time: Option<String>,
    /// Steps separated by periods
    #[arg(long)]
    instructions: Option<String>,
}

impl RecipeArgs {
    fn apply(self, form: &mut RecipeForm) {
        if let Some(name) = self.name {
            form.set_recipe(name);
        }
        if let Some(category) = self.category {
            form.set_category(category);
        }
        if let Some(ingredients) = self.ingredients {
            form.set_ingredients(ingredients);
        }
        if let Some(servings) = self.servings {
            form.set_servings(servings);
        }
        if let Some(time) = self.prep_time {
            form.set_prep_time(time);
        }
        if let Some(time) = self.cooking_time {
            form.set_cooking_time(time);
        }
        if let Some(instructions) = self.instructions {
            form.set_instructions(instructions);
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let file = cli
        .config
        .clone()
        .or_else(|| Config::default_file_path().filter(|path| path.exists()));
    let mut builder = Config::env_builder(AppConfig::builder())?;
    if let Some(server) = &cli.server {
        builder = builder.server_url(server.clone());
    }
    if let Some(path) = file {
        let raw = std::fs::read_to_string(&path).map_err(ConfigError::from)?;
        builder = builder.merge_file(FileConfig::from_toml_str(&raw)?);
    }
    Ok(Config::with_builder(builder)?)
}

fn print_recipe(recipe: &Recipe, detail: &RecipeDetailController) {
    println!("{} [{}]", recipe.recipe, recipe.category);
    println!("  id:        {}", recipe.id);
    println!("  servings:  {}", recipe.servings);
    println!("  prep:      {}", detail.prep_time_text());
    println!("  cooking:   {}", detail.cooking_time_text());
    println!("  ingredients:");
    for item in detail.ingredients() {
        println!("    - {}", item);
    }
    println!("  steps:");
    for (index, step) in detail.steps().iter().enumerate() {
        println!("    {}. {}", index + 1, step);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let session = Session::open_default(&config).await?;
    let page_size = config.page_size();
    let api = ApiClient::new(config, session.clone())?;

    let result = execute(cli.command, &api, &session, page_size).await;
    session.close().await;
    result
}

async fn execute(
    command: Command,
    api: &ApiClient,
    session: &Session,
    page_size: u32,
) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let mut login = LoginController::new();
            login.set_email(email);
            login.set_password(password);
            login.submit(api).await?;
            println!("Logged in.");
        }
        Command::Register {
            email,
            password,
            confirm,
        } => {
            let mut register = RegisterController::new();
            register.set_email(email);
            register.set_confirm_password(confirm.unwrap_or_else(|| password.clone()));
            register.set_password(password);
            for status in register.password_requirements() {
                let mark = if status.satisfied { "ok" } else { "missing" };
                println!("  [{}] {}", mark, status.rule.description());
            }
            let outcome = register.submit(api).await?;
            if outcome.token.is_some() {
                println!("Registered and logged in.");
            } else {
                println!("Registered. You can now log in.");
            }
        }
        Command::Logout => {
            logout(session).await?;
            println!("Logged out.");
        }
        Command::List {
            category,
            search,
            pages,
            limit,
        } => {
            let mut list = RecipeListController::new(category, limit.unwrap_or(page_size));
            list.refresh(api).await?;
            while list.page() < pages && list.load_more(api).await? {}
            if let Some(search) = search {
                list.set_search(search);
            }
            let visible = list.visible();
            if visible.is_empty() {
                println!("No recipes found.");
            }
            for recipe in visible {
                println!("{}  {} [{}]", recipe.id, recipe.recipe, recipe.category);
            }
            if list.has_more() {
                println!("(more available, use --pages {})", list.page() + 1);
            }
        }
        Command::Show { id } => {
            let mut detail = RecipeDetailController::new();
            detail.load(api, &id).await?;
            if let Some(recipe) = detail.recipe() {
                print_recipe(recipe, &detail);
            }
        }
        Command::Add(fields) => {
            let mut add = AddRecipeController::new();
            fields.apply(&mut add.form);
            add.submit(api).await?;
            println!("Recipe added.");
        }
        Command::Update { id, fields } => {
            let mut detail = RecipeDetailController::new();
            detail.load(api, &id).await?;
            let Some(mut update) = detail.edit() else {
                return Err(ClientError::not_found("Recipe not found."));
            };
            fields.apply(&mut update.form);
            let recipe = update.submit(api).await?;
            detail.replace(recipe);
            if let Some(recipe) = detail.recipe() {
                print_recipe(recipe, &detail);
            }
        }
        Command::Delete { id } => {
            let mut detail = RecipeDetailController::new();
            detail.load(api, &id).await?;
            detail.delete(api).await?;
            println!("Recipe deleted.");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recipebox=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("{}", err);
            eprintln!("Error: {}", err.user_message());
            if err.is_auth() {
                eprintln!("Run `recipebox login` to sign in.");
            }
            ExitCode::FAILURE
        }
    }
}
