//! Plaza Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};

use plaza_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService, data::NewAccount},
        promos::{DEFAULT_PROMO_CODE, PgPromosService, PromosService},
    },
};

#[derive(Debug, Parser)]
#[command(name = "plaza-app", about = "Plaza CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Account(AccountCommand),
    Promo(PromoCommand),
}

#[derive(Debug, Args)]
struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    Create(CreateAccountArgs),
}

#[derive(Debug, Args)]
struct CreateAccountArgs {
    /// Account display name
    #[arg(long)]
    name: String,

    /// Account email
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct PromoCommand {
    #[command(subcommand)]
    command: PromoSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromoSubcommand {
    Seed(SeedPromoArgs),
}

#[derive(Debug, Args)]
struct SeedPromoArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Account(AccountCommand {
            command: AccountSubcommand::Create(args),
        }) => create_account(args).await,
        Commands::Promo(PromoCommand {
            command: PromoSubcommand::Seed(args),
        }) => seed_promo(args).await,
    }
}

async fn create_account(args: CreateAccountArgs) -> Result<(), String> {
    let db = connect(&args.database_url).await?;

    let accounts = PgAccountsService::new(db.clone());
    let auth = PgAuthService::new(db);

    let account = accounts
        .create_account(NewAccount {
            name: args.name,
            email: args.email,
            phone: None,
            country: None,
            region: None,
            postal_code: None,
        })
        .await
        .map_err(|error| format!("failed to create account: {error}"))?;

    let issued = auth
        .issue_api_token(account.uuid, None)
        .await
        .map_err(|error| format!("failed to issue api token: {error}"))?;

    println!("account_uuid: {}", account.uuid);
    println!("account_email: {}", account.email);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

async fn seed_promo(args: SeedPromoArgs) -> Result<(), String> {
    let db = connect(&args.database_url).await?;

    let promos = PgPromosService::new(db);

    let created = promos
        .seed_default()
        .await
        .map_err(|error| format!("failed to seed promo: {error}"))?;

    if created {
        println!("seeded promo code {DEFAULT_PROMO_CODE}");
    } else {
        println!("promo code {DEFAULT_PROMO_CODE} already present");
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Db::new(pool))
}
