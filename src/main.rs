use anyhow::Context;
use badge_roster::config::{AddArgs, Command};
use badge_roster::utils::error::ErrorCategory;
use badge_roster::utils::{logger, validation::Validate};
use badge_roster::{
    CliConfig, FilePersonReader, JsonFileDataService, LocalStorage, Person, PersonManager,
    RosterConfig, RosterError,
};
use clap::Parser;
use std::sync::Arc;

type Manager = PersonManager<JsonFileDataService<LocalStorage>, FilePersonReader<LocalStorage>>;

fn build_manager(config: &RosterConfig) -> Manager {
    let store = JsonFileDataService::new(
        LocalStorage::new(&config.store.data_dir),
        config.store.file_name.clone(),
    );
    let reader = FilePersonReader::new(LocalStorage::new("."))
        .with_allowed_extensions(config.allowed_extensions().to_vec());

    PersonManager::new(Arc::new(store), reader)
}

fn print_persons(persons: &[Person]) {
    for person in persons {
        println!(
            "{:>5}  {:<30} {:?} / {:?}{}",
            person.id,
            person.full_name(),
            person.role,
            person.access_level,
            person
                .email
                .as_deref()
                .map(|e| format!("  <{}>", e))
                .unwrap_or_default()
        );
    }
}

async fn add(manager: &mut Manager, args: AddArgs) -> anyhow::Result<()> {
    let mut person = manager.add_new_person().await?;
    person.first_name = args.first_name;
    person.last_name = args.last_name;
    person.role = args.role.into();
    person.access_level = args.access_level.into();
    person.email = args.email;

    manager.update_pending(person.clone())?;
    manager.save().await?;

    println!("✅ Saved {} as person {}", person.full_name(), person.id);
    Ok(())
}

async fn import(manager: &mut Manager, file: &str, commit: bool) -> anyhow::Result<()> {
    let persons = manager.import(file).await?;
    print_persons(&persons);
    println!("📄 {} persons read from {}", persons.len(), file);

    if commit {
        for person in persons {
            manager.stage(person)?;
        }
        let saved = manager.save().await?;
        println!("✅ Saved {} imported persons", saved);
    }

    Ok(())
}

async fn run(cli: CliConfig, config: RosterConfig) -> anyhow::Result<()> {
    let mut manager = build_manager(&config);

    match cli.command {
        Command::List => {
            let persons = manager
                .accessible_persons()
                .await
                .context("listing persons")?;
            print_persons(&persons);
            println!("{} persons", persons.len());
        }
        Command::Add(args) => add(&mut manager, args).await.context("adding person")?,
        Command::Import { file, commit } => import(&mut manager, &file, commit)
            .await
            .with_context(|| format!("importing {}", file))?,
    }

    Ok(())
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<RosterError>().map(RosterError::category) {
        Some(ErrorCategory::Validation) => 2,
        Some(ErrorCategory::Import) => 3,
        Some(ErrorCategory::Persistence) => 4,
        _ => 1,
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::debug!("Using store {}/{}", config.store.data_dir, config.store.file_name);

    if let Err(e) = run(cli, config).await {
        tracing::error!("{:#}", e);
        eprintln!("❌ {:#}", e);
        if let Some(roster_error) = e.downcast_ref::<RosterError>() {
            eprintln!("💡 {}", roster_error.recovery_suggestion());
        }
        std::process::exit(exit_code(&e));
    }
}
