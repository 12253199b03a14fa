use clap::{Parser, Subcommand};

use pokemundo::config::AppConfig;
use pokemundo::core::catalog::TypeTag;
use pokemundo::core::filter::{FilterSelection, Generation};
use pokemundo::core::logging::{self, print_error, print_info, print_success, print_warning};
use pokemundo::core::pokedex::FilterOutcome;
use pokemundo::core::session::Session;
use pokemundo::core::trainers::TrainerDraft;

/// PokéMundo - browse the Pokédex and manage trainers.
#[derive(Debug, Parser)]
#[command(name = "pokemundo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Also log to stdout.
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List creatures, optionally filtered.
    List {
        /// Generation key (all, gen1..gen9).
        #[arg(long = "gen", default_value = "all")]
        generation: Generation,
        /// Type tag; may be given twice.
        #[arg(long = "type")]
        types: Vec<String>,
        /// Name search text.
        #[arg(long)]
        text: Option<String>,
    },
    /// List the available type tags.
    Types,
    /// Show detail, species and 3D model for a creature.
    Show { id: u32 },
    /// Show the 3D model variants for a creature.
    Model {
        id: u32,
        /// Variant to display instead of the preferred one.
        #[arg(long)]
        variant: Option<String>,
    },
    /// Manage the trainer roster.
    #[command(subcommand)]
    Trainers(TrainerCommands),
}

#[derive(Debug, Subcommand)]
enum TrainerCommands {
    List,
    Get { id: String },
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, default_value_t = pokemundo::core::trainers::DEFAULT_AGE)]
        age: u32,
        #[arg(long)]
        region: String,
        #[arg(long, default_value = "")]
        favorite: String,
        #[arg(long, default_value = "")]
        avatar: String,
    },
    Delete { id: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    let _log_guard = if cli.verbose {
        logging::init(&config.log_dir())
    } else {
        logging::init_quiet(&config.log_dir())
    };
    log::info!("PokéMundo v{} starting", pokemundo::VERSION);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run(cli.command, &config));
    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Commands, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new(config)?;

    match command {
        Commands::List {
            generation,
            types,
            text,
        } => {
            let pokedex = session.pokedex();
            pokedex.load_catalog().await?;

            let mut selection = FilterSelection::new().with_generation(generation);
            for tag in types.iter().filter_map(|t| TypeTag::new(t)) {
                selection = selection.with_type(tag);
            }
            if let Some(text) = text {
                selection = selection.with_free_text(text);
            }

            if pokedex.apply_filters(selection).await? == FilterOutcome::Superseded {
                print_warning("Filter was superseded");
            }
            let visible = pokedex.visible().await;
            for creature in visible.iter() {
                println!("#{:<5} {}", creature.id, creature.name);
            }
            print_info(&format!("{} creatures", visible.len()));
        }
        Commands::Types => {
            for tag in session.catalog().fetch_type_tags().await? {
                println!("{tag}");
            }
        }
        Commands::Show { id } => {
            let pokedex = session.pokedex();
            pokedex.load_catalog().await?;
            if !pokedex.select(id).await {
                print_error(&format!("Unknown creature id {id}"));
                return Ok(());
            }
            pokedex.show_selected().await;

            let state = pokedex.snapshot().await;
            match (&state.profile, &state.error) {
                (Some(profile), _) => {
                    let detail = &profile.detail;
                    print_success(&format!("#{} {}", detail.id, detail.name));
                    println!("  generation: {}", profile.species.generation);
                    let types: Vec<&str> = detail.types.iter().map(|t| t.name.as_str()).collect();
                    println!("  types: {}", types.join(", "));
                    println!("  height: {}  weight: {}", detail.height, detail.weight);
                    for stat in &detail.stats {
                        println!("  {:<16} {}", stat.name, stat.base_stat);
                    }
                }
                (None, Some(message)) => print_error(message),
                (None, None) => {}
            }
            match (&state.variant, &state.model_error) {
                (Some(variant), _) => {
                    let current = variant.current();
                    println!("  3D model ({}): {}", current.variant_name, current.model_asset_ref);
                }
                (None, Some(message)) => print_warning(message),
                (None, None) => {}
            }
        }
        Commands::Model { id, variant } => match session.models().resolve(id).await? {
            Some(set) => {
                let mut selection = pokemundo::core::models3d::VariantSelection::new(set);
                if let Some(name) = variant {
                    if !selection.switch_to(&name) {
                        print_warning(&format!("No variant named '{name}'"));
                    }
                }
                let names: Vec<&str> = selection.set().variant_names().collect();
                print_info(&format!("Variants: {}", names.join(", ")));
                let current = selection.current();
                print_success(&format!("{}: {}", current.variant_name, current.model_asset_ref));
            }
            None => print_warning(pokemundo::core::pokedex::MSG_NO_MODEL),
        },
        Commands::Trainers(command) => run_trainers(&session, command).await?,
    }

    Ok(())
}

async fn run_trainers(
    session: &Session,
    command: TrainerCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    let trainers = session.trainers();
    match command {
        TrainerCommands::List => {
            let roster = trainers.list().await?;
            if let Err(e) = session.pokedex().load_catalog().await {
                log::warn!("Sprite list unavailable: {e}");
            }
            let sprites = session.pokedex().sprite_index().await;
            for trainer in roster {
                let sprite = sprites.sprite_for(&trainer.favorite_pokemon).unwrap_or("-");
                println!(
                    "{:<6} {:<28} {:<3} {:<10} {} {}",
                    trainer.id.as_deref().unwrap_or("?"),
                    trainer.full_name(),
                    trainer.age,
                    trainer.region,
                    trainer.favorite_pokemon,
                    sprite
                );
            }
        }
        TrainerCommands::Get { id } => {
            let trainer = trainers.get(&id).await?;
            println!("{}", serde_json::to_string_pretty(&trainer)?);
        }
        TrainerCommands::Create {
            first_name,
            last_name,
            age,
            region,
            favorite,
            avatar,
        } => {
            let draft = TrainerDraft {
                first_name,
                last_name,
                age,
                region,
                favorite_pokemon: favorite,
                avatar,
            };
            let created = trainers.create(&draft).await?;
            print_success(&format!(
                "Created trainer {} ({})",
                created.full_name(),
                created.id.as_deref().unwrap_or("?")
            ));
        }
        TrainerCommands::Delete { id } => {
            trainers.delete(&id).await?;
            print_success(&format!("Deleted trainer {id}"));
        }
    }
    Ok(())
}
