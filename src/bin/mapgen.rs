use clap::{Parser, Subcommand};
use std::path::Path;
use terranav::config::{load_config, save_config};
use terranav::{GridCoord, MapFile, Terrain, TerrainError, TerrainResult};
use tracing_subscriber::EnvFilter;

mod mapgen {
    pub mod cli_utils;
    pub mod config_builder;
}

use mapgen::cli_utils::*;
use mapgen::config_builder::ConfigBuilder;

#[derive(Parser)]
#[command(name = "mapgen")]
#[command(about = "Generate, inspect and path-query terrain map files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a terrain and write it to a map file
    Generate {
        /// Terrain size in grid cells (format: WIDTHxHEIGHT); defaults to the config
        #[arg(long)]
        size: Option<String>,

        /// Random seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,

        /// Output file path; relative paths land in the maps/ directory
        #[arg(long, default_value = "generated_map.bin")]
        output: String,
    },
    /// Load a map file and print its statistics
    Info {
        #[arg(long)]
        input: String,
    },
    /// Load a map file and search a path between two cells
    Path {
        #[arg(long)]
        input: String,

        /// Start cell (format: X,Y)
        #[arg(long)]
        from: String,

        /// Goal cell (format: X,Y)
        #[arg(long)]
        to: String,

        /// Node expansion budget for the search
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Write the default generation config to the user config directory
    InitConfig,
}

fn validate_output_path(filename: &str) -> TerrainResult<()> {
    // Check for parent directory traversal attempts
    if Path::new(filename)
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(TerrainError::ValidationFailed {
            reason: "Output path cannot contain '..'".to_string(),
        });
    }
    Ok(())
}

fn main() -> TerrainResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("terranav=info")),
        )
        .init();

    match Cli::parse().command {
        Command::Generate { size, seed, output } => generate(size, seed, &output),
        Command::Info { input } => info(&input),
        Command::Path {
            input,
            from,
            to,
            max_expansions,
        } => path(&input, &from, &to, max_expansions),
        Command::InitConfig => {
            let path = save_config(&load_config())?;
            println!("Config written to: {}", path.display());
            Ok(())
        }
    }
}

fn generate(size: Option<String>, seed: Option<u64>, output: &str) -> TerrainResult<()> {
    validate_output_path(output)?;
    let size = size.as_deref().map(parse_size).transpose()?;

    let config = ConfigBuilder::new(load_config())
        .size(size)
        .seed(seed)
        .build()?;
    println!(
        "Generating {}x{} terrain (seed: {})",
        config.width, config.height, config.seed
    );

    let terrain = Terrain::generate(&config);
    let path = MapFile::resolve_path(output)?;
    terrain.save(&path)?;

    println!("Map saved successfully to: {}", path.display());
    print_terrain_summary(&terrain, &path);
    Ok(())
}

fn info(input: &str) -> TerrainResult<()> {
    let path = MapFile::resolve_path(input)?;
    let terrain = Terrain::load(&path)?;
    print_terrain_summary(&terrain, &path);
    Ok(())
}

fn path(input: &str, from: &str, to: &str, max_expansions: Option<usize>) -> TerrainResult<()> {
    let start = parse_coord(from)?;
    let goal = parse_coord(to)?;
    let terrain = Terrain::load(MapFile::resolve_path(input)?)?;

    let mut config = load_config().pathfinding_config();
    if max_expansions.is_some() {
        config.max_expansions = max_expansions;
    }

    let path = terrain.find_path_with(start, goal, config);
    if path.is_empty() {
        println!("No path from {start} to {goal}");
        print_endpoint(&terrain, "start", start);
        print_endpoint(&terrain, "goal", goal);
    } else {
        println!("Path of {} steps:", path.len());
        println!("  {}", format_path(start, &path));
    }
    Ok(())
}

fn print_endpoint(terrain: &Terrain, label: &str, coord: GridCoord) {
    match terrain.tile(coord) {
        Some(tile) => println!(
            "  {label} {coord}: {:?}, cost {:.2}, walkable {}, set {}",
            tile.surface(),
            tile.cost(),
            tile.is_walkable(),
            tile.set_id()
        ),
        None => println!("  {label} {coord}: outside the grid"),
    }
}

fn print_terrain_summary(terrain: &Terrain, path: &Path) {
    let stats = terrain.grid().stats();
    let total = terrain.grid().len().max(1) as f32;

    println!("\nTerrain summary ({}):", path.display());
    println!("  Size: {}x{} ({} tiles)", stats.width, stats.height, terrain.grid().len());
    println!(
        "  Surfaces: {} grass, {} stone, {} snow",
        stats.grass, stats.stone, stats.snow
    );
    println!(
        "  Walkable: {} tiles ({:.1}%)",
        stats.walkable,
        stats.walkable as f32 / total * 100.0
    );
    println!(
        "  Connected sets: {} (largest {} tiles)",
        stats.sets, stats.largest_set
    );
    println!("  Objects: {}", terrain.objects().len());

    if !terrain.objects().is_empty() {
        let mut type_counts = std::collections::BTreeMap::new();
        for obj in terrain.objects() {
            *type_counts.entry(format!("{:?}", obj.kind)).or_insert(0) += 1;
        }
        for (kind, count) in type_counts {
            println!("    {kind}: {count}");
        }
    }
}
