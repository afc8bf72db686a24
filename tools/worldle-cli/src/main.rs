use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use worldle_core::geodata::{load_geojson, Locale};
use worldle_core::{
    DistanceUnit, FixedSelector, Game, GameConfig, GameOutcome, GameSession, MysterySelector,
    RandomSelector, MAX_ATTEMPTS,
};

mod output;
mod render;

use output::{write_guesses_geojson, write_outline_geojson};
use render::{format_guess, outline_to_ascii};

const OUTLINE_WIDTH: usize = 48;

// Typed in place of a guess
const NEW_GAME: &str = "new";
const HINT: &str = "hint";
const REVEAL: &str = "reveal";

#[derive(Parser, Debug)]
#[command(
    name = "worldle",
    author,
    version,
    about = "Guess the mystery country from its outline",
    long_about = "You are shown the outline of a mystery country. Guess it in six tries.\n\n\
                  Each wrong guess reveals the distance from its center to the mystery's \
                  center, the direction to travel, and a proximity score: 100% for the \
                  right country, 0% for the far side of the globe.\n\n\
                  Type `hint` to write your guesses' outlines to a GeoJSON file, `reveal` to \
                  add the mystery country to it, or `new` to switch to another country."
)]
struct Args {
    /// Country dataset (GeoJSON FeatureCollection)
    #[arg(short, long)]
    data: PathBuf,

    /// JSON settings file; flags below take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language for country names (en, fr, de, ...)
    #[arg(short, long)]
    locale: Option<Locale>,

    /// Seed for the mystery draw
    #[arg(long)]
    seed: Option<u64>,

    /// Report distances in miles
    #[arg(long)]
    miles: bool,

    /// Allow guessing dependencies and leases
    #[arg(long)]
    include_dependencies: bool,

    /// Play against this country id instead of a random one
    #[arg(long)]
    mystery: Option<String>,

    /// Also write the mystery outline, unlabelled, to this GeoJSON file
    #[arg(long)]
    outline: Option<PathBuf>,

    /// GeoJSON file the `hint` and `reveal` commands write guessed outlines to
    #[arg(long, default_value = "guesses.geojson")]
    hints: PathBuf,

    /// Print every guessable country name and exit
    #[arg(long)]
    list: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.miles {
            config.distance_unit = DistanceUnit::Miles;
        }
        if self.include_dependencies {
            config.include_dependencies = true;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .without_time()
        .with_writer(io::stderr)
        .init();

    if !args.data.exists() {
        bail!("Dataset does not exist: {}", args.data.display());
    }

    let config = args.game_config()?;
    let store = load_geojson(&args.data, config.load_options())
        .with_context(|| format!("Failed to load dataset {}", args.data.display()))?;
    let game = Game::new(Arc::new(store), config);

    if args.list {
        for name in game.country_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut selector: Box<dyn MysterySelector> = match &args.mystery {
        Some(id) => Box::new(FixedSelector(id.as_str().into())),
        None => Box::new(RandomSelector::new(game.config().seed)),
    };
    let options = PlayOptions {
        outline: args.outline.clone(),
        hints: args.hints.clone(),
    };

    play(&game, selector.as_mut(), &options, io::stdin().lock())?;
    Ok(())
}

/// Where the game writes its GeoJSON files.
struct PlayOptions {
    outline: Option<PathBuf>,
    hints: PathBuf,
}

/// How a single game ended.
#[derive(Debug, PartialEq, Eq)]
enum RoundEnd {
    Finished,
    NewGame,
    EndOfInput,
}

/// Play games until the player stops asking for another.
///
/// Returns every session played, the last possibly unfinished.
fn play(
    game: &Game,
    selector: &mut dyn MysterySelector,
    options: &PlayOptions,
    input: impl BufRead,
) -> Result<Vec<GameSession>> {
    let mut lines = input.lines();
    let mut sessions = Vec::new();

    loop {
        let mut session = game
            .new_session(selector)
            .context("Failed to pick a mystery country")?;

        if let Some(path) = &options.outline {
            write_outline_geojson(game, &session, path)?;
        }

        let end = play_round(game, &mut session, options, &mut lines)?;
        announce_result(game, &session);
        sessions.push(session);

        match end {
            RoundEnd::NewGame => println!(),
            RoundEnd::EndOfInput => break,
            RoundEnd::Finished => {
                if !play_again(&mut lines)? {
                    break;
                }
                println!();
            }
        }
    }

    Ok(sessions)
}

fn play_round(
    game: &Game,
    session: &mut GameSession,
    options: &PlayOptions,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<RoundEnd> {
    println!("Guess the country! 🌍");
    println!(
        "Type `{HINT}` to map your guesses, `{REVEAL}` to map the answer too, `{NEW_GAME}` for another country."
    );
    println!();
    print!("{}", outline_to_ascii(&session.mystery().boundary, OUTLINE_WIDTH));
    println!();

    while !session.is_over() {
        print!("Guess {}/{}: ", session.guesses().len() + 1, MAX_ATTEMPTS);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(RoundEnd::EndOfInput);
        };
        let line = line.context("Failed to read guess")?;
        let guess = line.trim();

        match guess.to_ascii_lowercase().as_str() {
            "" => continue,
            NEW_GAME => return Ok(RoundEnd::NewGame),
            command @ (HINT | REVEAL) => {
                let reveal = command == REVEAL;
                match write_guesses_geojson(game, session, reveal, &options.hints) {
                    Ok(count) => {
                        println!("🗺️  Wrote {count} outlines to {}", options.hints.display())
                    }
                    Err(err) => println!("⚠️  {err:#}"),
                }
                continue;
            }
            _ => {}
        }

        match game.submit_guess(session, guess) {
            Ok(result) => println!("{}", format_guess(game, &result)),
            Err(err) if err.is_recoverable() => println!("⚠️  {err}"),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(RoundEnd::Finished)
}

fn announce_result(game: &Game, session: &GameSession) {
    let answer = game.display_name(session.mystery());
    match session.outcome() {
        GameOutcome::Won => println!("You guessed correctly! 🥳 It was {answer}."),
        GameOutcome::Lost => {
            println!("You guessed incorrectly {MAX_ATTEMPTS} times 😔 It was {answer}.")
        }
        GameOutcome::InProgress => println!("Game abandoned. It was {answer}."),
    }
}

fn play_again(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<bool> {
    print!("Play again? [y/N]: ");
    io::stdout().flush()?;

    let Some(line) = lines.next() else {
        println!();
        return Ok(false);
    };
    let answer = line.context("Failed to read answer")?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
