use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;
use wordle_duel::cli::{CliInterface, parse_cli};
use wordle_duel::logging;
use wordle_duel::tui::TuiInterface;
use wordle_duel::wordbank::{Corpus, default_wordlist_path};
use wordle_duel::{GameError, game_loop, info_log};

fn load_corpus(path: Option<&std::path::Path>) -> Result<Corpus, GameError> {
    if let Some(path) = path {
        return Corpus::from_file(path);
    }
    match default_wordlist_path() {
        Some(path) if path.exists() => Corpus::from_file(&path),
        _ => Ok(Corpus::embedded()),
    }
}

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(!cli.plain);

    let corpus = match load_corpus(cli.wordbank_path.as_deref()) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info_log!(
        "word list: {} secrets, {} allowed guesses",
        corpus.possible_count(),
        corpus.allowed_count()
    );

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let settings = cli.duel_settings();

    let result = if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&corpus, &settings, &mut rng, &mut interface)
    } else {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&corpus, &settings, &mut rng, &mut interface),
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
