use crate::duel::{Duel, DuelResult, DuelSettings};
use crate::error::GameError;
use crate::wordbank::Corpus;
use crate::{debug_log, info_log};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    NewGame,
    Exit,
}

/// Front end driven by `game_loop`. Implemented by the line-based CLI and the TUI.
///
/// Each display call receives the whole duel, so an interface may redraw from scratch.
pub trait GameInterface {
    /// Shows both boards after setup or after an accepted guess.
    fn display_duel(&mut self, duel: &Duel);

    /// Waits for the next action from whichever side is on turn.
    /// `None` means the input was unusable and should simply be asked for again.
    fn read_action(&mut self, duel: &Duel) -> Option<UserAction>;

    fn display_rejected_guess(&mut self, duel: &Duel, guess: &str, error: &GameError);

    fn display_result(&mut self, duel: &Duel, result: &DuelResult);

    fn display_new_game(&mut self, duel: &Duel);

    fn display_exit_message(&mut self);
}

/// Runs duels until the interface asks to exit.
///
/// # Errors
/// Fails only when a duel cannot be set up (no secret of the configured length).
pub fn game_loop<I, R>(
    corpus: &Corpus,
    settings: &DuelSettings,
    rng: &mut R,
    interface: &mut I,
) -> Result<(), GameError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut duel = Duel::new(corpus, settings, rng)?;
    interface.display_duel(&duel);

    loop {
        let Some(action) = interface.read_action(&duel) else {
            continue;
        };

        match action {
            UserAction::Exit => {
                info_log!("exit requested");
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                duel = Duel::new(corpus, settings, rng)?;
                interface.display_new_game(&duel);
            }
            UserAction::Guess(_) if duel.is_finished() => {
                debug_log!("ignoring guess after the duel ended");
            }
            UserAction::Guess(guess) => match duel.submit(corpus, &guess) {
                Ok(_) => {
                    interface.display_duel(&duel);
                    if let Some(result) = duel.result() {
                        info_log!("duel over: {}", result);
                        interface.display_result(&duel, &result);
                    }
                }
                Err(e) => interface.display_rejected_guess(&duel, &guess, &e),
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::Side;
    use crate::wordbank::load_words_from_str;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    /// Scripted interface that records what the loop showed it.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        duels_shown: usize,
        rejected: Vec<String>,
        results: Vec<String>,
        new_games: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_duel(&mut self, _duel: &Duel) {
            self.duels_shown += 1;
        }

        fn read_action(&mut self, _duel: &Duel) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_rejected_guess(&mut self, _duel: &Duel, guess: &str, _error: &GameError) {
            self.rejected.push(guess.to_string());
        }

        fn display_result(&mut self, _duel: &Duel, result: &DuelResult) {
            self.results.push(result.to_string());
        }

        fn display_new_game(&mut self, _duel: &Duel) {
            self.new_games += 1;
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn single_word_corpus() -> Corpus {
        Corpus::new(
            load_words_from_str("crane"),
            load_words_from_str("slate\ntrace"),
        )
    }

    fn settings() -> DuelSettings {
        DuelSettings {
            columns: Some(5),
            shared_secret: true,
        }
    }

    fn guess(word: &str) -> Option<UserAction> {
        Some(UserAction::Guess(word.to_string()))
    }

    #[test]
    fn test_game_loop_immediate_exit() {
        let mut ui = ScriptedInterface::new(vec![Some(UserAction::Exit)]);
        game_loop(
            &single_word_corpus(),
            &settings(),
            &mut StdRng::seed_from_u64(1),
            &mut ui,
        )
        .unwrap();
        assert!(ui.exited);
        assert_eq!(ui.duels_shown, 1);
    }

    #[test]
    fn test_game_loop_unusable_input_is_skipped() {
        let mut ui = ScriptedInterface::new(vec![None, None, Some(UserAction::Exit)]);
        game_loop(
            &single_word_corpus(),
            &settings(),
            &mut StdRng::seed_from_u64(1),
            &mut ui,
        )
        .unwrap();
        assert!(ui.exited);
    }

    #[test]
    fn test_game_loop_rejects_unknown_word() {
        let mut ui = ScriptedInterface::new(vec![guess("PUDGY"), guess("CRANES")]);
        game_loop(
            &single_word_corpus(),
            &settings(),
            &mut StdRng::seed_from_u64(1),
            &mut ui,
        )
        .unwrap();
        assert_eq!(ui.rejected, vec!["PUDGY", "CRANES"]);
        assert_eq!(ui.duels_shown, 1);
    }

    #[test]
    fn test_game_loop_full_duel() {
        // Whoever starts: first player misses, second solves, first solves next
        let mut ui = ScriptedInterface::new(vec![
            guess("SLATE"),
            guess("CRANE"),
            guess("CRANE"),
            guess("CRANE"),
        ]);
        let mut rng = StdRng::seed_from_u64(5);
        game_loop(&single_word_corpus(), &settings(), &mut rng, &mut ui).unwrap();

        assert_eq!(ui.results.len(), 1);
        assert!(ui.results[0].contains("side won with 1 move!"));
        assert!(ui.results[0].ends_with("was 1 move off."));
        // The trailing guess after the result is ignored, not rejected
        assert!(ui.rejected.is_empty());
        assert_eq!(ui.duels_shown, 4);
    }

    #[test]
    fn test_game_loop_new_game() {
        let mut ui = ScriptedInterface::new(vec![
            guess("CRANE"),
            Some(UserAction::NewGame),
            guess("SLATE"),
        ]);
        game_loop(
            &single_word_corpus(),
            &settings(),
            &mut StdRng::seed_from_u64(9),
            &mut ui,
        )
        .unwrap();
        assert_eq!(ui.new_games, 1);
        assert!(ui.results.is_empty());
    }

    #[test]
    fn test_game_loop_setup_failure() {
        let mut ui = ScriptedInterface::new(vec![]);
        let settings = DuelSettings {
            columns: Some(6),
            shared_secret: true,
        };
        let err = game_loop(
            &single_word_corpus(),
            &settings,
            &mut StdRng::seed_from_u64(1),
            &mut ui,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::NoSecretOfLength(6)));
        assert_eq!(ui.duels_shown, 0);
    }

    #[test]
    fn test_scripted_duel_is_reproducible() {
        let corpus = Corpus::embedded();
        let first = Duel::new(&corpus, &settings(), &mut StdRng::seed_from_u64(77)).unwrap();
        let second = Duel::new(&corpus, &settings(), &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(
            first.board(Side::Left).secret(),
            second.board(Side::Left).secret()
        );
    }
}
