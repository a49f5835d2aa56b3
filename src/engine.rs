//! Engine session state.
//!
//! Holds the engine options and the game being played, and turns protocol
//! commands into calls on a `GameService` backed by an in-memory repository.
//! Every handler writes its reply to `out`; rule rejections are replies
//! (`error ...`), not failures.

use std::collections::HashMap;
use std::io::{self, Write};

use tracing::warn;

use crate::board::{AiDifficulty, BoardSize, GameId, GameSettings, GameState, GridPosition, Rules};
use crate::error::GameError;
use crate::movegen::movement::reachable_targets;
use crate::movegen::{legal_actions, Action};
use crate::protocol::{format_actions, render_board};
use crate::repository::InMemoryRepository;
use crate::score::game_result;
use crate::service::GameService;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    service: GameService<InMemoryRepository>,
    game: Option<GameId>,
    pub options: HashMap<String, String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with default options and no game.
    pub fn new() -> Self {
        Engine {
            service: GameService::new(InMemoryRepository::new()),
            game: None,
            options: HashMap::new(),
        }
    }

    /// Sets an engine option; a missing value is stored as an empty string.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Builds game settings from the current options.
    pub fn settings(&self) -> Result<GameSettings, GameError> {
        let mut settings = GameSettings::default();
        if let Some(v) = self.options.get("BoardSize") {
            // Accepts "13" as well as "13x13".
            settings.board_size = v
                .split('x')
                .next()
                .and_then(|n| n.trim().parse::<u32>().ok())
                .and_then(BoardSize::from_dimension)
                .ok_or_else(|| invalid("BoardSize", v))?;
        }
        if let Some(v) = self.options.get("Players") {
            settings.player_count = v.parse().map_err(|_| invalid("Players", v))?;
        }
        if let Some(v) = self.options.get("TimeLimit") {
            settings.time_limit_secs = v.parse().map_err(|_| invalid("TimeLimit", v))?;
        }
        if let Some(v) = self.options.get("WallEndsTurn") {
            let wall_ends_turn = match v.as_str() {
                "" | "true" => true,
                "false" => false,
                _ => return Err(invalid("WallEndsTurn", v)),
            };
            settings.rules = Rules { wall_ends_turn };
        }
        if let Some(v) = self.options.get("AiDifficulty") {
            settings.ai_difficulty = match v.as_str() {
                "" | "none" => None,
                name => Some(
                    AiDifficulty::from_name(name).ok_or_else(|| invalid("AiDifficulty", v))?,
                ),
            };
        }
        if let Some(v) = self.options.get("AiSeats") {
            // Comma-separated 1-based seats, e.g. "2,3".
            settings.ai_players = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| match s.parse::<usize>() {
                    Ok(seat) if seat >= 1 => Ok(seat - 1),
                    _ => Err(invalid("AiSeats", v)),
                })
                .collect::<Result<_, _>>()?;
        }
        Ok(settings)
    }

    /// Returns the latest snapshot of the game in progress.
    pub fn current(&self) -> Option<GameState> {
        self.game.and_then(|id| self.service.load_game(id).ok())
    }

    /// Handles the handshake: writes id, options, and `wbiok`.
    pub fn handle_wbi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name wallbaduk")?;
        writeln!(out, "option name BoardSize type combo default 9 var 9 var 13 var 19")?;
        writeln!(out, "option name Players type spin default 2 min 2 max 4")?;
        writeln!(out, "option name TimeLimit type spin default 60 min 0 max 3600")?;
        writeln!(out, "option name WallEndsTurn type check default false")?;
        writeln!(
            out,
            "option name AiDifficulty type combo default none var none var easy var medium var hard"
        )?;
        writeln!(out, "option name AiSeats type string default <empty>")?;
        writeln!(out, "wbiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Starts a game from the current options, replacing any game in progress.
    pub fn handle_newgame<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let started = self
            .settings()
            .and_then(|settings| self.service.start_game(&settings));
        match started {
            Ok(state) => {
                if let Some(old) = self.game.replace(state.id) {
                    match self.service.delete_game(old) {
                        Ok(()) | Err(GameError::GameNotFound(_)) => {}
                        Err(e) => warn!(game = %old, error = %e, "failed to drop previous game"),
                    }
                }
                writeln!(
                    out,
                    "game {} size {} players {}",
                    state.id,
                    state.board_size,
                    state.players.len()
                )?;
                write_status(&state, out)?;
            }
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }

    /// Applies an action for the player to move.
    pub fn handle_play<W: Write>(&mut self, action: &Action, out: &mut W) -> io::Result<()> {
        self.transition(out, |svc, id| svc.play(id, action))
    }

    pub fn handle_pause<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.transition(out, |svc, id| svc.pause(id))
    }

    pub fn handle_resume<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.transition(out, |svc, id| svc.resume(id))
    }

    pub fn handle_undo<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.transition(out, |svc, id| svc.undo(id))
    }

    /// Writes `score <color> <n> ...`, best score first; ties keep seat order.
    pub fn handle_score<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(state) = self.current() else {
            return no_game(out);
        };
        let result = game_result(&state);
        let parts: Vec<String> = result
            .rankings()
            .into_iter()
            .map(|s| format!("{} {}", s.color.name(), s.score))
            .collect();
        writeln!(out, "score {}", parts.join(" "))?;
        out.flush()
    }

    /// Writes the text board, marking the targets of the piece at `highlight_from`.
    pub fn handle_board<W: Write>(
        &self,
        highlight_from: Option<GridPosition>,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(state) = self.current() else {
            return no_game(out);
        };
        let highlights = highlight_from
            .map(|from| reachable_targets(&state, from))
            .unwrap_or_default();
        write!(out, "{}", render_board(&state, &highlights))?;
        out.flush()
    }

    /// Writes the current snapshot as one line of JSON.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(state) = self.current() else {
            return no_game(out);
        };
        serde_json::to_writer(&mut *out, &state)?;
        writeln!(out)?;
        out.flush()
    }

    /// Writes `legal <action> ; <action> ...`.
    pub fn handle_legal<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(state) = self.current() else {
            return no_game(out);
        };
        let actions = legal_actions(&state);
        if actions.is_empty() {
            writeln!(out, "legal")?;
        } else {
            writeln!(out, "legal {}", format_actions(&actions))?;
        }
        out.flush()
    }

    fn transition<W, F>(&mut self, out: &mut W, apply: F) -> io::Result<()>
    where
        W: Write,
        F: FnOnce(&mut GameService<InMemoryRepository>, GameId) -> Result<GameState, GameError>,
    {
        let Some(id) = self.game else {
            return no_game(out);
        };
        match apply(&mut self.service, id) {
            Ok(state) => write_status(&state, out)?,
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }
}

fn invalid(option: &str, value: &str) -> GameError {
    GameError::InvalidSettings(format!("bad value '{}' for option {}", value, option))
}

fn no_game<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "error no game in progress")?;
    out.flush()
}

/// Writes `status ...` and, once the game is over, `gameover <reason> winner <color|none>`.
fn write_status<W: Write>(state: &GameState, out: &mut W) -> io::Result<()> {
    let to_move = state.current().map(|p| p.color.name()).unwrap_or("none");
    writeln!(
        out,
        "status turn {} phase {} tomove {}",
        state.turn_count, state.phase, to_move
    )?;
    if state.is_finished() {
        let result = game_result(state);
        let winner = result
            .winner
            .and_then(|id| state.player(id))
            .map(|p| p.color.name())
            .unwrap_or("none");
        let reason = state.end_reason.map(|r| r.name()).unwrap_or("unknown");
        writeln!(out, "gameover {} winner {}", reason, winner)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{MoveKind, Phase};
    use crate::protocol::parse_action_str;

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn engine_with_game() -> Engine {
        let mut engine = Engine::new();
        run(|out| engine.handle_newgame(out));
        engine
    }

    fn play(engine: &mut Engine, text: &str) -> String {
        let action = parse_action_str(text).unwrap();
        run(|out| engine.handle_play(&action, out))
    }

    #[test]
    fn new_engine_has_no_game() {
        let engine = Engine::new();
        assert!(engine.current().is_none());
        assert!(engine.options.is_empty());
        assert_eq!(run(|out| engine.handle_score(out)), "error no game in progress\n");
    }

    #[test]
    fn handshake_and_ready() {
        let engine = Engine::new();
        let text = run(|out| engine.handle_wbi(out));
        assert!(text.starts_with("id name wallbaduk"));
        assert!(text.contains("option name WallEndsTurn"));
        assert!(text.trim_end().ends_with("wbiok"));
        assert_eq!(run(|out| engine.handle_isready(out)).trim(), "readyok");
    }

    #[test]
    fn options_feed_settings() {
        let mut engine = Engine::new();
        engine.set_option("BoardSize".to_string(), Some("13".to_string()));
        engine.set_option("Players".to_string(), Some("3".to_string()));
        engine.set_option("WallEndsTurn".to_string(), None);
        let settings = engine.settings().unwrap();
        assert_eq!(settings.board_size, BoardSize::Medium);
        assert_eq!(settings.player_count, 3);
        assert!(settings.rules.wall_ends_turn);

        engine.set_option("BoardSize".to_string(), Some("19x19".to_string()));
        assert_eq!(engine.settings().unwrap().board_size, BoardSize::Large);

        engine.set_option("BoardSize".to_string(), Some("10".to_string()));
        assert!(matches!(engine.settings(), Err(GameError::InvalidSettings(_))));
    }

    #[test]
    fn newgame_reports_status() {
        let mut engine = Engine::new();
        let text = run(|out| engine.handle_newgame(out));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("game "));
        assert!(lines[0].ends_with("size 9x9 players 2"));
        assert_eq!(lines[1], "status turn 0 phase playing tomove black");
    }

    #[test]
    fn newgame_with_bad_player_count_is_an_error() {
        let mut engine = Engine::new();
        engine.set_option("Players".to_string(), Some("7".to_string()));
        let text = run(|out| engine.handle_newgame(out));
        assert!(text.starts_with("error invalid settings"));
        assert!(engine.current().is_none());
    }

    #[test]
    fn play_and_reject() {
        let mut engine = engine_with_game();
        assert_eq!(play(&mut engine, "place e5"), "status turn 1 phase playing tomove white\n");
        assert_eq!(
            play(&mut engine, "place e5"),
            "error invalid move: position e5 is occupied\n"
        );
        let state = engine.current().unwrap();
        assert_eq!(state.turn_count, 1);
        assert_eq!(state.moves[0].kind, MoveKind::Place { at: GridPosition::new(4, 4) });
    }

    #[test]
    fn undo_steps_back() {
        let mut engine = engine_with_game();
        play(&mut engine, "place e5");
        play(&mut engine, "place a1");
        let text = run(|out| engine.handle_undo(out));
        assert_eq!(text, "status turn 1 phase playing tomove white\n");
        assert_eq!(engine.current().unwrap().board.pieces().len(), 1);
    }

    #[test]
    fn pause_blocks_play_until_resume() {
        let mut engine = engine_with_game();
        run(|out| engine.handle_pause(out));
        assert_eq!(engine.current().unwrap().phase, Phase::Paused);
        assert!(play(&mut engine, "pass").starts_with("error invalid move"));
        run(|out| engine.handle_resume(out));
        assert!(play(&mut engine, "pass").starts_with("status"));
    }

    #[test]
    fn score_board_state_and_legal() {
        let mut engine = engine_with_game();
        play(&mut engine, "place e5");
        play(&mut engine, "place a1");

        assert_eq!(run(|out| engine.handle_score(out)), "score black 80 white 80\n");

        let board = run(|out| engine.handle_board(Some(GridPosition::new(4, 4)), out));
        assert!(board.contains(" 5 . . * * B * * . ."));

        let json = run(|out| engine.handle_state(out));
        let value: serde_json::Value = serde_json::from_str(json.trim()).unwrap();
        assert_eq!(value["turn_count"], 2);
        assert_eq!(value["phase"], "Playing");

        let legal = run(|out| engine.handle_legal(out));
        assert!(legal.starts_with("legal place b1 ; place c1"));
        assert!(legal.contains("move e5 e3"));
        assert!(legal.trim_end().ends_with("pass"));
    }

    #[test]
    fn resignation_reports_gameover() {
        let mut engine = engine_with_game();
        play(&mut engine, "place e5");
        let text = play(&mut engine, "resign");
        assert!(text.contains("phase finished"));
        assert!(text.ends_with("gameover resignation winner black\n"));
    }

    #[test]
    fn off_board_highlight_draws_plain_board() {
        let mut engine = engine_with_game();
        play(&mut engine, "place e5");
        let plain = run(|out| engine.handle_board(None, out));
        let far: GridPosition = "z26".parse().unwrap();
        assert_eq!(run(|out| engine.handle_board(Some(far), out)), plain);
        let extreme = GridPosition::new(0, i32::MAX);
        assert_eq!(run(|out| engine.handle_board(Some(extreme), out)), plain);
        assert!(!plain.contains('*'));
    }

    #[test]
    fn score_lists_leader_first() {
        let mut engine = engine_with_game();
        for text in ["place e5", "place a1", "pass", "place a9"] {
            play(&mut engine, text);
        }
        assert_eq!(run(|out| engine.handle_score(out)), "score white 160 black 79\n");
    }

    #[test]
    fn ai_options_mark_seats() {
        let mut engine = Engine::new();
        engine.set_option("AiDifficulty".to_string(), Some("Hard".to_string()));
        engine.set_option("AiSeats".to_string(), Some("2".to_string()));
        run(|out| engine.handle_newgame(out));
        let state = engine.current().unwrap();
        assert!(!state.players[0].is_ai);
        assert!(state.players[1].is_ai);
        assert_eq!(state.players[1].ai_difficulty, Some(AiDifficulty::Hard));

        engine.set_option("AiDifficulty".to_string(), Some("brutal".to_string()));
        assert!(matches!(engine.settings(), Err(GameError::InvalidSettings(_))));
        engine.set_option("AiDifficulty".to_string(), Some("none".to_string()));
        engine.set_option("AiSeats".to_string(), Some("0".to_string()));
        assert!(matches!(engine.settings(), Err(GameError::InvalidSettings(_))));
    }

    #[test]
    fn newgame_drops_previous_game() {
        let mut engine = engine_with_game();
        let first = engine.current().unwrap().id;
        run(|out| engine.handle_newgame(out));
        let active = engine.service.list_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_ne!(active[0].id, first);
        assert!(matches!(engine.service.load_game(first), Err(GameError::GameNotFound(_))));
    }
}
