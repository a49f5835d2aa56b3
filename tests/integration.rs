//! Integration tests for the wallbaduk engine binary.
//!
//! Drives full protocol sessions by spawning the engine process, sending
//! commands via stdin, and checking stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_wallbaduk");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start wallbaduk");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

#[test]
fn handshake_lists_options() {
    let lines = run_engine(&["wbi", "quit"]);

    assert_eq!(lines.first().map(String::as_str), Some("id name wallbaduk"));
    assert_eq!(lines.last().map(String::as_str), Some("wbiok"));
    let options: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert_eq!(options.len(), 6);
    for opt in options {
        assert!(opt.contains(" type "), "option line missing type: {}", opt);
    }
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn unknown_and_empty_lines_are_ignored() {
    let lines = run_engine(&["", "foobar", "  ", "move e5", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn commands_before_newgame_report_no_game() {
    let lines = run_engine(&["place e5", "score", "quit"]);
    assert_eq!(lines, vec!["error no game in progress"; 2]);
}

#[test]
fn quit_stops_processing() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn play_a_short_game() {
    let lines = run_engine(&[
        "newgame",
        "place e5",
        "place e5",
        "place a1",
        "move e5 e3",
        "score",
        "quit",
    ]);

    assert!(lines[0].starts_with("game "));
    assert!(lines[0].ends_with("size 9x9 players 2"));
    assert_eq!(lines[1], "status turn 0 phase playing tomove black");
    assert_eq!(lines[2], "status turn 1 phase playing tomove white");
    assert_eq!(lines[3], "error invalid move: position e5 is occupied");
    assert_eq!(lines[4], "status turn 2 phase playing tomove black");
    assert_eq!(lines[5], "status turn 3 phase playing tomove white");
    assert_eq!(lines[6], "score black 80 white 80");
}

#[test]
fn wall_blocks_a_two_step_move() {
    let lines = run_engine(&[
        "newgame",
        "place e5",
        "place a1",
        "wall e4 h",
        "move e5 e3",
        "quit",
    ]);

    // The wall keeps the turn with black.
    assert_eq!(lines[4], "status turn 3 phase playing tomove black");
    assert_eq!(lines[5], "error invalid move: path from e5 to e3 is blocked");
}

#[test]
fn setoption_changes_next_game() {
    let lines = run_engine(&[
        "setoption name BoardSize value 13",
        "setoption name Players value 3",
        "setoption name WallEndsTurn value true",
        "newgame",
        "place g7",
        "pass",
        "wall g7 v",
        "quit",
    ]);

    assert!(lines[0].ends_with("size 13x13 players 3"));
    assert_eq!(lines[2], "status turn 1 phase playing tomove white");
    assert_eq!(lines[3], "status turn 2 phase playing tomove blue");
    // Blue has no piece next to g7.
    assert!(lines[4].starts_with("error invalid move: wall at g7"));
}

#[test]
fn undo_pause_and_resume() {
    let lines = run_engine(&[
        "newgame", "place c3", "undo", "undo", "pause", "pass", "resume", "pass", "quit",
    ]);

    assert_eq!(lines[3], "status turn 0 phase playing tomove black");
    assert_eq!(lines[4], "error invalid move: nothing to undo");
    assert_eq!(lines[5], "status turn 0 phase paused tomove black");
    assert!(lines[6].starts_with("error invalid move: game is Paused"));
    assert_eq!(lines[7], "status turn 0 phase playing tomove black");
    assert_eq!(lines[8], "status turn 1 phase playing tomove white");
}

#[test]
fn state_is_json() {
    let lines = run_engine(&["newgame", "place b2", "state", "quit"]);
    let value: serde_json::Value = serde_json::from_str(&lines[3]).unwrap();
    assert_eq!(value["turn_count"], 1);
    assert_eq!(value["board_size"], "Small");
    assert_eq!(value["players"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["board"]["pieces"][0]["position"]["col"], 1);
}

#[test]
fn board_and_legal() {
    let lines = run_engine(&["newgame", "place a1", "board", "legal", "quit"]);
    assert_eq!(lines[3], "   a b c d e f g h i");
    assert_eq!(lines[4], " 1 B . . . . . . . .");
    assert_eq!(lines.len(), 3 + 10 + 1);
    let legal = lines.last().unwrap();
    assert!(legal.starts_with("legal place b1 ; "));
    assert!(legal.ends_with(" ; pass"));
}

#[test]
fn resign_ends_two_player_game() {
    let lines = run_engine(&["newgame", "place e5", "resign", "pass", "quit"]);
    assert_eq!(lines[3], "status turn 2 phase finished tomove black");
    assert_eq!(lines[4], "gameover resignation winner black");
    assert!(lines[5].starts_with("error invalid move: game is Finished"));
}

#[test]
fn off_board_highlight_is_harmless() {
    let lines = run_engine(&[
        "newgame",
        "board a2147483647",
        "board z26",
        "isready",
        "quit",
    ]);
    // The first board command is malformed and dropped; the second marks nothing.
    assert_eq!(lines.len(), 2 + 10 + 1);
    assert_eq!(lines[2], "   a b c d e f g h i");
    assert!(lines[2..12].iter().all(|l| !l.contains('*')));
    assert_eq!(lines[12], "readyok");
}

#[test]
fn score_puts_the_leader_first() {
    let lines = run_engine(&[
        "newgame", "place e5", "place a1", "pass", "place a9", "score", "quit",
    ]);
    assert_eq!(lines[6], "score white 160 black 79");
}
