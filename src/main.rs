use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use repertoire::constants::{DEFAULT_EXERCISE_DIR, INPUT_POLL_MS, TICK_INTERVAL_MS};
use repertoire::input::{self, InputResult};
use repertoire::pool::ExercisePool;
use repertoire::trainer_logic::{self, TrainerSession};
use repertoire::{build_info, ui};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut exercise_dir = PathBuf::from(DEFAULT_EXERCISE_DIR);

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "repertoire {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Repertoire - Terminal Chess Exercise Trainer\n");
                println!("Usage: repertoire [DIR]\n");
                println!("Arguments:");
                println!("  DIR        Directory scanned recursively for .pgn and .json");
                println!("             exercises (default: {DEFAULT_EXERCISE_DIR}/)\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'repertoire --help' for usage.");
                std::process::exit(1);
            }
            dir => exercise_dir = PathBuf::from(dir),
        }
    }

    // Resolve the pool before touching the terminal; an unusable exercise
    // set should fail loudly on a normal screen.
    let pool = match ExercisePool::discover(&exercise_dir) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!(
                "Cannot read exercise directory {}: {}",
                exercise_dir.display(),
                e
            );
            std::process::exit(1);
        }
    };
    if pool.is_empty() {
        eprintln!(
            "No exercises found under {} (expected .pgn or .json files).",
            exercise_dir.display()
        );
        std::process::exit(1);
    }

    let mut rng = rand::thread_rng();
    let mut session = match TrainerSession::new(pool, &mut rng) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to load first exercise: {}", e);
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let mut last_tick = Instant::now();
    loop {
        // Draw UI, keeping the board position for mouse hit-testing.
        let mut layout = None;
        terminal.draw(|frame| {
            layout = ui::draw_ui(frame, &session);
        })?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            match event::read()? {
                Event::Key(key_event) => {
                    if input::handle_key(key_event, &mut session, &mut rng) == InputResult::Quit {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => {
                    input::handle_mouse(mouse_event, layout, &mut session, &mut rng);
                }
                _ => {}
            }
        }

        // Feedback countdown tick every 100ms
        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            trainer_logic::tick_feedback(&mut session);
            last_tick = Instant::now();
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    let stats = session.stats;
    println!(
        "Session over: {} exercises solved, {}/{} moves correct.",
        stats.completed, stats.correct, stats.attempts
    );

    Ok(())
}
