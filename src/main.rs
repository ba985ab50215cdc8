//! Road Dodge entry point
//!
//! Native builds run a headless demo: a synthetic 60 Hz frame clock drives the
//! simulation while a simple autopilot steers. The browser build is driven
//! from JavaScript through `road_dodge::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use road_dodge::sim::{Direction, GameEvent, GamePhase, Rect, Snapshot, overlaps};
    use road_dodge::{Difficulty, Game, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Headless Road Dodge run driven by a synthetic 60 Hz clock
    #[derive(Debug, Parser)]
    #[command(name = "road-dodge")]
    struct Args {
        /// Difficulty tier: easy, medium or hard
        #[arg(long, default_value = "medium", value_parser = parse_difficulty)]
        difficulty: Difficulty,
        /// RNG seed
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        /// JSON settings file overriding the defaults
        #[arg(long, value_name = "PATH")]
        settings: Option<PathBuf>,
        /// Stop after this many frames if the car has not crashed
        #[arg(long, default_value_t = 60 * 60 * 5)]
        max_frames: u64,
    }

    fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
        Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty `{s}`"))
    }

    fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings = Settings::from_json(&json)
            .with_context(|| format!("loading settings from {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Pick the held keys for this frame: dodge the closest threat, else chase a bonus
    fn autopilot(snap: &Snapshot<'_>, field_width: f32) -> (bool, bool) {
        let Some(player) = snap.player else {
            return (false, false);
        };
        let me = player.rect;
        // Look a few car lengths up the road
        let lookahead = Rect::new(me.left(), me.top() - me.size.y * 2.0, me.size.x, me.size.y * 3.0);
        let threat = snap
            .obstacles
            .iter()
            .filter(|o| overlaps(&lookahead, &o.rect))
            .max_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));

        let centre = me.left() + me.size.x / 2.0;
        match threat {
            Some(o) => {
                let obstacle_centre = o.rect.left() + o.rect.size.x / 2.0;
                // Go around on the side with more room
                let go_left = if obstacle_centre > centre {
                    o.rect.left() > me.size.x
                } else {
                    o.rect.right() > field_width - me.size.x
                };
                (go_left, !go_left)
            }
            None => match snap.bonuses.iter().max_by(|a, b| a.rect.top().total_cmp(&b.rect.top())) {
                Some(b) => {
                    let target = b.rect.left() + b.rect.size.x / 2.0;
                    (target < centre - 2.0, target > centre + 2.0)
                }
                None => (false, false),
            },
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        log::info!("Road Dodge (native) starting...");

        let args = Args::parse();
        let settings = load_settings(args.settings.as_ref())?;
        let mut game = Game::new(settings, args.seed);
        log::info!("Game initialized with seed: {}", args.seed);
        game.start(args.difficulty);
        let field_width = game.settings().playfield.width;

        let mut frame = 0;
        while frame < args.max_frames {
            let now = frame as f64 * FRAME_MS;
            let snap = game.update(now);
            for event in snap.events {
                match event {
                    GameEvent::SpeedUp { speed } => log::info!("Speed up: {speed}"),
                    GameEvent::BonusCollected { score, .. } => log::info!("Bonus! score {score}"),
                    other => log::trace!("{other:?}"),
                }
            }
            if snap.phase == GamePhase::Ended {
                break;
            }
            let (left, right) = autopilot(&game.snapshot(), field_width);
            game.set_input(Direction::Left, left);
            game.set_input(Direction::Right, right);
            frame += 1;
        }

        let snap = game.snapshot();
        let outcome = if snap.phase == GamePhase::Ended {
            "crashed"
        } else {
            "survived"
        };
        println!(
            "{} after {:.1}s on {} - score {}, speed {}",
            outcome,
            frame as f64 * FRAME_MS / 1000.0,
            args.difficulty.as_str(),
            snap.score,
            snap.speed
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds are driven from JavaScript via `road_dodge::web::WebGame`
}
