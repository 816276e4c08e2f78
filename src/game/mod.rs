//! Host-free gameplay core.
//!
//! Everything in this module is plain Rust state plus a per-tick [`GameState::update`];
//! no canvas, DOM or storage types appear here, so the whole game simulates natively
//! under `cargo test`. The browser shell owns the frame clock and feeds one [`Input`]
//! per animation frame; side effects (sound cues, high-score persistence) are
//! requested through the returned [`GameEvent`] list instead of being performed
//! inline.

// --- Baseline tuning constants ----------------------------------------------

pub const GRAVITY: f64 = 0.1;
pub const LIFT: f64 = -5.0;
pub const PIPE_WIDTH: f64 = 60.0;
pub const PIPE_GAP: f64 = 250.0;
pub const MIN_PIPE_HEIGHT: f64 = 50.0;
pub const PIPE_SPEED: f64 = 3.0;
/// A new pipe spawns once the previous one has scrolled this far in from the right edge.
pub const SPAWN_LEAD: f64 = 200.0;
pub const OWL_SIZE: f64 = 40.0;
pub const OWL_X: f64 = 50.0;
pub const OWL_START_Y: f64 = 200.0;
pub const COIN_SIZE: f64 = 20.0;
pub const COIN_REWARD: u32 = 10;

const RAMP_SCORE_STEP: u32 = 100;
const RAMP_SPEED_STEP: f64 = 0.2;
const RAMP_GAP_STEP: f64 = 6.0;
const RAMP_MIN_GAP: f64 = 200.0;

// --- Tuning -------------------------------------------------------------------

/// Difficulty ratchet: each time the score crosses a multiple of `score_step`,
/// pipes speed up and the gap narrows down to `min_gap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub score_step: u32,
    pub speed_step: f64,
    pub gap_step: f64,
    pub min_gap: f64,
}

impl Default for Ramp {
    fn default() -> Self {
        Self {
            score_step: RAMP_SCORE_STEP,
            speed_step: RAMP_SPEED_STEP,
            gap_step: RAMP_GAP_STEP,
            min_gap: RAMP_MIN_GAP,
        }
    }
}

/// Immutable per-run configuration. The two constructors cover the two shipped
/// game flavors; all fields stay public so tests can assemble odd playfields.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub width: f64,
    pub height: f64,
    pub gravity: f64,
    pub lift: f64,
    pub owl_width: f64,
    pub owl_height: f64,
    pub owl_x: f64,
    pub owl_start_y: f64,
    pub pipe_width: f64,
    pub pipe_gap: f64,
    pub min_pipe_height: f64,
    pub pipe_speed: f64,
    pub spawn_lead: f64,
    pub coin_size: f64,
    pub coin_reward: u32,
    /// Inclusive range of coins seeded into each new pipe's gap.
    pub coins_per_pipe: (u32, u32),
    pub ramp: Option<Ramp>,
}

impl Tuning {
    /// Standard game: 2-4 coins per pipe and the escalating difficulty ramp.
    pub fn for_playfield(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            gravity: GRAVITY,
            lift: LIFT,
            owl_width: OWL_SIZE,
            owl_height: OWL_SIZE,
            owl_x: OWL_X,
            owl_start_y: OWL_START_Y,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            min_pipe_height: MIN_PIPE_HEIGHT,
            pipe_speed: PIPE_SPEED,
            spawn_lead: SPAWN_LEAD,
            coin_size: COIN_SIZE,
            coin_reward: COIN_REWARD,
            coins_per_pipe: (2, 4),
            ramp: Some(Ramp::default()),
        }
    }

    /// Gentle flavor: exactly one coin per pipe, constant speed and gap.
    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            coins_per_pipe: (1, 1),
            ramp: None,
            ..Self::for_playfield(width, height)
        }
    }
}

// --- Entities -----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Owl {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity: f64,
}

impl Owl {
    fn spawn(tuning: &Tuning) -> Self {
        Self {
            x: tuning.owl_x,
            y: tuning.owl_start_y,
            width: tuning.owl_width,
            height: tuning.owl_height,
            velocity: 0.0,
        }
    }
}

/// A vertical pair of solid segments with a passable gap between them.
/// Invariant: `top + bottom + gap == playfield height` for the gap current at
/// spawn time.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
    /// Milestone marker; set on the first pipe spawned after a ramp step.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

// --- Loop plumbing ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Crashed,
}

/// Input gathered by the host between two frames. A single logical button:
/// lift while running, restart once crashed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Input {
    pub flap: bool,
}

/// Effects requested by a tick, in the order they occurred. The host decides
/// what each one means (sound cue, storage write, nothing).
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    CoinCollected { score: u32 },
    NewHighScore { high_score: u32 },
    SpeedUp { pipe_speed: f64, pipe_gap: f64 },
    Crashed,
}

// --- Random stream ------------------------------------------------------------

/// Tiny multiply-add-xorshift stream; enough spread for spawn jitter and fully
/// reproducible from the seed.
#[derive(Debug, Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let bits = (self.0 >> 33) ^ self.0;
        (bits % 1_000_000) as f64 / 1_000_000.0
    }

    fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Uniform integer in `lo..=hi`.
    fn roll(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        lo + (self.next_f64() * (hi - lo + 1) as f64) as u32
    }
}

// --- Game state ---------------------------------------------------------------

/// The entire mutable state of one session. Owned by the host shell and passed
/// explicitly through [`GameState::update`]; there are no globals.
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub owl: Owl,
    pub pipes: Vec<Pipe>,
    pub coins: Vec<Coin>,
    pub score: u32,
    /// Highest score seen this session, seeded from the persistence slot.
    pub high_score: u32,
    pub phase: Phase,
    /// Current scroll speed; starts at `tuning.pipe_speed`, ratchets up per run.
    pub pipe_speed: f64,
    /// Current gap size; starts at `tuning.pipe_gap`, ratchets down per run.
    pub pipe_gap: f64,
    rng: Lcg,
    pending_label: Option<String>,
}

impl GameState {
    pub fn new(tuning: Tuning, high_score: u32, seed: u64) -> Self {
        let owl = Owl::spawn(&tuning);
        let pipe_speed = tuning.pipe_speed;
        let pipe_gap = tuning.pipe_gap;
        Self {
            tuning,
            owl,
            pipes: Vec::new(),
            coins: Vec::new(),
            score: 0,
            high_score,
            phase: Phase::Running,
            pipe_speed,
            pipe_gap,
            rng: Lcg::new(seed),
            pending_label: None,
        }
    }

    /// Reset all per-run state. The high score and the random stream carry over.
    pub fn restart(&mut self) {
        self.owl = Owl::spawn(&self.tuning);
        self.pipes.clear();
        self.coins.clear();
        self.score = 0;
        self.phase = Phase::Running;
        self.pipe_speed = self.tuning.pipe_speed;
        self.pipe_gap = self.tuning.pipe_gap;
        self.pending_label = None;
    }

    /// Advance the simulation by one frame.
    ///
    /// A crashed state ignores everything except the restart input. A running
    /// tick always completes its whole pipeline even when it ends fatally, so
    /// a coin touched on the crash frame still scores and the outcome never
    /// depends on which collision is examined first.
    pub fn update(&mut self, input: Input) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::Crashed {
            if input.flap {
                self.restart();
            }
            return events;
        }

        if input.flap {
            self.owl.velocity = self.tuning.lift;
        }

        // Physics: additive gravity, no terminal-velocity clamp.
        self.owl.velocity += self.tuning.gravity;
        self.owl.y += self.owl.velocity;
        let mut fatal =
            self.owl.y < 0.0 || self.owl.y + self.owl.height > self.tuning.height;

        // Scroll pipes, then test every one of them before pruning. Expired
        // entities are dropped with `retain` after the scan so no pipe is ever
        // skipped on the frame a neighbor leaves the screen.
        for pipe in &mut self.pipes {
            pipe.x -= self.pipe_speed;
        }
        for pipe in &self.pipes {
            if self.hits_pipe(pipe) {
                fatal = true;
            }
        }
        let pipe_width = self.tuning.pipe_width;
        self.pipes.retain(|p| p.x + pipe_width >= 0.0);

        let need_pipe = match self.pipes.last() {
            None => true,
            Some(last) => last.x < self.tuning.width - self.tuning.spawn_lead,
        };
        if need_pipe {
            self.spawn_pipe();
        }

        // Coins scroll at pipe speed and die off the left edge.
        for coin in &mut self.coins {
            coin.x -= self.pipe_speed;
        }
        self.coins.retain(|c| c.x + c.size >= 0.0);

        let picked = self.collect_coins();
        for _ in 0..picked {
            self.score += self.tuning.coin_reward;
            events.push(GameEvent::CoinCollected { score: self.score });
            if self.score > self.high_score {
                self.high_score = self.score;
                events.push(GameEvent::NewHighScore {
                    high_score: self.high_score,
                });
            }
            if let Some(ramp) = self.tuning.ramp {
                if self.score % ramp.score_step == 0 {
                    self.pipe_speed += ramp.speed_step;
                    self.pipe_gap = (self.pipe_gap - ramp.gap_step).max(ramp.min_gap);
                    self.pending_label = Some(self.score.to_string());
                    events.push(GameEvent::SpeedUp {
                        pipe_speed: self.pipe_speed,
                        pipe_gap: self.pipe_gap,
                    });
                }
            }
        }

        if fatal {
            self.phase = Phase::Crashed;
            events.push(GameEvent::Crashed);
        }
        events
    }

    /// Solid-segment collision: horizontal spans overlap and the owl sits above
    /// the gap's upper bound or below its lower bound.
    fn hits_pipe(&self, pipe: &Pipe) -> bool {
        let owl = &self.owl;
        owl.x + owl.width > pipe.x
            && owl.x < pipe.x + self.tuning.pipe_width
            && (owl.y < pipe.top || owl.y + owl.height > self.tuning.height - pipe.bottom)
    }

    /// Remove every coin overlapping the owl (four-edge AABB test) and report
    /// how many were taken.
    fn collect_coins(&mut self) -> u32 {
        let (ox, oy, ow, oh) = (self.owl.x, self.owl.y, self.owl.width, self.owl.height);
        let mut picked = 0;
        self.coins.retain(|c| {
            let hit = ox < c.x + c.size && ox + ow > c.x && oy < c.y + c.size && oy + oh > c.y;
            if hit {
                picked += 1;
            }
            !hit
        });
        picked
    }

    /// Create one pipe at the right edge, splitting the playfield so that
    /// `top + bottom + current gap == height` exactly, and seed its coins.
    fn spawn_pipe(&mut self) {
        let max_top = self.tuning.height - self.pipe_gap - self.tuning.min_pipe_height;
        let top = self.rng.in_range(self.tuning.min_pipe_height, max_top);
        let bottom = self.tuning.height - top - self.pipe_gap;
        let pipe = Pipe {
            x: self.tuning.width,
            top,
            bottom,
            label: self.pending_label.take(),
        };
        self.spawn_coins(&pipe);
        self.pipes.push(pipe);
    }

    /// Scatter coins through the gap region of a freshly spawned pipe, jittered
    /// around the gap's vertical center.
    fn spawn_coins(&mut self, pipe: &Pipe) {
        let (lo, hi) = self.tuning.coins_per_pipe;
        let count = self.rng.roll(lo, hi);
        for _ in 0..count {
            let x = pipe.x + self.tuning.pipe_width + self.rng.next_f64() * (self.pipe_gap - 20.0);
            let y = pipe.top + self.pipe_gap / 2.0 + self.rng.in_range(-20.0, 20.0);
            self.coins.push(Coin {
                x,
                y,
                size: self.tuning.coin_size,
            });
        }
    }
}

// --- Tests ---------------------------------------------------------------------
