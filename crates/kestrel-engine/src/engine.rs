//! Root driver: one move decision per call.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use kestrel_core::{Color, Move, Position, uci};

use crate::book::OpeningBook;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::eval::score::Score;
use crate::search::negamax::SearchContext;
use crate::search::{self, SearchResult};

/// How a move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Picked from the opening book.
    Book(Move),
    /// Found by fixed-depth search.
    Searched { best_move: Move, score: Score },
}

impl Decision {
    pub fn best_move(&self) -> Move {
        match *self {
            Decision::Book(mv) => mv,
            Decision::Searched { best_move, .. } => best_move,
        }
    }

    /// Search score from the mover's perspective; `None` for book moves.
    pub fn score(&self) -> Option<Score> {
        match *self {
            Decision::Book(_) => None,
            Decision::Searched { score, .. } => Some(score),
        }
    }
}

/// A single game's move chooser.
///
/// Owns the game position and plays for whichever side is to move when
/// [`Engine::decide`] is called. The opening book is shared read-only.
pub struct Engine {
    position: Position,
    config: EngineConfig,
    book: Option<Arc<OpeningBook>>,
    rng: StdRng,
    nodes: u64,
}

impl Engine {
    /// Create an engine at the initial position.
    pub fn new(config: EngineConfig, book: Option<Arc<OpeningBook>>) -> Result<Engine, EngineError> {
        config.validate()?;
        info!(
            depth = config.depth,
            quiescence = config.quiescence,
            book_entries = book.as_ref().map_or(0, |b| b.len()),
            "engine created"
        );
        Ok(Engine {
            position: Position::startpos(),
            rng: seeded_rng(config.seed),
            config,
            book,
            nodes: 0,
        })
    }

    /// Start from `position` instead of the initial position.
    pub fn with_position(mut self, position: Position) -> Engine {
        self.position = position;
        self
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Reset to the initial position for a new game.
    pub fn new_game(&mut self) {
        self.position = Position::startpos();
        self.nodes = 0;
    }

    /// Apply a move given in UCI notation, typically the opponent's.
    pub fn apply_uci(&mut self, notation: &str) -> Result<Move, EngineError> {
        Ok(self.position.play_uci(notation)?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration. A changed seed reseeds book selection.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        config.validate()?;
        if config.seed != self.config.seed {
            self.rng = seeded_rng(config.seed);
        }
        self.config = config;
        Ok(())
    }

    pub fn book(&self) -> Option<&OpeningBook> {
        self.book.as_deref()
    }

    pub fn set_book(&mut self, book: Option<Arc<OpeningBook>>) {
        self.book = book;
    }

    /// Moves applied during the most recent decision or search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Negamax value of the current position for `side` at `depth` within
    /// `(alpha, beta)`. The position is left unchanged.
    pub fn search(&mut self, depth: u8, alpha: Score, beta: Score, side: Color) -> Score {
        let mut ctx = SearchContext::new(self.config.quiescence);
        let score = search::search(&mut self.position, depth, alpha, beta, side, &mut ctx);
        self.nodes = ctx.nodes;
        score
    }

    /// Choose and play a move at the configured depth.
    ///
    /// Returns `Ok(None)` when the side to move has no legal moves.
    pub fn decide(&mut self) -> Result<Option<Decision>, EngineError> {
        self.decide_at_depth(self.config.depth)
    }

    /// Choose and play a move, searching `depth` plies on a book miss.
    pub fn decide_at_depth(&mut self, depth: u8) -> Result<Option<Decision>, EngineError> {
        if depth == 0 {
            return Err(EngineError::InvalidDepth { depth });
        }
        self.nodes = 0;

        if let Some(mv) = self.book_move() {
            self.position.play(mv)?;
            debug!(mv = %uci(mv), "book move");
            return Ok(Some(Decision::Book(mv)));
        }

        let mut ctx = SearchContext::new(self.config.quiescence);
        let result = search::search_root(&mut self.position, depth, &mut ctx);
        self.nodes = ctx.nodes;

        let Some(SearchResult { best_move, score }) = result else {
            debug!(fen = %self.position, "no legal moves");
            return Ok(None);
        };

        self.position.play(best_move)?;
        debug!(
            mv = %uci(best_move),
            %score,
            depth,
            nodes = self.nodes,
            "search complete"
        );
        Ok(Some(Decision::Searched { best_move, score }))
    }

    fn book_move(&mut self) -> Option<Move> {
        if !self.config.use_book {
            return None;
        }
        let book = self.book.as_ref()?;
        let mv = book.lookup(&self.position, &mut self.rng);
        if mv.is_none() {
            trace!(hash = self.position.hash(), "book miss");
        }
        mv
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kestrel_core::{Color, Position, Square, uci};

    use super::{Decision, Engine};
    use crate::book::{BookEntry, OpeningBook, pack_move};
    use crate::config::EngineConfig;
    use crate::error::EngineError;
    use crate::eval::score::Score;

    fn engine(depth: u8) -> Engine {
        let config = EngineConfig {
            depth,
            seed: Some(0),
            ..EngineConfig::default()
        };
        Engine::new(config, None).unwrap()
    }

    #[test]
    fn new_rejects_zero_depth() {
        let config = EngineConfig {
            depth: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::new(config, None),
            Err(EngineError::InvalidDepth { depth: 0 })
        ));
    }

    #[test]
    fn decide_advances_one_ply() {
        let mut engine = engine(2);
        let decision = engine.decide().unwrap().unwrap();
        assert_eq!(engine.position().ply(), 1);
        assert_eq!(engine.position().last_move(), Some(decision.best_move()));
        assert!(decision.score().is_some());
        assert!(engine.nodes() > 0);
    }

    #[test]
    fn node_counter_resets_per_decision() {
        let mut engine = engine(1);
        engine.decide().unwrap();
        let first = engine.nodes();
        engine.decide().unwrap();
        // One ply deep, the count equals the number of root moves.
        assert_eq!(first, 20);
        assert_eq!(engine.nodes(), 20);
    }

    #[test]
    fn apply_uci_rejects_illegal_move() {
        let mut engine = engine(1);
        let err = engine.apply_uci("e2e5").unwrap_err();
        assert!(matches!(err, EngineError::Core(_)));
        assert_eq!(engine.position(), &Position::startpos());
    }

    #[test]
    fn plays_for_side_to_move() {
        let mut engine = engine(1);
        engine.apply_uci("e2e4").unwrap();
        let decision = engine.decide().unwrap().unwrap();
        assert_eq!(engine.position().side_to_move(), Color::White);
        let mut before = engine.position().clone();
        before.undo();
        assert!(before.legal_moves().contains(&decision.best_move()));
    }

    #[test]
    fn no_move_when_mated() {
        let pos = Position::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1").unwrap();
        let mut engine = engine(3).with_position(pos.clone());
        assert_eq!(engine.decide().unwrap(), None);
        assert_eq!(engine.position(), &pos);
    }

    #[test]
    fn book_hit_skips_search() {
        let start = Position::startpos();
        let book = OpeningBook::from_entries(vec![BookEntry {
            key: start.hash(),
            raw_move: pack_move(Square::G1, Square::F3, None),
            weight: 1,
            learn: 0,
        }]);
        let config = EngineConfig {
            seed: Some(3),
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(config, Some(Arc::new(book))).unwrap();
        let decision = engine.decide().unwrap().unwrap();
        assert!(matches!(decision, Decision::Book(_)));
        assert_eq!(uci(decision.best_move()), "g1f3");
        assert_eq!(engine.nodes(), 0);
    }

    #[test]
    fn disabled_book_is_ignored() {
        let start = Position::startpos();
        let book = OpeningBook::from_entries(vec![BookEntry {
            key: start.hash(),
            raw_move: pack_move(Square::G1, Square::F3, None),
            weight: 1,
            learn: 0,
        }]);
        let config = EngineConfig {
            depth: 1,
            use_book: false,
            seed: Some(3),
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(config, Some(Arc::new(book))).unwrap();
        let decision = engine.decide().unwrap().unwrap();
        assert!(matches!(decision, Decision::Searched { .. }));
    }

    #[test]
    fn search_finds_mate_in_one() {
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mut engine = engine(1).with_position(pos.clone());
        let wide = engine.search(1, -Score::INFINITY, Score::INFINITY, Color::White);
        assert_eq!(wide, Score::MATE);
        assert_eq!(engine.position(), &pos);
    }

    #[test]
    fn node_counter_resets_per_search() {
        let mut engine = engine(2);
        engine.search(2, -Score::INFINITY, Score::INFINITY, Color::White);
        let first = engine.nodes();
        engine.search(2, -Score::INFINITY, Score::INFINITY, Color::White);
        assert!(first > 0);
        assert_eq!(engine.nodes(), first);
    }

    #[test]
    fn decide_at_depth_rejects_zero() {
        let mut engine = engine(2);
        assert!(matches!(
            engine.decide_at_depth(0),
            Err(EngineError::InvalidDepth { depth: 0 })
        ));
    }
}
