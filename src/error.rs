//! Top-level error type

use std::io;
use std::path::PathBuf;

/// Errors that end a round or the whole program.
///
/// Input mistakes and placement rejections are not errors; they are plain
/// values handled inside the game core.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The lexicon file could not be read
    #[error("could not read lexicon {}: {source}", .path.display())]
    Lexicon {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The lexicon file held no usable words
    #[error("lexicon {} contains no words", .path.display())]
    EmptyLexicon { path: PathBuf },

    /// No word of the required length has enough subwords
    #[error("no {length}-letter middle word has enough subwords in this lexicon")]
    NoMiddleWord { length: usize },

    /// Every generation attempt failed
    #[error("could not build a board after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
